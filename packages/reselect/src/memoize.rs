use crate::{ArgList, Combiner, StrictEquality, Storage, UnsyncStorage};
use std::{
    fmt::Debug,
    sync::atomic::{AtomicUsize, Ordering},
};

struct Entry<A, R> {
    args: A,
    result: R,
}

/// A cache of size one: the most recent argument list and the result computed from it.
///
/// The entry is only written after a computation succeeds, so a panicking or failing computation
/// leaves the previous entry in place.
pub struct MemoCache<A, R, E = StrictEquality, St: Storage = UnsyncStorage> {
    slot: St::Cell<Option<Entry<A, R>>>,
    equality: E,
    recomputations: AtomicUsize,
}

impl<A, R, E: Default, St: Storage> Default for MemoCache<A, R, E, St> {
    fn default() -> Self {
        Self::with_equality(E::default())
    }
}

impl<A, R, E: Default, St: Storage> MemoCache<A, R, E, St> {
    /// Create an empty cache with the default equality policy.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A, R, E, St: Storage> MemoCache<A, R, E, St> {
    /// Create an empty cache comparing arguments with `equality`.
    pub fn with_equality(equality: E) -> Self {
        Self {
            slot: St::new_cell(None),
            equality,
            recomputations: AtomicUsize::new(0),
        }
    }

    /// Return the cached result if `args` matches the cached argument list, otherwise run
    /// `compute` and cache its result.
    pub fn get_or_compute(&self, args: A, compute: impl FnOnce(&A) -> R) -> R
    where
        A: ArgList<E>,
        R: Clone,
    {
        let mut slot = St::lock(&self.slot);
        if let Some(entry) = slot.as_ref() {
            if entry.args.matches(&args, &self.equality) {
                return entry.result.clone();
            }
        }

        self.recomputations.fetch_add(1, Ordering::Relaxed);
        let result = compute(&args);
        *slot = Some(Entry {
            args,
            result: result.clone(),
        });
        result
    }

    /// Like [`MemoCache::get_or_compute`] for a fallible computation. `Ok` results are cached,
    /// errors are returned as is and leave the cache untouched.
    pub fn try_get_or_compute<Err>(
        &self,
        args: A,
        compute: impl FnOnce(&A) -> Result<R, Err>,
    ) -> Result<R, Err>
    where
        A: ArgList<E>,
        R: Clone,
    {
        let mut slot = St::lock(&self.slot);
        if let Some(entry) = slot.as_ref() {
            if entry.args.matches(&args, &self.equality) {
                return Ok(entry.result.clone());
            }
        }

        self.recomputations.fetch_add(1, Ordering::Relaxed);
        let result = compute(&args)?;
        *slot = Some(Entry {
            args,
            result: result.clone(),
        });
        Ok(result)
    }

    /// The number of times the computation has run since creation or the last reset.
    pub fn recomputations(&self) -> usize {
        self.recomputations.load(Ordering::Relaxed)
    }

    /// Reset the recomputation counter to zero.
    pub fn reset_recomputations(&self) {
        self.recomputations.store(0, Ordering::Relaxed);
    }

    /// Forget the cached entry. The next call always recomputes.
    pub fn clear(&self) {
        *St::lock(&self.slot) = None;
    }

    /// Returns true if an entry is cached.
    pub fn is_cached(&self) -> bool {
        St::lock(&self.slot).is_some()
    }

    /// A clone of the cached result, if any.
    pub fn last_result(&self) -> Option<R>
    where
        R: Clone,
    {
        St::lock(&self.slot)
            .as_ref()
            .map(|entry| entry.result.clone())
    }

    /// The equality policy of this cache.
    pub fn equality(&self) -> &E {
        &self.equality
    }
}

impl<A, R, E: Debug, St: Storage> Debug for MemoCache<A, R, E, St> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoCache")
            .field("equality", &self.equality)
            .field("recomputations", &self.recomputations())
            .finish_non_exhaustive()
    }
}

/// A function wrapped with a [`MemoCache`]. Created with [`memoize`] or [`memoize_with`].
pub struct Memoizer<F, A, R, E = StrictEquality, St: Storage = UnsyncStorage> {
    func: F,
    cache: MemoCache<A, R, E, St>,
}

impl<F, A, R, E, St: Storage> Memoizer<F, A, R, E, St> {
    /// Wrap `func`, comparing argument lists with `equality`.
    pub fn with_equality(func: F, equality: E) -> Self {
        Self {
            func,
            cache: MemoCache::with_equality(equality),
        }
    }

    /// Call the wrapped function unless `args` matches the previous call's arguments.
    pub fn invoke(&self, args: A) -> R
    where
        F: Combiner<A, Output = R>,
        A: ArgList<E>,
        R: Clone,
    {
        self.cache.get_or_compute(args, |args| self.func.combine(args))
    }

    /// The wrapped function.
    pub fn func(&self) -> &F {
        &self.func
    }

    /// The cache backing this function.
    pub fn cache(&self) -> &MemoCache<A, R, E, St> {
        &self.cache
    }

    /// The number of times the wrapped function has run.
    pub fn recomputations(&self) -> usize {
        self.cache.recomputations()
    }

    /// Reset the recomputation counter.
    pub fn reset_recomputations(&self) {
        self.cache.reset_recomputations()
    }

    /// Forget the cached call.
    pub fn clear_cache(&self) {
        self.cache.clear()
    }
}

impl<F, A, R, E: Debug, St: Storage> Debug for Memoizer<F, A, R, E, St> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memoizer")
            .field("func", &std::any::type_name::<F>())
            .field("cache", &self.cache)
            .finish()
    }
}

/// Memoize `func` with the default [`StrictEquality`] policy and a single threaded cache.
///
/// The memoized function remembers only its most recent call:
///
/// ```rust
/// use reselect::memoize;
///
/// let double = memoize(|value: &i32| value * 2);
/// assert_eq!(double.invoke((2,)), 4);
/// assert_eq!(double.invoke((2,)), 4);
/// assert_eq!(double.recomputations(), 1);
///
/// double.invoke((3,));
/// double.invoke((2,));
/// assert_eq!(double.recomputations(), 3);
/// ```
pub fn memoize<F, A, R>(func: F) -> Memoizer<F, A, R>
where
    F: Combiner<A, Output = R>,
{
    Memoizer::with_equality(func, StrictEquality)
}

/// Memoize `func` comparing arguments with a custom equality policy.
pub fn memoize_with<F, A, R, E>(func: F, equality: E) -> Memoizer<F, A, R, E>
where
    F: Combiner<A, Output = R>,
{
    Memoizer::with_equality(func, equality)
}
