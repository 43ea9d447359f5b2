use crate::{ArgList, Combiner, Inputs, MemoCache, Selector, StrictEquality, Storage, UnsyncStorage};
use std::{borrow::Cow, fmt::Display, marker::PhantomData, panic::Location};

/// Where a selector was created and the optional name it was given. Used to label log events.
#[derive(Debug, Clone)]
pub struct SelectorInfo {
    name: Option<Cow<'static, str>>,
    location: &'static Location<'static>,
}

impl SelectorInfo {
    pub(crate) fn new(location: &'static Location<'static>) -> Self {
        Self {
            name: None,
            location,
        }
    }

    /// The name of the selector, if it was given one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The location the selector was created at.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl Display for SelectorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} (created at {})", self.location),
            None => write!(f, "created at {}", self.location),
        }
    }
}

/// Marks a selector whose result function always produces a value.
#[derive(Debug, Clone, Copy)]
pub struct Plain;

/// Marks a selector whose result function returns a `Result`. Only `Ok` values are cached.
#[derive(Debug, Clone, Copy)]
pub struct Fallible;

/// A memoized selector: input selectors feeding a result function through a single slot
/// [`MemoCache`].
///
/// Every call runs the input selectors with the same state and props, then compares their outputs
/// with the previous call's outputs. The result function only runs when one of them changed.
///
/// The type parameters are inferred by [`create_selector`](crate::create_selector) and friends.
/// `S` and `P` are the state and props types, `I` the inputs, `C` the result function, `A` the
/// argument list and `R` the cached result.
pub struct MemoSelector<
    S,
    P,
    I,
    C,
    A,
    R,
    E = StrictEquality,
    St: Storage = UnsyncStorage,
    K = Plain,
> {
    inputs: I,
    combiner: C,
    cache: MemoCache<A, R, E, St>,
    info: SelectorInfo,
    _marker: PhantomData<fn(&S, &P) -> K>,
}

/// A memoized selector over a fallible result function.
pub type TryMemoSelector<S, P, I, C, A, R, E = StrictEquality, St = UnsyncStorage> =
    MemoSelector<S, P, I, C, A, R, E, St, Fallible>;

impl<S, P, I, C, A, R, E, St: Storage, K> MemoSelector<S, P, I, C, A, R, E, St, K> {
    pub(crate) fn new(
        inputs: I,
        combiner: C,
        equality: E,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            inputs,
            combiner,
            cache: MemoCache::with_equality(equality),
            info: SelectorInfo::new(location),
            _marker: PhantomData,
        }
    }

    /// Give the selector a name. The name shows up in log events.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.info.name = Some(name.into());
        self
    }

    /// The name of the selector, if it was given one.
    pub fn name(&self) -> Option<&str> {
        self.info.name()
    }

    /// The location this selector was created at.
    pub fn created_at(&self) -> &'static Location<'static> {
        self.info.location()
    }

    /// The name and location of this selector.
    pub fn info(&self) -> &SelectorInfo {
        &self.info
    }

    /// The result function.
    pub fn combiner(&self) -> &C {
        &self.combiner
    }

    /// The input selectors.
    pub fn inputs(&self) -> &I {
        &self.inputs
    }

    /// The number of times the result function has run since creation or the last reset.
    pub fn recomputations(&self) -> usize {
        self.cache.recomputations()
    }

    /// Reset the recomputation counter.
    pub fn reset_recomputations(&self) {
        self.cache.reset_recomputations()
    }

    /// Forget the cached result. The next call recomputes even if the inputs are unchanged.
    pub fn clear_cache(&self) {
        self.cache.clear()
    }

    /// The cached result, if the selector ran successfully at least once.
    pub fn last_result(&self) -> Option<R>
    where
        R: Clone,
    {
        self.cache.last_result()
    }

    /// The equality policy comparing the input outputs.
    pub fn equality(&self) -> &E {
        self.cache.equality()
    }
}

impl<S, P, I, C, A, R, E, St> Selector<S, P> for MemoSelector<S, P, I, C, A, R, E, St, Plain>
where
    I: Inputs<S, P, Output = A>,
    C: Combiner<A, Output = R>,
    A: ArgList<E>,
    R: Clone,
    St: Storage,
{
    type Output = R;

    fn select(&self, state: &S, props: &P) -> R {
        let args = self.inputs.select_all(state, props);
        self.cache.get_or_compute(args, |args| {
            tracing::trace!("Recomputing selector {}", self.info);
            self.combiner.combine(args)
        })
    }
}

impl<S, P, I, C, A, R, Err, E, St> Selector<S, P> for MemoSelector<S, P, I, C, A, R, E, St, Fallible>
where
    I: Inputs<S, P, Output = A>,
    C: Combiner<A, Output = Result<R, Err>>,
    A: ArgList<E>,
    R: Clone,
    St: Storage,
{
    type Output = Result<R, Err>;

    fn select(&self, state: &S, props: &P) -> Result<R, Err> {
        let args = self.inputs.select_all(state, props);
        let result = self.cache.try_get_or_compute(args, |args| {
            tracing::trace!("Recomputing selector {}", self.info);
            self.combiner.combine(args)
        });
        if result.is_err() {
            tracing::debug!("Selector {} failed, keeping the previous result", self.info);
        }
        result
    }
}

impl<S, P, I, C, A, R, E: std::fmt::Debug, St: Storage, K> std::fmt::Debug
    for MemoSelector<S, P, I, C, A, R, E, St, K>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoSelector")
            .field("info", &self.info)
            .field("combiner", &std::any::type_name::<C>())
            .field("cache", &self.cache)
            .finish()
    }
}
