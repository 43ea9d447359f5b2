use crate::{
    Combiner, ConfigError, ConfigResult, EqualityFn, Fallible, Inputs, IntoInputs, MemoSelector,
    Plain, Selector, StrictEquality, Storage, SyncStorage, UnsyncStorage,
};
use std::marker::PhantomData;

/// The arguments a result function receives from a set of inputs.
pub type ArgsOf<S, P, M, I> = <<I as IntoInputs<S, P, M>>::Inputs as Inputs<S, P>>::Output;

/// A selector built by [`SelectorCreator::create`].
pub type CreatedSelector<S, P, M, I, C, E = StrictEquality, St = UnsyncStorage> = MemoSelector<
    S,
    P,
    <I as IntoInputs<S, P, M>>::Inputs,
    C,
    ArgsOf<S, P, M, I>,
    <C as Combiner<ArgsOf<S, P, M, I>>>::Output,
    E,
    St,
    Plain,
>;

/// A selector built by [`SelectorCreator::create_from_list`].
pub type ListSelector<S, P, T, C, E = StrictEquality, St = UnsyncStorage> = MemoSelector<
    S,
    P,
    Vec<T>,
    C,
    Vec<<T as Selector<S, P>>::Output>,
    <C as Combiner<Vec<<T as Selector<S, P>>::Output>>>::Output,
    E,
    St,
    Plain,
>;

/// Configuration shared by every selector it creates: the equality policy comparing input outputs
/// and the storage backing each selector's cache.
///
/// ```rust
/// use reselect::{Selector, SelectorCreator, ValueEquality};
///
/// struct Inbox { unread: Vec<u32> }
///
/// // Compare the cloned lists by value instead of by identity.
/// let creator = SelectorCreator::new().equality(ValueEquality);
/// let unread_count = creator.create((|inbox: &Inbox| inbox.unread.clone(),), |unread: &Vec<u32>| unread.len());
///
/// let inbox = Inbox { unread: vec![1, 2] };
/// assert_eq!(unread_count.select(&inbox, &()), 2);
/// assert_eq!(unread_count.select(&inbox, &()), 2);
/// assert_eq!(unread_count.recomputations(), 1);
/// ```
pub struct SelectorCreator<E = StrictEquality, St = UnsyncStorage> {
    equality: E,
    _storage: PhantomData<St>,
}

impl SelectorCreator {
    /// A creator with [`StrictEquality`] and single threaded caches.
    pub const fn new() -> Self {
        Self {
            equality: StrictEquality,
            _storage: PhantomData,
        }
    }
}

impl Default for SelectorCreator {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone, St> Clone for SelectorCreator<E, St> {
    fn clone(&self) -> Self {
        Self {
            equality: self.equality.clone(),
            _storage: PhantomData,
        }
    }
}

impl<E: std::fmt::Debug, St> std::fmt::Debug for SelectorCreator<E, St> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectorCreator")
            .field("equality", &self.equality)
            .field("storage", &std::any::type_name::<St>())
            .finish()
    }
}

impl<E, St> SelectorCreator<E, St> {
    /// Compare input outputs with `equality`.
    pub fn equality<E2>(self, equality: E2) -> SelectorCreator<E2, St> {
        SelectorCreator {
            equality,
            _storage: PhantomData,
        }
    }

    /// Compare input outputs with a closure.
    pub fn equality_fn<F>(self, equality: F) -> SelectorCreator<EqualityFn<F>, St> {
        self.equality(EqualityFn(equality))
    }

    /// Back the caches with a different [`Storage`].
    pub fn storage<St2: Storage>(self) -> SelectorCreator<E, St2> {
        SelectorCreator {
            equality: self.equality,
            _storage: PhantomData,
        }
    }

    /// Back the caches with [`SyncStorage`] so the selectors can be shared between threads.
    pub fn sync(self) -> SelectorCreator<E, SyncStorage> {
        self.storage()
    }

    /// The equality policy handed to every selector.
    pub fn equality_policy(&self) -> &E {
        &self.equality
    }
}

impl<E: Clone, St: Storage> SelectorCreator<E, St> {
    /// Create a memoized selector from a tuple of input selectors and a result function taking one
    /// reference per input.
    #[track_caller]
    pub fn create<S, P, M, I, C>(
        &self,
        inputs: I,
        combiner: C,
    ) -> CreatedSelector<S, P, M, I, C, E, St>
    where
        I: IntoInputs<S, P, M>,
        C: Combiner<ArgsOf<S, P, M, I>>,
    {
        MemoSelector::new(
            inputs.into_inputs(),
            combiner,
            self.equality.clone(),
            std::panic::Location::caller(),
        )
    }

    /// Create a memoized selector from a list of input selectors sharing one output type and a
    /// result function over the slice of their outputs.
    ///
    /// Fails with [`ConfigError::NoInputSelectors`] if the list is empty.
    #[track_caller]
    pub fn create_from_list<S, P, T, C>(
        &self,
        inputs: Vec<T>,
        combiner: C,
    ) -> ConfigResult<ListSelector<S, P, T, C, E, St>>
    where
        T: Selector<S, P>,
        C: Combiner<Vec<T::Output>>,
    {
        if inputs.is_empty() {
            tracing::debug!(
                "Rejected a selector with no inputs at {}",
                std::panic::Location::caller()
            );
            return Err(ConfigError::NoInputSelectors);
        }

        Ok(MemoSelector::new(
            inputs,
            combiner,
            self.equality.clone(),
            std::panic::Location::caller(),
        ))
    }

    /// Create a memoized selector whose result function returns a `Result`. `Ok` values are cached,
    /// errors are returned to the caller and never cached.
    #[track_caller]
    #[allow(clippy::type_complexity)]
    pub fn create_try<S, P, M, I, C, R, Err>(
        &self,
        inputs: I,
        combiner: C,
    ) -> MemoSelector<S, P, I::Inputs, C, ArgsOf<S, P, M, I>, R, E, St, Fallible>
    where
        I: IntoInputs<S, P, M>,
        C: Combiner<ArgsOf<S, P, M, I>, Output = Result<R, Err>>,
    {
        MemoSelector::new(
            inputs.into_inputs(),
            combiner,
            self.equality.clone(),
            std::panic::Location::caller(),
        )
    }
}

/// Create a memoized selector with [`StrictEquality`] and a single threaded cache.
///
/// `inputs` is a tuple of one or more input selectors: memoized selectors, closures over the
/// state (`|state: &S| ..`), or closures over the state and props (`|state: &S, props: &P| ..`).
/// `combiner` takes one reference per input.
///
/// ```rust
/// use reselect::{create_selector, Selector};
///
/// struct Shop { tax_percent: f64, prices: Vec<f64> }
///
/// let subtotal = create_selector((|shop: &Shop| shop.prices.iter().sum::<f64>(),), |sum: &f64| *sum);
/// let total = create_selector(
///     (&subtotal, |shop: &Shop| shop.tax_percent),
///     |subtotal: &f64, tax: &f64| subtotal * (1.0 + tax / 100.0),
/// );
///
/// let shop = Shop { tax_percent: 50.0, prices: vec![1.0, 1.0] };
/// assert_eq!(total.select(&shop, &()), 3.0);
/// ```
#[track_caller]
pub fn create_selector<S, P, M, I, C>(inputs: I, combiner: C) -> CreatedSelector<S, P, M, I, C>
where
    I: IntoInputs<S, P, M>,
    C: Combiner<ArgsOf<S, P, M, I>>,
{
    SelectorCreator::new().create(inputs, combiner)
}

/// Create a memoized selector from a list of input selectors. See
/// [`SelectorCreator::create_from_list`].
#[track_caller]
pub fn create_selector_from_list<S, P, T, C>(
    inputs: Vec<T>,
    combiner: C,
) -> ConfigResult<ListSelector<S, P, T, C>>
where
    T: Selector<S, P>,
    C: Combiner<Vec<T::Output>>,
{
    SelectorCreator::new().create_from_list(inputs, combiner)
}

/// Create a memoized selector over a fallible result function. See [`SelectorCreator::create_try`].
#[track_caller]
#[allow(clippy::type_complexity)]
pub fn create_try_selector<S, P, M, I, C, R, Err>(
    inputs: I,
    combiner: C,
) -> MemoSelector<S, P, I::Inputs, C, ArgsOf<S, P, M, I>, R, StrictEquality, UnsyncStorage, Fallible>
where
    I: IntoInputs<S, P, M>,
    C: Combiner<ArgsOf<S, P, M, I>, Output = Result<R, Err>>,
{
    SelectorCreator::new().create_try(inputs, combiner)
}
