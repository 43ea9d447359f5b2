use std::{rc::Rc, sync::Arc};

/// A function deriving a value from a state object `S` and extra parameters `P`.
///
/// Memoized selectors, [`from_state`] and [`from_fn`] adapters and shared pointers to any of them
/// are selectors. Closures can be passed anywhere an input selector is expected, see
/// [`IntoSelector`].
pub trait Selector<S, P = ()> {
    /// The selected value.
    type Output;

    /// Select a value from `state` with the extra parameters `props`.
    fn select(&self, state: &S, props: &P) -> Self::Output;
}

impl<S, P, T: Selector<S, P> + ?Sized> Selector<S, P> for &T {
    type Output = T::Output;

    fn select(&self, state: &S, props: &P) -> Self::Output {
        (**self).select(state, props)
    }
}

impl<S, P, T: Selector<S, P> + ?Sized> Selector<S, P> for Box<T> {
    type Output = T::Output;

    fn select(&self, state: &S, props: &P) -> Self::Output {
        (**self).select(state, props)
    }
}

impl<S, P, T: Selector<S, P> + ?Sized> Selector<S, P> for Rc<T> {
    type Output = T::Output;

    fn select(&self, state: &S, props: &P) -> Self::Output {
        (**self).select(state, props)
    }
}

impl<S, P, T: Selector<S, P> + ?Sized> Selector<S, P> for Arc<T> {
    type Output = T::Output;

    fn select(&self, state: &S, props: &P) -> Self::Output {
        (**self).select(state, props)
    }
}

/// A type erased selector. Used to mix selectors of different types in one list.
pub type BoxedSelector<'a, S, P, O> = Box<dyn Selector<S, P, Output = O> + 'a>;

/// A selector reading only the state. It accepts (and ignores) any extra parameters.
#[derive(Clone, Copy)]
pub struct StateFn<F>(F);

impl<S, P, F, O> Selector<S, P> for StateFn<F>
where
    F: Fn(&S) -> O,
{
    type Output = O;

    fn select(&self, state: &S, _: &P) -> O {
        (self.0)(state)
    }
}

/// A selector reading the state and the extra parameters.
#[derive(Clone, Copy)]
pub struct PropsFn<F>(F);

impl<S, P, F, O> Selector<S, P> for PropsFn<F>
where
    F: Fn(&S, &P) -> O,
{
    type Output = O;

    fn select(&self, state: &S, props: &P) -> O {
        (self.0)(state, props)
    }
}

/// Turn a closure over the state into a [`Selector`].
pub fn from_state<S, O, F>(f: F) -> StateFn<F>
where
    F: Fn(&S) -> O,
{
    StateFn(f)
}

/// Turn a closure over the state and the extra parameters into a [`Selector`].
pub fn from_fn<S, P, O, F>(f: F) -> PropsFn<F>
where
    F: Fn(&S, &P) -> O,
{
    PropsFn(f)
}

/// Marker for values that already are a [`Selector`].
pub struct SelectorMarker;
/// Marker for closures `Fn(&S) -> O`.
pub struct StateFnMarker;
/// Marker for closures `Fn(&S, &P) -> O`.
pub struct PropsFnMarker;

/// Anything that can be used as an input selector: a [`Selector`], a closure over the state, or a
/// closure over the state and the extra parameters.
///
/// The marker `M` only disambiguates the implementations and is always inferred.
pub trait IntoSelector<S, P, M> {
    /// The selector this converts into.
    type Selector: Selector<S, P>;

    /// Convert into a selector.
    fn into_selector(self) -> Self::Selector;
}

impl<S, P, T> IntoSelector<S, P, SelectorMarker> for T
where
    T: Selector<S, P>,
{
    type Selector = T;

    fn into_selector(self) -> T {
        self
    }
}

impl<S, P, F, O> IntoSelector<S, P, StateFnMarker> for F
where
    F: Fn(&S) -> O,
{
    type Selector = StateFn<F>;

    fn into_selector(self) -> StateFn<F> {
        StateFn(self)
    }
}

impl<S, P, F, O> IntoSelector<S, P, PropsFnMarker> for F
where
    F: Fn(&S, &P) -> O,
{
    type Selector = PropsFn<F>;

    fn into_selector(self) -> PropsFn<F> {
        PropsFn(self)
    }
}

/// Box any input selector so selectors of different types fit in one list.
///
/// ```rust
/// use reselect::{boxed, create_structured_selector, Selector};
///
/// struct Point { x: i32, y: i32 }
///
/// let coords = create_structured_selector([
///     ("x", boxed(|p: &Point| p.x)),
///     ("y", boxed(|p: &Point| p.y)),
/// ])
/// .unwrap();
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(coords.select(&point, &())["y"], 2);
/// ```
pub fn boxed<'a, S, P, M, T>(
    selector: T,
) -> BoxedSelector<'a, S, P, <T::Selector as Selector<S, P>>::Output>
where
    T: IntoSelector<S, P, M>,
    T::Selector: 'a,
{
    Box::new(selector.into_selector())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Todos {
        items: Vec<&'static str>,
    }

    fn select_with<S, P, M, T: IntoSelector<S, P, M>>(
        selector: T,
        state: &S,
        props: &P,
    ) -> <T::Selector as Selector<S, P>>::Output {
        selector.into_selector().select(state, props)
    }

    #[test]
    fn closures_become_selectors() {
        let todos = Todos {
            items: vec!["write", "test"],
        };

        let count = select_with(|t: &Todos| t.items.len(), &todos, &());
        assert_eq!(count, 2);

        let nth = select_with(|t: &Todos, index: &usize| t.items[*index], &todos, &1);
        assert_eq!(nth, "test");
    }

    #[test]
    fn pointers_forward_to_the_selector() {
        let todos = Todos { items: vec!["a"] };
        let first = Rc::new(from_state(|t: &Todos| t.items[0]));

        assert_eq!(first.select(&todos, &()), "a");
        assert_eq!((&first).select(&todos, &()), "a");
        assert_eq!(select_with(first.clone(), &todos, &()), "a");

        let shared: Arc<dyn Selector<Todos, (), Output = usize>> =
            Arc::new(from_fn(|t: &Todos, _: &()| t.items.len()));
        assert_eq!(shared.select(&todos, &()), 1);
    }
}
