use crate::{IntoSelector, Selector};

/// An ordered collection of input selectors evaluated against the same state and props.
///
/// Tuples of selectors produce a tuple of their outputs. A `Vec` of selectors produces a `Vec` of
/// outputs.
pub trait Inputs<S, P> {
    /// The ordered outputs of the input selectors.
    type Output;

    /// Run every input selector in declaration order.
    fn select_all(&self, state: &S, props: &P) -> Self::Output;

    /// The number of input selectors.
    fn count(&self) -> usize;
}

impl<S, P, T> Inputs<S, P> for Vec<T>
where
    T: Selector<S, P>,
{
    type Output = Vec<T::Output>;

    fn select_all(&self, state: &S, props: &P) -> Self::Output {
        self.iter()
            .map(|selector| selector.select(state, props))
            .collect()
    }

    fn count(&self) -> usize {
        self.len()
    }
}

/// A tuple of one or more input selectors or closures that converts into [`Inputs`].
pub trait IntoInputs<S, P, M> {
    /// The converted inputs.
    type Inputs: Inputs<S, P>;

    /// Convert every element into a selector.
    fn into_inputs(self) -> Self::Inputs;
}

macro_rules! impl_inputs {
    ($count:literal; $($el:ident $marker:ident $name:ident),+) => {
        impl<S, P, $($el),+> Inputs<S, P> for ($($el,)+)
        where
            $($el: Selector<S, P>),+
        {
            type Output = ($($el::Output,)+);

            fn select_all(&self, state: &S, props: &P) -> Self::Output {
                let ($($name,)+) = self;
                ($($name.select(state, props),)+)
            }

            fn count(&self) -> usize {
                $count
            }
        }

        impl<S, P, $($el, $marker),+> IntoInputs<S, P, ($($marker,)+)> for ($($el,)+)
        where
            $($el: IntoSelector<S, P, $marker>),+
        {
            type Inputs = ($($el::Selector,)+);

            fn into_inputs(self) -> Self::Inputs {
                let ($($name,)+) = self;
                ($($name.into_selector(),)+)
            }
        }
    };
}

impl_inputs!(1; A MA a);
impl_inputs!(2; A MA a, B MB b);
impl_inputs!(3; A MA a, B MB b, C MC c);
impl_inputs!(4; A MA a, B MB b, C MC c, D MD d);
impl_inputs!(5; A MA a, B MB b, C MC c, D MD d, E ME e);
impl_inputs!(6; A MA a, B MB b, C MC c, D MD d, E ME e, F MF f);
impl_inputs!(7; A MA a, B MB b, C MC c, D MD d, E ME e, F MF f, G MG g);
impl_inputs!(8; A MA a, B MB b, C MC c, D MD d, E ME e, F MF f, G MG g, H MH h);
impl_inputs!(9; A MA a, B MB b, C MC c, D MD d, E ME e, F MF f, G MG g, H MH h, I MI i);
impl_inputs!(10; A MA a, B MB b, C MC c, D MD d, E ME e, F MF f, G MG g, H MH h, I MI i, J MJ j);
impl_inputs!(11; A MA a, B MB b, C MC c, D MD d, E ME e, F MF f, G MG g, H MH h, I MI i, J MJ j, K MK k);
impl_inputs!(12; A MA a, B MB b, C MC c, D MD d, E ME e, F MF f, G MG g, H MH h, I MI i, J MJ j, K MK k, L ML l);
