use crate::Equality;

/// An ordered argument list that can be compared position by position with an [`Equality`] policy.
///
/// Tuples are fixed arity lists where every position may have its own type. `Vec` is the dynamic
/// form and two lists of different lengths never match.
pub trait ArgList<E> {
    /// Returns true if every position of `self` equals the same position of `other`.
    fn matches(&self, other: &Self, equality: &E) -> bool;
}

impl<E> ArgList<E> for () {
    fn matches(&self, _: &Self, _: &E) -> bool {
        true
    }
}

impl<E, T> ArgList<E> for Vec<T>
where
    E: Equality<T>,
{
    fn matches(&self, other: &Self, equality: &E) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| equality.equals(a, b))
    }
}

macro_rules! impl_arg_list {
    (
        $($el:ident=$name:ident $other:ident,)*
    ) => {
        impl<E, $($el),*> ArgList<E> for ($($el,)*)
        where
            $(
                E: Equality<$el>
            ),*
        {
            fn matches(&self, other: &Self, equality: &E) -> bool {
                let ($($name,)*) = self;
                let ($($other,)*) = other;
                $(
                    if !<E as Equality<$el>>::equals(equality, $name, $other) {
                        return false;
                    }
                )*
                true
            }
        }
    };
}

impl_arg_list!(A = a1 a2,);
impl_arg_list!(A = a1 a2, B = b1 b2,);
impl_arg_list!(A = a1 a2, B = b1 b2, C = c1 c2,);
impl_arg_list!(A = a1 a2, B = b1 b2, C = c1 c2, D = d1 d2,);
impl_arg_list!(A = a1 a2, B = b1 b2, C = c1 c2, D = d1 d2, E1 = e1 e2,);
impl_arg_list!(A = a1 a2, B = b1 b2, C = c1 c2, D = d1 d2, E1 = e1 e2, F = f1 f2,);
impl_arg_list!(A = a1 a2, B = b1 b2, C = c1 c2, D = d1 d2, E1 = e1 e2, F = f1 f2, G = g1 g2,);
impl_arg_list!(A = a1 a2, B = b1 b2, C = c1 c2, D = d1 d2, E1 = e1 e2, F = f1 f2, G = g1 g2, H = h1 h2,);
impl_arg_list!(A = a1 a2, B = b1 b2, C = c1 c2, D = d1 d2, E1 = e1 e2, F = f1 f2, G = g1 g2, H = h1 h2, I = i1 i2,);
impl_arg_list!(A = a1 a2, B = b1 b2, C = c1 c2, D = d1 d2, E1 = e1 e2, F = f1 f2, G = g1 g2, H = h1 h2, I = i1 i2, J = j1 j2,);
impl_arg_list!(A = a1 a2, B = b1 b2, C = c1 c2, D = d1 d2, E1 = e1 e2, F = f1 f2, G = g1 g2, H = h1 h2, I = i1 i2, J = j1 j2, K = k1 k2,);
impl_arg_list!(A = a1 a2, B = b1 b2, C = c1 c2, D = d1 d2, E1 = e1 e2, F = f1 f2, G = g1 g2, H = h1 h2, I = i1 i2, J = j1 j2, K = k1 k2, L = l1 l2,);
