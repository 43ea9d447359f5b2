/// A result function applied to an ordered argument list.
///
/// Closures taking each argument by reference implement this for the matching tuple, so
/// `|a: &i32, b: &i32| a + b` is a `Combiner<(i32, i32)>`. Closures over a slice,
/// `|values: &[i32]| values.iter().sum::<i32>()`, combine the list form `Vec<i32>`.
pub trait Combiner<Args> {
    /// The derived value.
    type Output;

    /// Run the result function with the arguments spread out.
    fn combine(&self, args: &Args) -> Self::Output;
}

impl<F, R> Combiner<()> for F
where
    F: Fn() -> R,
{
    type Output = R;

    fn combine(&self, _: &()) -> R {
        self()
    }
}

impl<F, R, T> Combiner<Vec<T>> for F
where
    F: Fn(&[T]) -> R,
{
    type Output = R;

    fn combine(&self, args: &Vec<T>) -> R {
        self(args.as_slice())
    }
}

macro_rules! impl_combiner {
    ($($el:ident $name:ident),*) => {
        impl<Func, R, $($el),*> Combiner<($($el,)*)> for Func
        where
            Func: Fn($(&$el),*) -> R,
        {
            type Output = R;

            fn combine(&self, args: &($($el,)*)) -> R {
                let ($($name,)*) = args;
                self($($name),*)
            }
        }
    };
}

impl_combiner!(A a);
impl_combiner!(A a, B b);
impl_combiner!(A a, B b, C c);
impl_combiner!(A a, B b, C c, D d);
impl_combiner!(A a, B b, C c, D d, E e);
impl_combiner!(A a, B b, C c, D d, E e, F f);
impl_combiner!(A a, B b, C c, D d, E e, F f, G g);
impl_combiner!(A a, B b, C c, D d, E e, F f, G g, H h);
impl_combiner!(A a, B b, C c, D d, E e, F f, G g, H h, I i);
impl_combiner!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j);
impl_combiner!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k);
impl_combiner!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l);
