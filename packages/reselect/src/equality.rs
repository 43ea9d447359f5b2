//! Equality policies decide whether two argument lists are the same for cache-hit purposes.
//!
//! Every policy is a pure function of its two operands. The default, [`StrictEquality`], compares
//! primitives by value and shared values ([`Rc`], [`Arc`]) by identity, so a derived value is only
//! recomputed when an input was actually replaced. [`ValueEquality`] opts into a deep [`PartialEq`]
//! comparison and [`EqualityFn`] turns any closure into a policy.

use std::{rc::Rc, sync::Arc};

/// A policy comparing two values of type `T`.
pub trait Equality<T: ?Sized> {
    /// Returns true if `a` and `b` count as the same input.
    fn equals(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, E: Equality<T> + ?Sized> Equality<T> for &E {
    fn equals(&self, a: &T, b: &T) -> bool {
        (**self).equals(a, b)
    }
}

impl<T: ?Sized, E: Equality<T> + ?Sized> Equality<T> for Arc<E> {
    fn equals(&self, a: &T, b: &T) -> bool {
        (**self).equals(a, b)
    }
}

/// Value equality for primitives, identity for shared values. This is the default policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrictEquality;

impl<T: StrictEq + ?Sized> Equality<T> for StrictEquality {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a.strict_eq(b)
    }
}

/// Deep equality through [`PartialEq`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueEquality;

impl<T: PartialEq + ?Sized> Equality<T> for ValueEquality {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// A policy backed by a closure.
///
/// ```rust
/// use reselect::{Equality, EqualityFn};
///
/// let within_a_cent = EqualityFn(|a: &f64, b: &f64| (a - b).abs() < 0.01);
/// assert!(within_a_cent.equals(&1.001, &1.0));
/// assert!(!within_a_cent.equals(&1.5, &1.0));
/// ```
#[derive(Clone, Copy, Default)]
pub struct EqualityFn<F>(pub F);

impl<F> std::fmt::Debug for EqualityFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EqualityFn")
            .field(&std::any::type_name::<F>())
            .finish()
    }
}

impl<T: ?Sized, F> Equality<T> for EqualityFn<F>
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.0)(a, b)
    }
}

/// Strict equality: value equality for primitives and identity for shared values.
///
/// Owned collections like `Vec` deliberately don't implement this trait. A freshly cloned
/// collection has no identity to compare, so share it behind an [`Rc`] or [`Arc`] or pick
/// [`ValueEquality`] instead.
pub trait StrictEq {
    /// Returns true if `self` and `other` are strictly equal.
    fn strict_eq(&self, other: &Self) -> bool;
}

macro_rules! impl_strict_eq_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StrictEq for $ty {
                #[inline]
                fn strict_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

// Floats follow IEEE comparison, so NaN never matches and always recomputes.
impl_strict_eq_by_value!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    str,
    String,
);

impl<T: ?Sized> StrictEq for Rc<T> {
    #[inline]
    fn strict_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> StrictEq for Arc<T> {
    #[inline]
    fn strict_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: StrictEq + ?Sized> StrictEq for &T {
    #[inline]
    fn strict_eq(&self, other: &Self) -> bool {
        (**self).strict_eq(*other)
    }
}

impl<T: StrictEq> StrictEq for Option<T> {
    fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.strict_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}
