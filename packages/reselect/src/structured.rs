use crate::{
    Combiner, ConfigError, ConfigResult, MemoSelector, Plain, Selector, SelectorCreator, StrictEq,
    StrictEquality, Storage, UnsyncStorage,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::{fmt::Debug, iter::Map, ops::Index, slice, sync::Arc};

/// The result of a structured selector: field names mapped to the values their selectors
/// produced.
///
/// Iteration follows the order the fields were declared in. Equality ([`PartialEq`]) ignores that
/// order and compares the fields by value, while [`StrictEq`] compares identity: every
/// recomputation produces a new `Structured`.
pub struct Structured<O> {
    fields: Arc<[(Arc<str>, O)]>,
}

impl<O> Structured<O> {
    /// Build a structured value from `(name, value)` pairs.
    ///
    /// A repeated name overwrites the earlier value and keeps the earlier position, like inserting
    /// into a map.
    pub fn new(fields: impl IntoIterator<Item = (impl Into<Arc<str>>, O)>) -> Self {
        let mut positions = FxHashMap::<Arc<str>, usize>::default();
        let mut entries: Vec<(Arc<str>, O)> = Vec::new();

        for (name, value) in fields {
            let name: Arc<str> = name.into();
            match positions.get(&name) {
                Some(&index) => entries[index].1 = value,
                None => {
                    positions.insert(name.clone(), entries.len());
                    entries.push((name, value));
                }
            }
        }

        Self {
            fields: entries.into(),
        }
    }

    /// The value of a field.
    pub fn get(&self, name: &str) -> Option<&O> {
        self.fields
            .iter()
            .find(|(field, _)| &**field == name)
            .map(|(_, value)| value)
    }

    /// Returns true if the field exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &O)> + '_ {
        self.into_iter()
    }

    /// The field names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|(name, _)| &**name)
    }

    /// The field values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &O> + '_ {
        self.fields.iter().map(|(_, value)| value)
    }

    /// The number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if both values are the same allocation, i.e. one is a clone of the other.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }
}

impl<O> Clone for Structured<O> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
        }
    }
}

// Names are unique, so equal lengths plus every field of `self` found in `other` is symmetric.
impl<O: PartialEq> PartialEq for Structured<O> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl<O: Eq> Eq for Structured<O> {}

impl<O> StrictEq for Structured<O> {
    fn strict_eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<O: Debug> Debug for Structured<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<O> Index<&str> for Structured<O> {
    type Output = O;

    #[track_caller]
    fn index(&self, name: &str) -> &O {
        match self.get(name) {
            Some(value) => value,
            None => panic!("no field named `{name}` in the structured value"),
        }
    }
}

fn field_ref<O>((name, value): &(Arc<str>, O)) -> (&str, &O) {
    (&**name, value)
}

impl<'a, O> IntoIterator for &'a Structured<O> {
    type Item = (&'a str, &'a O);
    type IntoIter = Map<slice::Iter<'a, (Arc<str>, O)>, fn(&'a (Arc<str>, O)) -> (&'a str, &'a O)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter().map(field_ref as fn(_) -> _)
    }
}

#[cfg(feature = "serde")]
impl<O: serde::Serialize> serde::Serialize for Structured<O> {
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// The synthesized result function of a structured selector: zips the field names with the
/// outputs of the field selectors.
#[derive(Debug, Clone)]
pub struct FieldZipper {
    names: Arc<[Arc<str>]>,
}

impl FieldZipper {
    /// The field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(|name| &**name)
    }
}

impl<O: Clone> Combiner<Vec<O>> for FieldZipper {
    type Output = Structured<O>;

    fn combine(&self, args: &Vec<O>) -> Structured<O> {
        Structured::new(self.names.iter().cloned().zip(args.iter().cloned()))
    }
}

/// A selector built by [`create_structured_selector`].
pub type StructuredSelector<S, P, T, E = StrictEquality, St = UnsyncStorage> = MemoSelector<
    S,
    P,
    Vec<T>,
    FieldZipper,
    Vec<<T as Selector<S, P>>::Output>,
    Structured<<T as Selector<S, P>>::Output>,
    E,
    St,
    Plain,
>;

impl<E: Clone, St: Storage> SelectorCreator<E, St> {
    /// Create a selector producing a [`Structured`] value with one field per `(name, selector)`
    /// pair. The fields keep their declaration order.
    ///
    /// Fails with [`ConfigError::NoInputSelectors`] if there are no fields and with
    /// [`ConfigError::DuplicateField`] if a name is used twice.
    #[track_caller]
    pub fn create_structured<S, P, K, T>(
        &self,
        fields: impl IntoIterator<Item = (K, T)>,
    ) -> ConfigResult<StructuredSelector<S, P, T, E, St>>
    where
        K: Into<Arc<str>>,
        T: Selector<S, P>,
        T::Output: Clone,
    {
        let mut seen = FxHashSet::default();
        let mut names = Vec::new();
        let mut selectors = Vec::new();

        for (name, selector) in fields {
            let name: Arc<str> = name.into();
            if !seen.insert(name.clone()) {
                tracing::debug!("Rejected a structured selector with a duplicate field `{name}`");
                return Err(ConfigError::DuplicateField(name.to_string()));
            }
            names.push(name);
            selectors.push(selector);
        }

        self.create_from_list(
            selectors,
            FieldZipper {
                names: names.into(),
            },
        )
    }
}

/// Create a selector producing a [`Structured`] value from named selectors sharing one output
/// type. Use [`boxed`](crate::boxed) to mix selectors of different types, or
/// [`structured_selector!`](crate::structured_selector) for fields of different output types.
///
/// ```rust
/// use reselect::{boxed, create_structured_selector, from_state, Selector, Structured};
///
/// struct Counter { value: i32 }
///
/// let doubled = from_state(|c: &Counter| c.value * 2);
/// let tripled = from_state(|c: &Counter| c.value * 3);
/// let both = create_structured_selector([("doubled", boxed(doubled)), ("tripled", boxed(tripled))])
///     .unwrap();
///
/// let counter = Counter { value: 2 };
/// assert_eq!(both.select(&counter, &()), Structured::new([("tripled", 6), ("doubled", 4)]));
/// ```
#[track_caller]
pub fn create_structured_selector<S, P, K, T>(
    fields: impl IntoIterator<Item = (K, T)>,
) -> ConfigResult<StructuredSelector<S, P, T>>
where
    K: Into<Arc<str>>,
    T: Selector<S, P>,
    T::Output: Clone,
{
    SelectorCreator::new().create_structured(fields)
}

/// Create a structured selector with a custom [`SelectorCreator`].
#[track_caller]
pub fn create_structured_selector_with<S, P, K, T, E: Clone, St: Storage>(
    creator: &SelectorCreator<E, St>,
    fields: impl IntoIterator<Item = (K, T)>,
) -> ConfigResult<StructuredSelector<S, P, T, E, St>>
where
    K: Into<Arc<str>>,
    T: Selector<S, P>,
    T::Output: Clone,
{
    creator.create_structured(fields)
}

/// Build a memoized selector assembling a caller-declared struct from named input selectors of
/// any output types. The struct is shared behind an [`Arc`], so its identity only changes when a
/// field changed.
///
/// ```rust
/// use reselect::{structured_selector, Selector};
///
/// struct Cart { items: Vec<(String, f64)> }
///
/// #[derive(Debug, PartialEq)]
/// struct Summary { count: usize, total: f64 }
///
/// let summary = structured_selector!(Summary {
///     count: |cart: &Cart| cart.items.len(),
///     total: |cart: &Cart| cart.items.iter().map(|(_, price)| price).sum::<f64>(),
/// });
///
/// let cart = Cart { items: vec![("tea".into(), 2.5), ("milk".into(), 1.0)] };
/// let first = summary.select(&cart, &());
/// assert_eq!(*first, Summary { count: 2, total: 3.5 });
/// assert!(std::sync::Arc::ptr_eq(&first, &summary.select(&cart, &())));
/// ```
///
/// A [`SelectorCreator`] can be given first: `structured_selector!(creator => Summary { .. })`.
#[macro_export]
macro_rules! structured_selector {
    ($ty:ident { $($field:ident : $selector:expr),+ $(,)? }) => {
        $crate::create_selector(
            ($($selector,)+),
            |$($field: &_),+| ::std::sync::Arc::new($ty {
                $($field: ::core::clone::Clone::clone($field)),+
            }),
        )
    };
    ($creator:expr => $ty:ident { $($field:ident : $selector:expr),+ $(,)? }) => {
        $creator.create(
            ($($selector,)+),
            |$($field: &_),+| ::std::sync::Arc::new($ty {
                $($field: ::core::clone::Clone::clone($field)),+
            }),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_declaration_order() {
        let a = Structured::new([("x", 1), ("y", 2)]);
        let b = Structured::new([("y", 2), ("x", 1)]);
        let c = Structured::new([("x", 1), ("y", 3)]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.keys().collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(b.keys().collect::<Vec<_>>(), ["y", "x"]);
    }

    #[test]
    fn strict_equality_is_identity() {
        let a = Structured::new([("x", 1)]);
        let same = a.clone();
        let copy = Structured::new([("x", 1)]);

        assert!(a.strict_eq(&same));
        assert!(!a.strict_eq(&copy));
    }

    #[test]
    fn repeated_names_keep_one_field() {
        let repeated = Structured::new([("x", 1), ("y", 2), ("x", 3)]);
        assert_eq!(repeated.len(), 2);
        assert_eq!(repeated.iter().collect::<Vec<_>>(), [("x", &3), ("y", &2)]);

        let doubled = Structured::new([("x", 1), ("x", 1)]);
        let wider = Structured::new([("x", 1), ("y", 2)]);
        assert_ne!(doubled, wider);
        assert_ne!(wider, doubled);
        assert_eq!(doubled, Structured::new([("x", 1)]));
        assert_eq!(Structured::new([("x", 1)]), doubled);
    }

    #[test]
    fn borrowed_iteration_matches_iter() {
        let value = Structured::new([("a", 1), ("b", 2)]);
        let mut seen = Vec::new();
        for (name, number) in &value {
            seen.push((name, *number));
        }
        assert_eq!(seen, [("a", 1), ("b", 2)]);
    }

    #[test]
    fn lookup_and_debug() {
        let value = Structured::new([("name", "tea"), ("size", "large")]);
        assert_eq!(value["size"], "large");
        assert_eq!(value.get("color"), None);
        assert!(value.contains("name"));
        assert_eq!(format!("{value:?}"), r#"{"name": "tea", "size": "large"}"#);
    }

    #[test]
    fn zipper_follows_field_order() {
        let zipper = FieldZipper {
            names: vec![Arc::from("b"), Arc::from("a")].into(),
        };
        let value = zipper.combine(&vec![2, 1]);
        assert_eq!(value.iter().collect::<Vec<_>>(), [("b", &2), ("a", &1)]);
        assert_eq!(zipper.names().collect::<Vec<_>>(), ["b", "a"]);
    }
}
