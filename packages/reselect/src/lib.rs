#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![allow(clippy::type_complexity)]

mod storage;
pub use storage::*;

pub mod equality;
pub use equality::{Equality, EqualityFn, StrictEq, StrictEquality, ValueEquality};

mod args;
pub use args::*;

mod combiner;
pub use combiner::*;

mod memoize;
pub use memoize::*;

mod selector;
pub use selector::*;

mod inputs;
pub use inputs::*;

mod memo_selector;
pub use memo_selector::*;

mod creator;
pub use creator::*;

mod structured;
pub use structured::*;

mod error;
pub use error::*;

/// The traits and constructors most selector code needs.
pub mod prelude {
    pub use crate::{
        boxed, create_selector, create_selector_from_list, create_structured_selector,
        create_try_selector, from_fn, from_state, memoize, structured_selector, ConfigError,
        Selector, SelectorCreator, StrictEquality, Structured, ValueEquality,
    };
}
