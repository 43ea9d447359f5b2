/// An error building a selector. Reported when the selector is created, never when it is called.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The selector was given no input selectors, so the result function has nothing to derive from.
    #[error("a selector needs at least one input selector")]
    NoInputSelectors,

    /// Two fields of a structured selector share the same name.
    #[error("the field `{0}` is declared more than once in the structured selector")]
    DuplicateField(String),
}

/// A result type for building selectors.
pub type ConfigResult<T> = Result<T, ConfigError>;
