use thiserror::Error;

/// A result with the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// An error raised while composing selectors.
///
/// Combiners and dependency selectors never produce this type. Their panics
/// propagate to the caller untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A composition was requested without any selector.
    #[error("reselect: expecting at least one selector")]
    NoSelectors,
}
