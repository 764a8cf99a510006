use super::ConfigError;

/// Describes possible Errors that may occur when calling methods in this crate
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The estimator could not be constructed from the given arguments.
    #[error(transparent)]
    ConfigError(#[from] ConfigError),

    /// The added value does not have the shape established by earlier values.
    #[error("illegal shape: expected {expected:?}, got {found:?}")]
    ShapeMismatch {
        /// The shape of the estimator, an empty list for scalars.
        expected: Vec<usize>,
        /// The shape of the rejected value.
        found: Vec<usize>,
    },

    /// The logarithm of zero, negative or NaN values is undefined.
    #[error("unable to add non-positive values")]
    NonPositiveValue,

    /// Only confidence intervals of order 1 are available.
    #[error("confidence interval of order {0} is not supported, only order 1 is")]
    UnsupportedOrder(u32),
}

/// Shorthand for a `Result` with the crate `Error`.
pub type Result<T, E = Error> = std::result::Result<T, E>;
