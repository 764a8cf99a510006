/// An error with the arguments an estimator is constructed from.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ConfigError {
    /// A prior aggregate must describe at least one observation.
    #[error("The sample count of a prior must be > 0")]
    ZeroPriorCount,

    /// The prior mean and the prior variance disagree in shape.
    #[error("The prior value has shape {value:?} but the prior variance has shape {var:?}")]
    PriorShapeMismatch {
        /// Shape of the prior mean.
        value: Vec<usize>,
        /// Shape of the prior variance.
        var: Vec<usize>,
    },

    /// An explicitly requested shape disagrees with the shape of the prior.
    #[error("The requested shape {requested:?} does not match the prior shape {prior:?}")]
    ExplicitShapeMismatch {
        /// The shape passed to the constructor.
        requested: Vec<usize>,
        /// The shape of the prior mean and variance.
        prior: Vec<usize>,
    },

    /// A variance cannot be negative.
    #[error("The prior variance must be >= 0 in every element")]
    NegativePriorVariance,

    /// A geometric mean can only be resumed from a strictly positive mean.
    #[error("The prior geometric mean must be > 0 in every element")]
    NonPositivePriorValue,
}
