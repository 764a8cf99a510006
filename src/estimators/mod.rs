//! The online mean estimators and the trait they share.

mod arithmetic_mean;
mod estimator_trait;
mod geometric_mean;

pub use arithmetic_mean::ArithmeticMeanEstimator;
pub use estimator_trait::OnlineEstimator;
pub use geometric_mean::GeometricMeanEstimator;
