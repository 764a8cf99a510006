#![deny(missing_docs, rustdoc::missing_crate_level_docs, unused_imports)]
#![warn(clippy::all)]
#![doc = include_str!("../README.md")]

//! online-means - one-pass estimators of arithmetic and geometric means

// Dev-dependencies used only by integration tests and benchmarks.
#[cfg(test)]
use criterion as _;
#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rand as _;

mod accumulator;
pub mod consume;
mod errors;
mod estimators;
mod types;
mod utils;

/// Exports common types
pub mod prelude {
    pub use crate::{
        consume::{consume, geometric_mean_of, mean_of},
        errors::{ConfigError, Error, Result},
        estimators::{ArithmeticMeanEstimator, GeometricMeanEstimator, OnlineEstimator},
        types::{Checkpoint, DType, Element, IntoObservation, Prior, Value},
    };
}
