use std::fmt;

use ndarray::ArrayD;
use tracing::debug;

use super::OnlineEstimator;
use crate::{
    accumulator::Accumulator,
    errors::{ConfigError, Error, Result},
    types::{Checkpoint, Element, IntoObservation, Prior, Value},
};

const NAME: &str = "GeometricMeanEstimator";

/// Online estimator of the sample geometric mean and the corresponding sample variance.
///
/// Besides the sample count `N`, only two values (scalars or arrays) are remembered:
/// the sum of the logarithms of all added values `gamma`
/// and the sum of the squared logarithms `gamma2`. From these:
///
/// `mean = exp(gamma / N)`
///
/// `var = exp(2 gamma / N) (gamma2 / (N - 1) - gamma^2 / (N (N - 1)))`
///
/// The variance formula is numerically unstable and may produce small negative values,
/// which are reported as zero. Even after a million samples the error stays around `1e-10`.
///
/// Only strictly positive values can be added.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricMeanEstimator<T = f64> {
    acc: Accumulator<T>,
}

impl<T: Element> Default for GeometricMeanEstimator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> GeometricMeanEstimator<T> {
    /// Create an empty estimator, the shape is taken from the first added value.
    pub fn new() -> Self {
        Self {
            acc: Accumulator::new(),
        }
    }

    /// Create an empty estimator that only accepts values of `shape`.
    /// An empty `shape` means scalars.
    pub fn with_shape(shape: &[usize]) -> Self {
        Self {
            acc: Accumulator::with_shape(shape),
        }
    }

    /// Continue a previously stopped calculation from its count, geometric mean and variance.
    pub fn resume(prior: Prior<T>) -> Result<Self> {
        Self::resume_inner(None, prior)
    }

    /// Like `resume`, but also checks that the prior has the expected `shape`.
    pub fn resume_with_shape(shape: &[usize], prior: Prior<T>) -> Result<Self> {
        Self::resume_inner(Some(shape), prior)
    }

    fn resume_inner(shape: Option<&[usize]>, prior: Prior<T>) -> Result<Self> {
        let (count, value, var) = prior.into_checked_parts(shape)?;
        if !all_positive(&value) {
            return Err(ConfigError::NonPositivePriorValue.into());
        }
        debug!("resuming {NAME} with count {count}, shape {:?}", value.shape());

        let n = T::from_count(count);
        let two = T::one() + T::one();
        let sum = value.mapv(T::ln) * n;
        let scale = (&sum * (two / n)).mapv(T::exp);
        let sum_sq = var * (n - T::one()) / scale + &sum * &sum / n;

        Ok(Self {
            acc: Accumulator::from_sums(count, sum, sum_sq),
        })
    }

    /// Recreate an estimator from a `Checkpoint`.
    pub fn from_checkpoint(checkpoint: Checkpoint<T>) -> Result<Self> {
        match checkpoint {
            Checkpoint::Fresh { shape: None } => Ok(Self::new()),
            Checkpoint::Fresh { shape: Some(shape) } => Ok(Self::with_shape(&shape)),
            Checkpoint::Resume(prior) => Self::resume(prior),
        }
    }

    /// The constructor arguments that recreate the current state.
    pub fn checkpoint(&self) -> Checkpoint<T> {
        match (self.mean(), self.variance()) {
            (Some(value), Some(var)) => Checkpoint::Resume(
                Prior::builder()
                    .count(self.count())
                    .value(value)
                    .var(var)
                    .build(),
            ),
            _ => Checkpoint::Fresh {
                shape: self.shape().map(<[usize]>::to_vec),
            },
        }
    }

    /// A complete textual representation in terms of constructor arguments.
    pub fn repr(&self) -> String {
        self.checkpoint().describe(NAME)
    }
}

/// `false` if any element is zero, negative or NaN.
#[inline]
fn all_positive<T: Element>(values: &ArrayD<T>) -> bool {
    values.iter().all(|v| *v > T::zero())
}

impl<T: Element> OnlineEstimator<T> for GeometricMeanEstimator<T> {
    fn add<V: IntoObservation<T>>(&mut self, value: V) -> Result<()> {
        let obs = value.into_observation();
        if !all_positive(&obs) {
            return Err(Error::NonPositiveValue);
        }
        self.acc.push(obs.mapv(T::ln))
    }

    #[inline(always)]
    fn count(&self) -> u64 {
        self.acc.count()
    }

    #[inline(always)]
    fn shape(&self) -> Option<&[usize]> {
        self.acc.shape()
    }

    fn mean(&self) -> Option<Value<T>> {
        let (sum, _) = self.acc.sums()?;
        Some(Value::from_array((sum / self.acc.n()).mapv(T::exp)))
    }

    fn variance(&self) -> Option<Value<T>> {
        let (sum, _) = self.acc.sums()?;
        let spread = self.acc.spread()?;
        if self.count() == 1 {
            return Some(Value::from_array(spread));
        }
        let two = T::one() + T::one();
        let scale = (sum * (two / self.acc.n())).mapv(T::exp);
        let mut var = scale * spread;
        var.mapv_inplace(|v| if v < T::zero() { T::zero() } else { v });
        Some(Value::from_array(var))
    }

    /// The sample standard deviation divided by `sqrt(N - 1)`.
    ///
    /// A single observation carries no information about the spread, its standard error is zero.
    fn stderr(&self) -> Option<Value<T>> {
        let std_dev = self.std_dev()?;
        if self.count() == 1 {
            return Some(std_dev);
        }
        let scale = (self.acc.n() - T::one()).sqrt();
        Some(std_dev.mapv(|v| v / scale))
    }
}

impl<T: Element> fmt::Display for GeometricMeanEstimator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.acc.summarize(f, NAME)
    }
}
