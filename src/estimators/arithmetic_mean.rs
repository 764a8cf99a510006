use std::fmt;

use ndarray::ArrayD;
use tracing::debug;

use super::OnlineEstimator;
use crate::{
    accumulator::Accumulator,
    errors::Result,
    types::{Checkpoint, Element, IntoObservation, Prior, Value},
};

const NAME: &str = "ArithmeticMeanEstimator";

/// Online estimator of the sample arithmetic mean and the corresponding sample variance.
///
/// Besides the sample count `N`, only two values (scalars or arrays) are remembered:
/// the sum of all added values `sigma` and the sum of all squared values `sigma2`.
/// From these:
///
/// `mean = sigma / N`
///
/// `var = sigma2 / (N - 1) - sigma^2 / (N (N - 1))`
///
/// ```
/// use online_means::prelude::*;
///
/// let mut estimator = ArithmeticMeanEstimator::<f64>::new();
/// for v in [1.0, 2.0, 3.0] {
///     estimator.add(v)?;
/// }
/// assert_eq!(estimator.mean(), Some(Value::Scalar(2.0)));
/// assert_eq!(estimator.variance(), Some(Value::Scalar(1.0)));
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticMeanEstimator<T = f64> {
    acc: Accumulator<T>,
}

impl<T: Element> Default for ArithmeticMeanEstimator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> ArithmeticMeanEstimator<T> {
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

    /// Continue a previously stopped calculation from its count, mean and variance.
    pub fn resume(prior: Prior<T>) -> Result<Self> {
        Self::resume_inner(None, prior)
    }

    /// Like `resume`, but also checks that the prior has the expected `shape`.
    pub fn resume_with_shape(shape: &[usize], prior: Prior<T>) -> Result<Self> {
        Self::resume_inner(Some(shape), prior)
    }

    fn resume_inner(shape: Option<&[usize]>, prior: Prior<T>) -> Result<Self> {
        let (count, value, var) = prior.into_checked_parts(shape)?;
        debug!("resuming {NAME} with count {count}, shape {:?}", value.shape());

        let n = T::from_count(count);
        let sum = value * n;
        let sum_sq = var * (n - T::one()) + &sum * &sum / n;

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

impl<T: Element> OnlineEstimator<T> for ArithmeticMeanEstimator<T> {
    #[inline]
    fn add<V: IntoObservation<T>>(&mut self, value: V) -> Result<()> {
        self.acc.push(value.into_observation())
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
        Some(Value::from_array(sum / self.acc.n()))
    }

    /// The sample variance.
    ///
    /// The sum formula can produce small negative values from rounding when all
    /// observations are (nearly) identical, these are reported as zero.
    fn variance(&self) -> Option<Value<T>> {
        self.acc.spread().map(|var| Value::from_array(clamp_negative(var)))
    }

    /// The sample standard deviation divided by `sqrt(N)`, clamped like `variance`.
    fn stderr(&self) -> Option<Value<T>> {
        let n = self.acc.n();
        self.acc
            .spread()
            .map(|var| Value::from_array(clamp_negative(var).mapv(|v| (v / n).sqrt())))
    }
}

/// Rounding can push a variance of (nearly) identical values slightly below zero.
fn clamp_negative<T: Element>(mut var: ArrayD<T>) -> ArrayD<T> {
    var.mapv_inplace(|v| if v < T::zero() { T::zero() } else { v });
    var
}

impl<T: Element> fmt::Display for ArithmeticMeanEstimator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.acc.summarize(f, NAME)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use test_case::test_matrix;

    use super::*;
    use crate::{
        errors::{ConfigError, Error},
        utils::tests::round,
    };

    fn scalar(v: Option<Value<f64>>) -> f64 {
        v.and_then(|v| v.as_scalar()).expect("a scalar result")
    }

    #[test]
    fn arithmetic_mean_empty_is_unavailable() {
        let est = ArithmeticMeanEstimator::<f64>::new();
        assert_eq!(est.count(), 0);
        assert!(est.shape().is_none());
        assert!(est.size().is_none());
        assert!(est.ndim().is_none());
        assert!(est.mean().is_none());
        assert!(est.variance().is_none());
        assert!(est.std_dev().is_none());
        assert!(est.stderr().is_none());
        assert!(est.mean_stderr_pair().is_none());
        assert_eq!(est.confidence_interval(1), Ok(None));
    }

    #[test]
    fn arithmetic_mean_one_two_three() {
        let mut est = ArithmeticMeanEstimator::<f64>::new();
        for v in [1.0, 2.0, 3.0] {
            est.add(v).unwrap();
        }
        assert_eq!(est.count(), 3);
        assert_eq!(scalar(est.mean()), 2.0);
        assert_eq!(scalar(est.variance()), 1.0);
        assert_eq!(scalar(est.std_dev()), 1.0);
        assert_eq!(round(scalar(est.stderr()), 3), 0.577);
        assert!((scalar(est.stderr()) - (1.0_f64 / 3.0).sqrt()).abs() < 1e-12);

        let (mean, stderr) = est.mean_stderr_pair().unwrap();
        assert_eq!(mean, Value::Scalar(2.0));
        assert_eq!(Some(stderr.clone()), est.stderr());
        assert_eq!(est.sem(), est.stderr());

        let (lower, upper) = est.confidence_interval(1).unwrap().unwrap();
        assert_eq!(lower, stderr);
        assert_eq!(upper, stderr);
    }

    #[test_matrix(
        [-3.5, 0.0, 1.0, 1e9]
    )]
    fn arithmetic_mean_single_sample(v: f64) {
        let mut est = ArithmeticMeanEstimator::<f64>::new();
        est.add(v).unwrap();
        assert_eq!(est.mean(), Some(Value::Scalar(v)));
        assert_eq!(est.variance(), Some(Value::Scalar(0.0)));
        assert_eq!(est.stderr(), Some(Value::Scalar(0.0)));
    }

    #[test]
    fn arithmetic_mean_arrays() {
        let mut est = ArithmeticMeanEstimator::<f64>::new();
        est.add(array![[1.0, 10.0], [2.0, 0.0]]).unwrap();
        est.add(array![[3.0, 10.0], [4.0, 0.0]]).unwrap();

        assert_eq!(est.shape(), Some(&[2, 2][..]));
        assert_eq!(est.size(), Some(4));
        assert_eq!(est.ndim(), Some(2));
        assert_eq!(
            est.mean().unwrap().into_array(),
            array![[2.0, 10.0], [3.0, 0.0]].into_dyn()
        );
        assert_eq!(
            est.variance().unwrap().into_array(),
            array![[2.0, 0.0], [2.0, 0.0]].into_dyn()
        );
    }

    #[test]
    fn arithmetic_mean_single_array_sample_has_zero_variance() {
        let mut est = ArithmeticMeanEstimator::<f64>::new();
        est.add(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(est.variance().unwrap().into_array(), array![0.0, 0.0, 0.0].into_dyn());
    }

    #[test]
    fn arithmetic_mean_shape_mismatch() {
        let mut est = ArithmeticMeanEstimator::<f64>::new();
        est.add(array![1.0, 2.0]).unwrap();
        let before = est.clone();

        assert_eq!(
            est.add(1.0),
            Err(Error::ShapeMismatch {
                expected: vec![2],
                found: vec![],
            })
        );
        assert_eq!(
            est.add(Array2::<f64>::zeros((2, 1))),
            Err(Error::ShapeMismatch {
                expected: vec![2],
                found: vec![2, 1],
            })
        );
        assert_eq!(est, before);
        assert_eq!(est.count(), 1);

        let mut est = ArithmeticMeanEstimator::<f64>::new();
        est.add(1.0).unwrap();
        assert!(matches!(est.add(vec![1.0]), Err(Error::ShapeMismatch { .. })));
        assert_eq!(est.count(), 1);
    }

    #[test]
    fn arithmetic_mean_with_shape() {
        let mut est = ArithmeticMeanEstimator::<f64>::with_shape(&[3]);
        assert_eq!(est.shape(), Some(&[3][..]));
        assert_eq!(est.size(), Some(3));
        assert!(est.mean().is_none());
        assert!(est.add(1.0).is_err());
        est.add(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(est.count(), 1);

        let scalar_only = ArithmeticMeanEstimator::<f64>::with_shape(&[]);
        assert_eq!(scalar_only.size(), Some(1));
        assert_eq!(scalar_only.ndim(), Some(0));
    }

    #[test]
    fn arithmetic_mean_resume() {
        let mut est = ArithmeticMeanEstimator::<f64>::resume(Prior::scalar(3, 2.0, 1.0)).unwrap();
        assert_eq!(est.count(), 3);
        assert_eq!(scalar(est.mean()), 2.0);
        assert_eq!(scalar(est.variance()), 1.0);

        est.add(6.0).unwrap();
        let mut full = ArithmeticMeanEstimator::<f64>::new();
        for v in [1.0, 2.0, 3.0, 6.0] {
            full.add(v).unwrap();
        }
        assert_eq!(est.mean(), full.mean());
        assert!((scalar(est.variance()) - scalar(full.variance())).abs() < 1e-12);
    }

    #[test]
    fn arithmetic_mean_resume_errors() {
        assert_eq!(
            ArithmeticMeanEstimator::<f64>::resume(Prior::scalar(0, 2.0, 1.0)),
            Err(Error::ConfigError(ConfigError::ZeroPriorCount))
        );
        assert_eq!(
            ArithmeticMeanEstimator::<f64>::resume_with_shape(&[2], Prior::scalar(3, 2.0, 1.0)),
            Err(Error::ConfigError(ConfigError::ExplicitShapeMismatch {
                requested: vec![2],
                prior: vec![],
            }))
        );
        assert_eq!(
            ArithmeticMeanEstimator::<f64>::resume(Prior::scalar(3, 2.0, -1.0)),
            Err(Error::ConfigError(ConfigError::NegativePriorVariance))
        );
    }

    #[test]
    fn arithmetic_mean_resume_reproduces_prior_exactly() {
        let est = ArithmeticMeanEstimator::<f64>::resume(Prior::scalar(4, 2.5, 0.75)).unwrap();
        assert_eq!(est.mean(), Some(Value::Scalar(2.5)));
        assert_eq!(est.variance(), Some(Value::Scalar(0.75)));
    }

    #[test]
    fn arithmetic_mean_unsupported_order() {
        let mut est = ArithmeticMeanEstimator::<f64>::new();
        est.add(1.0).unwrap();
        assert_eq!(est.confidence_interval(2), Err(Error::UnsupportedOrder(2)));
        assert_eq!(est.confidence_interval(0), Err(Error::UnsupportedOrder(0)));
    }

    #[test]
    fn arithmetic_mean_constant_values_never_negative() {
        let mut est = ArithmeticMeanEstimator::<f64>::new();
        for _ in 0..1000 {
            est.add(0.1).unwrap();
        }
        assert!(scalar(est.variance()) >= 0.0);
        assert!(!est.stderr().unwrap().has_nan());
    }

    #[test]
    fn arithmetic_mean_display() {
        let mut est = ArithmeticMeanEstimator::<f64>::new();
        assert_eq!(
            est.to_string(),
            "<ArithmeticMeanEstimator instance with 0 values (shape=None, dtype=f64)>"
        );
        est.add(1.0).unwrap();
        assert_eq!(
            est.to_string(),
            "<ArithmeticMeanEstimator instance with 1 value (shape=[], dtype=f64)>"
        );
        let est = ArithmeticMeanEstimator::<f32>::with_shape(&[4]);
        assert_eq!(
            est.to_string(),
            "<ArithmeticMeanEstimator instance with 0 values (shape=[4], dtype=f32)>"
        );
    }

    #[test]
    fn arithmetic_mean_repr() {
        let mut est = ArithmeticMeanEstimator::<f64>::new();
        assert_eq!(est.repr(), "ArithmeticMeanEstimator(dtype=f64)");
        for v in [1.0, 2.0, 3.0] {
            est.add(v).unwrap();
        }
        assert_eq!(
            est.repr(),
            "ArithmeticMeanEstimator(shape=[], dtype=f64, init_count=3, init_value=2, init_var=1)"
        );
    }

    #[test]
    fn arithmetic_mean_checkpoint_round_trip() {
        let fresh = ArithmeticMeanEstimator::<f64>::with_shape(&[2]);
        assert_eq!(
            fresh.checkpoint(),
            Checkpoint::Fresh {
                shape: Some(vec![2]),
            }
        );
        assert_eq!(
            ArithmeticMeanEstimator::from_checkpoint(fresh.checkpoint()).unwrap(),
            fresh
        );

        let mut est = ArithmeticMeanEstimator::<f64>::new();
        est.add(array![1.0, 4.0]).unwrap();
        est.add(array![3.0, 8.0]).unwrap();
        let checkpoint = est.checkpoint();
        assert_eq!(checkpoint.count(), 2);
        let resumed = ArithmeticMeanEstimator::from_checkpoint(checkpoint.clone()).unwrap();
        assert_eq!(resumed.checkpoint(), checkpoint);
    }

    #[test]
    fn arithmetic_mean_f32() {
        let mut est = ArithmeticMeanEstimator::<f32>::new();
        est.add(1.0_f32).unwrap();
        est.add(3.0_f32).unwrap();
        assert_eq!(est.dtype(), crate::types::DType::F32);
        assert_eq!(est.mean(), Some(Value::Scalar(2.0_f32)));
        assert_eq!(est.variance(), Some(Value::Scalar(2.0_f32)));
    }
}
