use std::fmt;

use getset::CopyGetters;
use ndarray::{ArrayD, IxDyn};
use tracing::{debug, trace};

use crate::{
    errors::{Error, Result},
    types::Element,
};

/// Whether the shape of the observations is known yet.
///
/// The transition `Unconfigured -> Configured` happens exactly once,
/// either at construction or on the first added observation.
#[derive(Debug, Clone, PartialEq)]
enum State<T> {
    Unconfigured,
    Configured {
        /// Running sum of the (transformed) observations.
        sum: ArrayD<T>,
        /// Running sum of the squared (transformed) observations.
        sum_sq: ArrayD<T>,
    },
}

/// Sample count and the two running sums both estimators are built on.
///
/// The geometric estimator feeds logarithms, the arithmetic one raw values.
#[derive(Debug, Clone, PartialEq, CopyGetters)]
pub(crate) struct Accumulator<T> {
    /// The number of observations added so far.
    #[getset(get_copy = "pub(crate)")]
    count: u64,
    state: State<T>,
}

impl<T: Element> Accumulator<T> {
    /// No shape, no observations.
    pub(crate) fn new() -> Self {
        Self {
            count: 0,
            state: State::Unconfigured,
        }
    }

    /// A fixed shape but no observations, the sums start at zero.
    pub(crate) fn with_shape(shape: &[usize]) -> Self {
        Self {
            count: 0,
            state: State::Configured {
                sum: ArrayD::zeros(IxDyn(shape)),
                sum_sq: ArrayD::zeros(IxDyn(shape)),
            },
        }
    }

    /// Continue from sums reconstructed out of a prior aggregate.
    pub(crate) fn from_sums(count: u64, sum: ArrayD<T>, sum_sq: ArrayD<T>) -> Self {
        assert2::debug_assert!(count > 0);
        assert2::debug_assert!(sum.shape() == sum_sq.shape());
        Self {
            count,
            state: State::Configured { sum, sum_sq },
        }
    }

    /// The shape of the observations, an empty slice for scalars.
    #[inline]
    pub(crate) fn shape(&self) -> Option<&[usize]> {
        match &self.state {
            State::Unconfigured => None,
            State::Configured { sum, .. } => Some(sum.shape()),
        }
    }

    /// Fails if `obs` does not have the established shape.
    pub(crate) fn check_shape(&self, obs: &ArrayD<T>) -> Result<()> {
        match self.shape() {
            Some(shape) if shape != obs.shape() => Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                found: obs.shape().to_vec(),
            }),
            _ => Ok(()),
        }
    }

    /// Add an already transformed observation.
    /// The shape is checked before anything is mutated.
    pub(crate) fn push(&mut self, obs: ArrayD<T>) -> Result<()> {
        self.check_shape(&obs)?;

        let sq = obs.mapv(|v| v * v);
        match &mut self.state {
            State::Unconfigured => {
                debug!("establishing shape {:?}", obs.shape());
                self.state = State::Configured {
                    sum: obs,
                    sum_sq: sq,
                };
            }
            State::Configured { sum, sum_sq } => {
                *sum += &obs;
                *sum_sq += &sq;
            }
        }
        self.count += 1;
        trace!("push: count: {}", self.count);
        Ok(())
    }

    /// The running sums, `None` until at least one observation was seen.
    #[inline]
    pub(crate) fn sums(&self) -> Option<(&ArrayD<T>, &ArrayD<T>)> {
        match &self.state {
            State::Configured { sum, sum_sq } if self.count > 0 => Some((sum, sum_sq)),
            _ => None,
        }
    }

    /// The sample count as element type.
    #[inline]
    pub(crate) fn n(&self) -> T {
        T::from_count(self.count)
    }

    /// `sum_sq / (N - 1) - sum^2 / (N (N - 1))`, the unbiased sample variance of
    /// whatever was accumulated. Zero for a single observation.
    pub(crate) fn spread(&self) -> Option<ArrayD<T>> {
        let (sum, sum_sq) = self.sums()?;
        if self.count == 1 {
            return Some(ArrayD::zeros(sum.raw_dim()));
        }
        let n = self.n();
        let m = n - T::one();
        let sq = sum * sum;
        Some(sum_sq / m - sq / (n * m))
    }

    /// Compact summary, e.g. `<Name instance with 3 values (shape=[2], dtype=f64)>`.
    pub(crate) fn summarize(&self, f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
        let plural = if self.count == 1 { "" } else { "s" };
        write!(
            f,
            "<{name} instance with {} value{plural} (shape={}, dtype={})>",
            self.count,
            crate::utils::fmt_shape(self.shape()),
            T::DTYPE,
        )
    }
}
