use crate::{
    errors::{Error, Result},
    types::{DType, Element, IntoObservation, Value},
};

/// Something that estimates a mean and its uncertainty from a stream of observations,
/// one observation at a time and without storing them.
///
/// Every derived quantity is `None` as long as no observation has been added.
/// Scalar observations yield `Value::Scalar`, array observations `Value::Array`.
pub trait OnlineEstimator<T: Element> {
    /// Add an observation.
    /// It must have the same shape as all observations added before it.
    /// A rejected observation leaves the estimator unchanged.
    fn add<V: IntoObservation<T>>(&mut self, value: V) -> Result<()>;

    /// The number of observations added so far, including those of a resumed prior.
    fn count(&self) -> u64;

    /// The shape of the observations, empty for scalars and `None` until it is known.
    fn shape(&self) -> Option<&[usize]>;

    /// The element type the estimator accumulates in.
    #[inline]
    fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// The number of elements of each observation.
    #[inline]
    fn size(&self) -> Option<usize> {
        self.shape().map(|shape| shape.iter().product())
    }

    /// The number of dimensions of each observation.
    #[inline]
    fn ndim(&self) -> Option<usize> {
        self.shape().map(<[usize]>::len)
    }

    /// The estimated mean.
    fn mean(&self) -> Option<Value<T>>;

    /// The sample variance, zero after a single observation.
    fn variance(&self) -> Option<Value<T>>;

    /// The sample standard deviation, the square root of the sample variance.
    fn std_dev(&self) -> Option<Value<T>> {
        self.variance().map(|var| var.mapv(T::sqrt))
    }

    /// The standard error of the mean.
    fn stderr(&self) -> Option<Value<T>>;

    /// Alias of `stderr`, the standard error of the mean.
    #[inline]
    fn sem(&self) -> Option<Value<T>> {
        self.stderr()
    }

    /// The mean together with its standard error.
    fn mean_stderr_pair(&self) -> Option<(Value<T>, Value<T>)> {
        Some((self.mean()?, self.stderr()?))
    }

    /// The lower and upper half widths of the confidence interval of the given `order`,
    /// relative to the mean, so the interval is `[mean - lower, mean + upper]`.
    ///
    /// Only order 1 is supported, for which both half widths are one standard error.
    fn confidence_interval(&self, order: u32) -> Result<Option<(Value<T>, Value<T>)>> {
        if order != 1 {
            return Err(Error::UnsupportedOrder(order));
        }
        Ok(self.stderr().map(|stderr| (stderr.clone(), stderr)))
    }
}
