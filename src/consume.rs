//! Drive an estimator over every value of an iterator.
//!
//! This only makes sense when the values are loaded or generated on the fly,
//! for data that is already in memory a batch computation is simpler.

use tracing::debug;

use crate::{
    errors::Result,
    estimators::{ArithmeticMeanEstimator, GeometricMeanEstimator, OnlineEstimator},
    types::{Element, IntoObservation, Value},
};

/// Add every item of `values` to `estimator`, stopping at the first rejected item.
pub fn consume<T, E, I>(estimator: &mut E, values: I) -> Result<()>
where
    T: Element,
    E: OnlineEstimator<T>,
    I: IntoIterator,
    I::Item: IntoObservation<T>,
{
    for value in values {
        estimator.add(value)?;
    }
    debug!("consumed values, count is now {}", estimator.count());
    Ok(())
}

/// The arithmetic mean of all items and its standard error,
/// `None` if the iterator is empty.
pub fn mean_of<T, I>(values: I) -> Result<Option<(Value<T>, Value<T>)>>
where
    T: Element,
    I: IntoIterator,
    I::Item: IntoObservation<T>,
{
    let mut estimator = ArithmeticMeanEstimator::new();
    consume(&mut estimator, values)?;
    Ok(estimator.mean_stderr_pair())
}

/// The geometric mean of all items and its standard error,
/// `None` if the iterator is empty.
pub fn geometric_mean_of<T, I>(values: I) -> Result<Option<(Value<T>, Value<T>)>>
where
    T: Element,
    I: IntoIterator,
    I::Item: IntoObservation<T>,
{
    let mut estimator = GeometricMeanEstimator::new();
    consume(&mut estimator, values)?;
    Ok(estimator.mean_stderr_pair())
}
