use getset::{CopyGetters, Getters};
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::{Element, Value};
use crate::errors::ConfigError;

/// The aggregate of a previously halted calculation.
///
/// An estimator resumed from a `Prior` behaves as if it had seen the original
/// `count` observations itself. All three parts are mandatory,
/// the builder does not compile unless each one is set.
///
/// ```
/// use online_means::prelude::*;
///
/// let prior = Prior::<f64>::builder().count(3).value(2.0).var(1.0).build();
/// assert_eq!(prior, Prior::scalar(3, 2.0, 1.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder, Getters, CopyGetters)]
pub struct Prior<T> {
    /// The sample count of the old calculation.
    #[getset(get_copy = "pub")]
    count: u64,

    /// The sample mean of the old calculation.
    #[builder(setter(into))]
    #[getset(get = "pub")]
    value: Value<T>,

    /// The sample variance of the old calculation.
    #[builder(setter(into))]
    #[getset(get = "pub")]
    var: Value<T>,
}

impl<T: Element> Prior<T> {
    /// A prior for scalar observations.
    pub fn scalar(count: u64, value: T, var: T) -> Self {
        Self {
            count,
            value: Value::Scalar(value),
            var: Value::Scalar(var),
        }
    }

    /// A prior for array observations, the arrays must have the same shape.
    pub fn array(count: u64, value: ArrayD<T>, var: ArrayD<T>) -> Self {
        Self {
            count,
            value: Value::from_array(value),
            var: Value::from_array(var),
        }
    }

    /// The shape of the observations the prior was accumulated from.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    /// Check the prior for consistency and split it into count, mean and variance arrays.
    ///
    /// `requested` is an explicitly given estimator shape which must agree with the prior.
    pub(crate) fn into_checked_parts(
        self,
        requested: Option<&[usize]>,
    ) -> Result<(u64, ArrayD<T>, ArrayD<T>), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::ZeroPriorCount);
        }
        if self.value.shape() != self.var.shape() {
            return Err(ConfigError::PriorShapeMismatch {
                value: self.value.shape().to_vec(),
                var: self.var.shape().to_vec(),
            });
        }
        if let Some(requested) = requested {
            if requested != self.value.shape() {
                return Err(ConfigError::ExplicitShapeMismatch {
                    requested: requested.to_vec(),
                    prior: self.value.shape().to_vec(),
                });
            }
        }
        let var = self.var.into_array();
        if var.iter().any(|v| *v < T::zero()) {
            return Err(ConfigError::NegativePriorVariance);
        }
        Ok((self.count, self.value.into_array(), var))
    }
}
