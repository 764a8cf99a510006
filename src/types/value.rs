use std::fmt;

use ndarray::{ArrayD, arr0};
use serde::{Deserialize, Serialize};

use super::Element;

/// A derived quantity of an estimator.
///
/// Estimators fed with scalars report plain numbers,
/// estimators fed with arrays report arrays of the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value<T> {
    /// The result for scalar observations.
    Scalar(T),
    /// The elementwise result for array observations.
    Array(ArrayD<T>),
}

impl<T: Element> Value<T> {
    /// Wrap an array, collapsing zero-dimensional arrays into a `Scalar`.
    pub(crate) fn from_array(array: ArrayD<T>) -> Self {
        if array.ndim() == 0 {
            if let Some(&v) = array.first() {
                return Self::Scalar(v);
            }
        }
        Self::Array(array)
    }

    /// The plain number, if this is a scalar result.
    #[inline]
    pub fn as_scalar(&self) -> Option<T> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Array(_) => None,
        }
    }

    /// The array, if this is an array result.
    #[inline]
    pub fn as_array(&self) -> Option<&ArrayD<T>> {
        match self {
            Self::Scalar(_) => None,
            Self::Array(a) => Some(a),
        }
    }

    /// Convert into an array, scalars become zero-dimensional arrays.
    pub fn into_array(self) -> ArrayD<T> {
        match self {
            Self::Scalar(v) => arr0(v).into_dyn(),
            Self::Array(a) => a,
        }
    }

    /// The shape of the result, empty for scalars.
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Scalar(_) => &[],
            Self::Array(a) => a.shape(),
        }
    }

    /// `true` if any element is NaN.
    pub fn has_nan(&self) -> bool {
        match self {
            Self::Scalar(v) => v.is_nan(),
            Self::Array(a) => a.iter().any(|v| v.is_nan()),
        }
    }

    /// Apply `f` to every element.
    pub fn mapv<F>(self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        match self {
            Self::Scalar(v) => Self::Scalar(f(v)),
            Self::Array(mut a) => {
                a.mapv_inplace(f);
                Self::Array(a)
            }
        }
    }
}

impl From<f64> for Value<f64> {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<f32> for Value<f32> {
    fn from(value: f32) -> Self {
        Self::Scalar(value)
    }
}

impl<T: Element> From<ArrayD<T>> for Value<T> {
    fn from(value: ArrayD<T>) -> Self {
        Self::from_array(value)
    }
}

impl<T: Element> fmt::Display for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Array(a) => write!(f, "{a}"),
        }
    }
}
