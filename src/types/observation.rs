use ndarray::{Array1, ArrayBase, ArrayD, Data, Dimension, arr0};

use super::{Element, Value};

/// Anything that can be added to an estimator as one observation.
///
/// Scalars become zero-dimensional arrays, so every observation is handled
/// by the same elementwise arithmetic and a scalar is just the empty shape.
pub trait IntoObservation<T> {
    /// Convert into a dynamically shaped array.
    fn into_observation(self) -> ArrayD<T>;
}

impl IntoObservation<f64> for f64 {
    #[inline]
    fn into_observation(self) -> ArrayD<f64> {
        arr0(self).into_dyn()
    }
}

impl IntoObservation<f32> for f32 {
    #[inline]
    fn into_observation(self) -> ArrayD<f32> {
        arr0(self).into_dyn()
    }
}

impl<T, S, D> IntoObservation<T> for ArrayBase<S, D>
where
    T: Element,
    S: Data<Elem = T>,
    D: Dimension,
{
    #[inline]
    fn into_observation(self) -> ArrayD<T> {
        self.into_owned().into_dyn()
    }
}

impl<T, S, D> IntoObservation<T> for &ArrayBase<S, D>
where
    T: Element,
    S: Data<Elem = T>,
    D: Dimension,
{
    #[inline]
    fn into_observation(self) -> ArrayD<T> {
        self.to_owned().into_dyn()
    }
}

impl<T: Element> IntoObservation<T> for Vec<T> {
    #[inline]
    fn into_observation(self) -> ArrayD<T> {
        Array1::from_vec(self).into_dyn()
    }
}

impl<T: Element> IntoObservation<T> for &[T] {
    #[inline]
    fn into_observation(self) -> ArrayD<T> {
        Array1::from(self.to_vec()).into_dyn()
    }
}

impl<T: Element> IntoObservation<T> for Value<T> {
    #[inline]
    fn into_observation(self) -> ArrayD<T> {
        self.into_array()
    }
}
