use std::fmt;

use ndarray::ScalarOperand;
use num_traits::{Float, NumAssign};
use serde::{Deserialize, Serialize};

/// The element type of the accumulators of an estimator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize,
)]
pub enum DType {
    /// Single precision, `f32`.
    #[display("f32")]
    F32,
    /// Double precision, `f64`.
    #[display("f64")]
    F64,
}

/// A floating point type the estimators can accumulate in.
///
/// The running sums are kept in the same type as the observations,
/// so this trait fixes the `dtype` of an estimator at compile time.
pub trait Element:
    Float + NumAssign + ScalarOperand + fmt::Debug + fmt::Display + Default + Send + Sync + 'static
{
    /// The runtime tag of this type.
    const DTYPE: DType;

    /// Convert a sample count into this type.
    fn from_count(count: u64) -> Self;
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    #[inline(always)]
    fn from_count(count: u64) -> Self {
        count as f32
    }
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;

    #[inline(always)]
    fn from_count(count: u64) -> Self {
        count as f64
    }
}
