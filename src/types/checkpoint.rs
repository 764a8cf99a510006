use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::{Element, Prior};

/// Constructor arguments that recreate the current state of an estimator.
///
/// Obtained from `checkpoint()` on an estimator and consumed by its `from_checkpoint`.
/// Serializable, so callers can store it wherever they keep their own state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Checkpoint<T> {
    /// No observations yet, with the shape if one was fixed.
    Fresh {
        /// The shape fixed at construction, if any.
        shape: Option<Vec<usize>>,
    },
    /// At least one observation, continue through the resumption path.
    Resume(Prior<T>),
}

impl<T> Checkpoint<T> {
    /// The sample count captured by the checkpoint.
    pub fn count(&self) -> u64 {
        match self {
            Self::Fresh { .. } => 0,
            Self::Resume(prior) => prior.count(),
        }
    }
}

impl<T: Element> Checkpoint<T> {
    /// Render as a constructor call of the estimator `name`,
    /// e.g. `Name(shape=[], dtype=f64, init_count=3, init_value=2, init_var=1)`.
    pub(crate) fn describe(&self, name: &str) -> String {
        let mut out = format!("{name}(");
        match self {
            Self::Fresh { shape: None } => {}
            Self::Fresh { shape: Some(shape) } => {
                let _ = write!(out, "shape={shape:?}, ");
            }
            Self::Resume(prior) => {
                let _ = write!(out, "shape={:?}, ", prior.shape());
            }
        }
        let _ = write!(out, "dtype={}", T::DTYPE);
        if let Self::Resume(prior) = self {
            let _ = write!(
                out,
                ", init_count={}, init_value={}, init_var={}",
                prior.count(),
                prior.value(),
                prior.var()
            );
        }
        out.push(')');
        out
    }
}
