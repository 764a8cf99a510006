mod checkpoint;
mod dtype;
mod observation;
mod prior;
mod value;

pub use checkpoint::Checkpoint;
pub use dtype::{DType, Element};
pub use observation::IntoObservation;
pub use prior::Prior;
pub use value::Value;
