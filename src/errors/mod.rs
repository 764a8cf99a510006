mod config;
mod error;

pub use config::ConfigError;
pub use error::{Error, Result};
