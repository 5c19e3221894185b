//! Config module - combat tuning loaded from RON data files.

mod data;
mod error;

pub use data::*;
pub use error::ConfigError;
