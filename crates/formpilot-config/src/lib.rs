//! # FormPilot Config
//!
//! Configuration for the FormPilot form-automation engine. Every piece of
//! vocabulary the engine matches against (marker classes, labels, id
//! suffixes, keywords) lives here rather than in the engine itself, so the
//! same engine can drive a different legacy form by swapping the file.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
