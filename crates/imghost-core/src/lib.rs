//! Core types for the imghost service: configuration, the unified error
//! type, domain models, and upload validation.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use config::Config;
pub use error::{AppError, LogLevel};
pub use validation::{UploadValidator, ValidationError};
