//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::detection::DetectionError;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error")]
    Toml(#[from] Box<toml::de::Error>),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Detection(#[from] DetectionError),
}
