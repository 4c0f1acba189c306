//! Crate error type
//!
//! Only loading and saving can fail; the battle core itself is infallible.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage write failed: {0}")]
    Storage(String),

    #[error("save version {found} is not supported (expected {expected})")]
    UnsupportedSave { found: u32, expected: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
