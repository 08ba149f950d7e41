//! Error types for parcelq.
//!
//! The registry's operations are total and report expected conditions
//! through outcome values, so these variants belong to the layers
//! around the core: configuration loading and shell input validation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Command(String),
}

pub type Result<T> = std::result::Result<T, Error>;
