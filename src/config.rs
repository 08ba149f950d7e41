//! Typed configuration from environment variables.
//!
//! Loads once at shell startup. In local dev, call
//! `dotenvy::dotenv().ok()` before this.

use crate::error::Result;

#[derive(Debug)]
pub struct Config {
    /// Filter directive for the tracing subscriber, e.g. "info" or
    /// "parcelq=debug".
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nothing is required today; the fallible signature is where a
    /// required variable would fail fast.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
