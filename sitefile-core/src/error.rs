//! Error types for Sitefile

use thiserror::Error;

/// Result type for Sitefile core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Sitefile
#[derive(Error, Debug)]
pub enum Error {
    /// Settings file could not be understood
    #[error("Settings error: {0}")]
    Settings(String),
}
