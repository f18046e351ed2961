//! Sitefile Core Library
//!
//! Shared types for the Sitefile toolchain: the parsed per-site [`Config`],
//! the parser [`Settings`] and the common error type.

pub mod config;
pub mod error;

pub use config::{Config, Settings, SettingsLoader, TlsConfig};
pub use error::{Error, Result};

/// Sitefile version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
