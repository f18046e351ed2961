//! Configuration types and the settings loader

mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::{Config, Settings, TlsConfig, DEFAULT_HOST, DEFAULT_PORT};
