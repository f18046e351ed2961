//! Configuration type definitions
//!
//! [`Config`] is what the parser produces for one server block.
//! [`Settings`] tunes the parser itself and is read from a settings file.

use serde::{Deserialize, Serialize};

/// Host used when an address omits one (e.g. `:8080`)
pub const DEFAULT_HOST: &str = "localhost";

/// Port used when an address omits one
pub const DEFAULT_PORT: &str = "8080";

/// Parsed configuration for a single server block
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Host the server answers for
    pub host: String,

    /// Port the server listens on
    pub port: String,

    /// Document root set by the `root` directive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// TLS settings set by the `tls` directive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
}

impl Config {
    /// `host:port` as written back into an address
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// TLS configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TlsConfig {
    pub enabled: bool,

    /// Path to the certificate file
    pub certificate: String,

    /// Path to the private key file
    pub key: String,
}

/// Parser settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Host substituted for addresses without one
    #[serde(default = "default_host")]
    pub default_host: String,

    /// Port substituted for addresses without one
    #[serde(default = "default_port")]
    pub default_port: String,

    /// Extra middleware directive names to accept
    #[serde(default)]
    pub middleware: Vec<String>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> String {
    DEFAULT_PORT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_host: default_host(),
            default_port: default_port(),
            middleware: Vec::new(),
        }
    }
}
