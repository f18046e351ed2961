//! Sitefile Configuration Parser
//!
//! This crate parses Sitefiles: one or more server addresses, each followed
//! by directives, either inside `{ }` or (for a single server) one per line.
//!
//! # Example
//!
//! ```rust
//! use sitefile_config::{parse_str, DirectiveRegistry};
//!
//! let source = r#"
//!     example.com:80 {
//!         root /var/www
//!         gzip
//!         ext .html
//!     }
//! "#;
//!
//! let registry = DirectiveRegistry::standard();
//! let sites = parse_str(source, &registry).unwrap();
//! assert_eq!(sites[0].config.root.as_deref(), Some("/var/www"));
//! assert!(sites[0].controllers.contains("gzip"));
//! ```

pub mod parser;
pub mod report;

pub use parser::{
    split_address, tokenize, AddressDefaults, BuiltinFn, Controller, ControllerStore,
    DirectiveRegistry, Dispenser, LexError, ParseError, ParseResult, Parser, Site, Token,
};
pub use report::render;

use sitefile_core::Settings;
use std::path::Path;

/// Parse a Sitefile source string with the default address settings
pub fn parse_str(source: &str, registry: &DirectiveRegistry) -> Result<Vec<Site>, Error> {
    parser::parse(source, registry, AddressDefaults::default())
}

/// Parse a Sitefile source string, taking address defaults from `settings`
pub fn parse_str_with(
    source: &str,
    registry: &DirectiveRegistry,
    settings: &Settings,
) -> Result<Vec<Site>, Error> {
    parser::parse(source, registry, AddressDefaults::from(settings))
}

/// Load and parse a Sitefile from a path
pub fn parse_file(
    path: impl AsRef<Path>,
    registry: &DirectiveRegistry,
    settings: &Settings,
) -> Result<Vec<Site>, Error> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    tracing::debug!("Parsing {}", path.display());
    parse_str_with(&source, registry, settings)
}

/// Error from reading, tokenizing or parsing a Sitefile
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Lex(#[from] LexError),

    #[error("{0}")]
    Parse(#[from] ParseError),
}
