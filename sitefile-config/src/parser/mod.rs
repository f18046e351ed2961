//! Parser module for Sitefile
//!
//! This module provides the lexer, token cursor, directive registry and the
//! recursive-descent parser for the Sitefile format.

pub mod address;
pub mod builtins;
pub mod controller;
pub mod cursor;
pub mod lexer;
pub mod parser;
pub mod registry;

pub use address::{split_address, AddressDefaults};
pub use controller::{Controller, ControllerStore, Dispenser};
pub use cursor::Lookahead;
pub use lexer::{tokenize, LexError, Location, Token};
pub use parser::{BuiltinFn, ParseError, ParseResult, Parser, Site};
pub use registry::{DirectiveRegistry, STANDARD_MIDDLEWARE};

/// Tokenize and parse every server block in `source`
pub fn parse(
    source: &str,
    registry: &DirectiveRegistry,
    defaults: AddressDefaults,
) -> Result<Vec<Site>, crate::Error> {
    let tokens = tokenize(source)?;
    Ok(Parser::new(tokens, registry).with_defaults(defaults).parse_all()?)
}
