//! Sitefile Parser
//!
//! Recursive descent parser that turns a token stream into one [`Site`] per
//! server block: an address, then either a `{ }` block of directives or, for
//! a lone server, directives without braces running to the end of input.

use crate::parser::address::{split_address, AddressDefaults};
use crate::parser::controller::ControllerStore;
use crate::parser::cursor::Lookahead;
use crate::parser::lexer::{Location, Token};
use crate::parser::registry::DirectiveRegistry;
use serde::Serialize;
use sitefile_core::Config;
use thiserror::Error;
use tracing::{debug, trace};

/// Parser error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Line {line} - Syntax error: {message}")]
    Syntax {
        line: usize,
        span: Location,
        message: String,
    },

    #[error("Line {line} - Syntax error: Unexpected EOF")]
    Eof { line: usize },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax { line, .. } | ParseError::Eof { line } => *line,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Signature of a builtin directive routine.
///
/// The parser is positioned on the directive name; the routine consumes its
/// own arguments.
pub type BuiltinFn = fn(&mut Parser<'_>) -> ParseResult<()>;

/// One parsed server block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Site {
    pub config: Config,
    pub controllers: ControllerStore,
}

/// Parser state
pub struct Parser<'r> {
    tokens: Lookahead<std::vec::IntoIter<Token>>,
    registry: &'r DirectiveRegistry,
    defaults: AddressDefaults,
    config: Config,
    controllers: ControllerStore,
}

impl<'r> Parser<'r> {
    pub fn new(tokens: Vec<Token>, registry: &'r DirectiveRegistry) -> Self {
        Self {
            tokens: Lookahead::new(tokens),
            registry,
            defaults: AddressDefaults::default(),
            config: Config::default(),
            controllers: ControllerStore::new(),
        }
    }

    pub fn with_defaults(mut self, defaults: AddressDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Parse exactly one server block. Empty input is an EOF error.
    pub fn parse(mut self) -> ParseResult<Site> {
        match self.next_site()? {
            Some(site) => Ok(site),
            None => Err(self.eof_err()),
        }
    }

    /// Parse server blocks until the input runs out
    pub fn parse_all(mut self) -> ParseResult<Vec<Site>> {
        let mut sites = Vec::new();
        while let Some(site) = self.next_site()? {
            sites.push(site);
        }
        Ok(sites)
    }

    /// Parse the next server block, `None` once the input is exhausted
    pub fn next_site(&mut self) -> ParseResult<Option<Site>> {
        if !self.tokens.consume() {
            return Ok(None);
        }

        self.address()?;
        self.address_block()?;

        let site = Site {
            config: std::mem::take(&mut self.config),
            controllers: std::mem::take(&mut self.controllers),
        };
        debug!(
            address = %site.config.address(),
            middleware = site.controllers.len(),
            "Parsed server block"
        );
        Ok(Some(site))
    }

    // ========================================
    // Grammar
    // ========================================

    /// The current token is a `host:port` combination
    fn address(&mut self) -> ParseResult<()> {
        let token = self.val();
        if token == "{" || token == "}" {
            return Err(self.err(format!("'{}' is not EOF or address", token)));
        }
        let (host, port) = split_address(token, &self.defaults);
        self.config.host = host;
        self.config.port = port;
        Ok(())
    }

    /// Directives after the address, with or without surrounding braces
    fn address_block(&mut self) -> ParseResult<()> {
        if !self.tokens.consume() {
            // only an address
            return Ok(());
        }

        if self.open_curly_brace().is_err() {
            // single-server configs don't need curly braces
            self.tokens.put_back();
            return self.directives();
        }

        self.directives()?;
        self.close_curly_brace()
    }

    /// Runs until EOF or the `}` that closes the address block
    fn directives(&mut self) -> ParseResult<()> {
        while self.tokens.consume() {
            let token = self.val();
            if token == "}" {
                break;
            }
            if token.starts_with('/') {
                self.location()?;
            } else {
                self.directive()?;
            }
        }
        Ok(())
    }

    /// Path scope: `/path { directives }`.
    ///
    /// The path is not attached to the directives inside; they are handled
    /// exactly as if they were written at the top of the block.
    fn location(&mut self) -> ParseResult<()> {
        debug!(path = self.val(), line = self.line(), "Entering location scope");

        if !self.tokens.consume() {
            return Err(self.eof_err());
        }
        self.open_curly_brace()?;

        while self.tokens.consume() {
            if self.close_curly_brace().is_ok() {
                return Ok(());
            }
            self.directive()?;
        }
        Err(self.eof_err())
    }

    /// Builtin directive, registered middleware, or an error
    fn directive(&mut self) -> ParseResult<()> {
        let name = self.val();
        if let Some(handler) = self.registry.builtin(name) {
            debug!(directive = name, line = self.line(), "Builtin directive");
            handler(self)
        } else if self.registry.is_middleware(name) {
            self.collect_tokens()
        } else {
            Err(self.err(format!(
                "Unexpected token '{}', expecting a valid directive",
                name
            )))
        }
    }

    /// Gather a middleware directive's tokens up to the end of its line, or
    /// to the end of the `{ }` block opened on that line, and append them to
    /// the directive's controller.
    fn collect_tokens(&mut self) -> ParseResult<()> {
        let Some(first) = self.tokens.current().cloned() else {
            return Err(self.eof_err());
        };
        let directive = first.text.to_string();
        let line = first.line;
        let mut nesting = 0usize;
        let mut collected = vec![first];

        while self.tokens.consume() {
            let Some(token) = self.tokens.current() else {
                break;
            };

            if token.is_open_brace() {
                nesting += 1;
            } else if token.line > line && nesting == 0 {
                // first token of the next directive
                self.tokens.put_back();
                debug!(
                    directive = %directive,
                    line,
                    tokens = collected.len(),
                    "Collected middleware tokens"
                );
                self.controllers
                    .get_or_create(&directive)
                    .tokens
                    .extend(collected);
                return Ok(());
            } else if token.is_close_brace() && nesting > 0 {
                nesting -= 1;
            } else if token.is_close_brace() {
                return Err(self.err("Unexpected '}' because no matching open curly brace '{'"));
            }

            trace!(directive = %directive, token = %token, "Collecting");
            collected.push(token.clone());
        }

        Err(self.eof_err())
    }

    /// Asserts the current token is `{`; does not advance
    fn open_curly_brace(&self) -> ParseResult<()> {
        match self.tokens.current() {
            Some(token) if token.is_open_brace() => Ok(()),
            Some(_) => Err(self.syntax_err("{")),
            None => Err(self.eof_err()),
        }
    }

    /// Asserts the current token is `}`; does not advance
    fn close_curly_brace(&self) -> ParseResult<()> {
        match self.tokens.current() {
            Some(token) if token.is_close_brace() => Ok(()),
            Some(_) => Err(self.syntax_err("}")),
            None => Err(self.eof_err()),
        }
    }

    // ========================================
    // Helpers for directive routines
    // ========================================

    /// Text of the current token
    pub fn val(&self) -> &str {
        self.tokens.current().map_or("", |t| t.text.as_str())
    }

    /// Line of the current token, or of the last one seen
    pub fn line(&self) -> usize {
        self.tokens
            .current()
            .map_or(self.tokens.last_line(), |t| t.line)
    }

    /// Advance only if the next token is an argument on the current line.
    /// Braces are never arguments.
    pub fn next_arg(&mut self) -> bool {
        let line = self.line();
        let is_arg = matches!(
            self.tokens.peek(),
            Some(next) if next.line == line && !next.is_open_brace() && !next.is_close_brace()
        );
        is_arg && self.tokens.consume()
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Syntax error at the current token
    pub fn err(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            line: self.line(),
            span: self.tokens.current().map(|t| t.span).unwrap_or_default(),
            message: message.into(),
        }
    }

    pub fn syntax_err(&self, expected: &str) -> ParseError {
        self.err(format!(
            "Unexpected token '{}', expecting '{}'",
            self.val(),
            expected
        ))
    }

    pub fn arg_err(&self) -> ParseError {
        self.err(format!(
            "Wrong argument count or unexpected line ending after '{}'",
            self.val()
        ))
    }

    pub fn eof_err(&self) -> ParseError {
        ParseError::Eof {
            line: self.tokens.last_line(),
        }
    }
}
