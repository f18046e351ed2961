//! Middleware controllers
//!
//! A [`Controller`] holds every raw token written for one middleware
//! directive, across all of its occurrences in a server block. The parser
//! fills them through [`ControllerStore::get_or_create`]; middleware setup code
//! later walks them with a [`Dispenser`].

use crate::parser::lexer::Token;
use crate::parser::parser::ParseError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Raw tokens collected for one middleware directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Controller {
    pub directive: String,
    pub tokens: Vec<Token>,
}

impl Controller {
    pub fn new(directive: impl Into<String>) -> Self {
        Self {
            directive: directive.into(),
            tokens: Vec::new(),
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Values of the collected tokens, in source order
    pub fn texts(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    pub fn dispenser(&self) -> Dispenser<'_> {
        Dispenser::new(&self.tokens)
    }
}

/// Controllers of one server block, keyed by directive name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ControllerStore {
    controllers: BTreeMap<String, Controller>,
}

impl ControllerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The only way to add tokens: an existing controller is reused so later
    /// occurrences of a directive append to earlier ones.
    pub fn get_or_create(&mut self, directive: &str) -> &mut Controller {
        self.controllers
            .entry(directive.to_string())
            .or_insert_with(|| Controller::new(directive))
    }

    pub fn get(&self, directive: &str) -> Option<&Controller> {
        self.controllers.get(directive)
    }

    pub fn contains(&self, directive: &str) -> bool {
        self.controllers.contains_key(directive)
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.controllers.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Controller> {
        self.controllers.values()
    }
}

/// Read cursor over a controller's tokens.
///
/// Starts before the first token; call [`next`](Self::next) to land on the
/// directive name.
#[derive(Debug, Clone)]
pub struct Dispenser<'a> {
    tokens: &'a [Token],
    cursor: Option<usize>,
    nesting: usize,
}

impl<'a> Dispenser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            cursor: None,
            nesting: 0,
        }
    }

    fn next_index(&self) -> usize {
        self.cursor.map_or(0, |c| c + 1)
    }

    /// Move to the next token, whatever line it is on
    pub fn next(&mut self) -> bool {
        let next = self.next_index();
        if next < self.tokens.len() {
            self.cursor = Some(next);
            true
        } else {
            false
        }
    }

    /// Move to the next token only if it is an argument on the current line
    pub fn next_arg(&mut self) -> bool {
        let Some(cursor) = self.cursor else {
            return self.next();
        };
        match self.tokens.get(cursor + 1) {
            Some(next)
                if next.line == self.tokens[cursor].line
                    && !next.is_open_brace()
                    && !next.is_close_brace() =>
            {
                self.cursor = Some(cursor + 1);
                true
            }
            _ => false,
        }
    }

    /// Step through a `{ }` block that opens on the current line.
    ///
    /// Returns `true` for each token inside the block and `false` once the
    /// block is closed (or if there is none).
    pub fn next_block(&mut self) -> bool {
        if self.nesting > 0 {
            if !self.next() {
                return false;
            }
            if self.is_close_brace() {
                self.nesting -= 1;
                return false;
            }
            if self.is_open_brace() {
                self.nesting += 1;
            }
            return true;
        }

        let (Some(cursor), Some(next)) = (self.cursor, self.tokens.get(self.next_index())) else {
            return false;
        };
        if !next.is_open_brace() || next.line != self.tokens[cursor].line {
            return false;
        }
        self.cursor = Some(cursor + 1);
        self.nesting += 1;
        self.next_block()
    }

    /// Text of the current token, empty before the first `next`
    pub fn val(&self) -> &str {
        self.current().map_or("", |t| t.text.as_str())
    }

    /// Line of the current token, 0 before the first `next`
    pub fn line(&self) -> usize {
        self.current().map_or(0, |t| t.line)
    }

    /// Collect the rest of the current line as arguments
    pub fn remaining_args(&mut self) -> Vec<String> {
        let mut args = Vec::new();
        while self.next_arg() {
            args.push(self.val().to_string());
        }
        args
    }

    /// Error for a directive given the wrong number of arguments
    pub fn arg_err(&self) -> ParseError {
        ParseError::Syntax {
            line: self.line(),
            span: self.current().map(|t| t.span).unwrap_or_default(),
            message: format!(
                "Wrong argument count or unexpected line ending after '{}'",
                self.val()
            ),
        }
    }

    fn current(&self) -> Option<&Token> {
        self.cursor.and_then(|c| self.tokens.get(c))
    }

    fn is_open_brace(&self) -> bool {
        self.current().is_some_and(Token::is_open_brace)
    }

    fn is_close_brace(&self) -> bool {
        self.current().is_some_and(Token::is_close_brace)
    }
}
