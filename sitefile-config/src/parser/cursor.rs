//! One-token lookahead over a token stream
//!
//! The parser always works on the most recently consumed token. A step that
//! reads a token it does not own hands it back with [`Lookahead::put_back`];
//! the next [`Lookahead::consume`] then yields the same token again instead of
//! pulling a new one from the source.

use crate::parser::lexer::Token;

/// Token cursor with a single pushback slot
#[derive(Debug)]
pub struct Lookahead<I: Iterator<Item = Token>> {
    source: I,
    current: Option<Token>,
    peeked: Option<Token>,
    last_line: usize,
}

impl<I: Iterator<Item = Token>> Lookahead<I> {
    pub fn new(source: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            source: source.into_iter(),
            current: None,
            peeked: None,
            last_line: 0,
        }
    }

    /// Make the next token current. Returns `false` at end of stream, after
    /// which there is no current token.
    pub fn consume(&mut self) -> bool {
        self.current = match self.peeked.take() {
            Some(token) => Some(token),
            None => self.source.next(),
        };
        if let Some(token) = &self.current {
            self.last_line = token.line;
        }
        self.current.is_some()
    }

    /// The most recently consumed token
    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// The token the next [`consume`](Self::consume) will yield
    pub fn peek(&mut self) -> Option<&Token> {
        if self.peeked.is_none() {
            self.peeked = self.source.next();
        }
        self.peeked.as_ref()
    }

    /// Hand the current token back so the next `consume` yields it again.
    ///
    /// Does nothing if there is no current token.
    pub fn put_back(&mut self) {
        if let Some(token) = self.current.take() {
            debug_assert!(self.peeked.is_none(), "pushback slot already occupied");
            self.peeked = Some(token);
        }
    }

    /// Line of the last token seen, 0 before the first one
    pub fn last_line(&self) -> usize {
        self.last_line
    }
}
