//! Lexer for Sitefile
//!
//! Splits source text into whitespace-separated tokens, each tagged with
//! the line it starts on.
//!
//! Key features:
//! - Whitespace (including newlines) separates tokens; lines are counted
//! - A lone `{` or `}` is a block token, braces glued to a word stay in it
//! - "..." for quoted strings (may span lines)
//! - # for comments (skipped)

use logos::{Logos, Span};
use serde::Serialize;
use std::fmt;

/// Token text storage; most tokens fit inline
pub type Text = smartstring::alias::String;

/// Byte range in the source, used for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub start: usize,
    pub end: usize,
}

impl From<Span> for Location {
    fn from(span: Span) -> Self {
        Self {
            start: span.start,
            end: span.end,
        }
    }
}

/// A token: its text and the line it starts on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: Text,
    pub line: usize,
    #[serde(skip)]
    pub span: Location,
}

impl Token {
    pub fn new(text: impl Into<Text>, line: usize) -> Self {
        Self {
            text: text.into(),
            line,
            span: Location::default(),
        }
    }

    pub fn with_span(mut self, span: impl Into<Location>) -> Self {
        self.span = span.into();
        self
    }

    pub fn is_open_brace(&self) -> bool {
        self.text == "{"
    }

    pub fn is_close_brace(&self) -> bool {
        self.text == "}"
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,

    #[token("{", priority = 3)]
    BlockOpen,

    #[token("}", priority = 3)]
    BlockClose,

    /// Quoted string literal: "..."
    #[regex(r#""([^"\\]|\\(.|\n))*""#, |lex| {
        let s = lex.slice();
        unescape_string(&s[1..s.len()-1])
    })]
    Quoted(String),

    /// Anything else up to the next whitespace or quote
    #[regex(r##"[^ \t\r\n\f"#][^ \t\r\n\f"]*"##)]
    Word,
}

/// Unescape a string literal
fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some(c) => {
                    result.push('\\');
                    result.push(c);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Lexer error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("Unterminated string starting on line {line}")]
    UnterminatedString { line: usize, position: usize },
}

impl LexError {
    pub fn position(&self) -> usize {
        match self {
            LexError::UnterminatedString { position, .. } => *position,
        }
    }
}

/// Tokenize a Sitefile source string
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut counted = 0;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        line += newlines(&source[counted..span.start]);
        counted = span.start;

        let text: Text = match result {
            Ok(RawToken::BlockOpen) => "{".into(),
            Ok(RawToken::BlockClose) => "}".into(),
            Ok(RawToken::Quoted(s)) => s.into(),
            Ok(RawToken::Word) => lexer.slice().into(),
            Ok(RawToken::Comment) => continue,
            // Every other byte is a word, so only an open quote can fail
            Err(()) => {
                return Err(LexError::UnterminatedString {
                    line,
                    position: span.start,
                });
            }
        };

        tokens.push(Token::new(text, line).with_span(span));
    }

    Ok(tokens)
}

fn newlines(s: &str) -> usize {
    s.bytes().filter(|b| *b == b'\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_basic_directive() {
        let tokens = tokenize("root /var/www").unwrap();
        assert_eq!(texts(&tokens), vec!["root", "/var/www"]);
        assert!(tokens.iter().all(|t| t.line == 1));
    }

    #[test]
    fn test_block() {
        let tokens = tokenize("example.com {\n  root *\n}").unwrap();
        assert_eq!(texts(&tokens), vec!["example.com", "{", "root", "*", "}"]);
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1, 2, 2, 3]);
        assert!(tokens[1].is_open_brace());
        assert!(tokens[4].is_close_brace());
    }

    #[test]
    fn test_quotes_and_comments() {
        let source = r#"
            # This is a comment
            root "/var/www/my site" # Inline comment
        "#;
        let tokens = tokenize(source).unwrap();
        assert_eq!(texts(&tokens), vec!["root", "/var/www/my site"]);
        assert_eq!(tokens[0].line, 3);
    }

    #[test]
    fn test_escapes() {
        let tokens = tokenize(r#"header "say \"hi\"\tnow""#).unwrap();
        assert_eq!(tokens[1].text, "say \"hi\"\tnow");
    }

    #[test]
    fn test_multiline_string_keeps_start_line() {
        let tokens = tokenize("a \"one\ntwo\"\nb").unwrap();
        assert_eq!(tokens[1].line, 1);
        assert_eq!(tokens[1].text, "one\ntwo");
        assert_eq!(tokens[2].line, 3);
    }

    #[test]
    fn test_glued_braces_stay_in_word() {
        let tokens = tokenize("header / X-Host {host}").unwrap();
        assert_eq!(texts(&tokens), vec!["header", "/", "X-Host", "{host}"]);
    }

    #[test]
    fn test_lone_braces() {
        let tokens = tokenize("{\n}\n{ }").unwrap();
        assert_eq!(texts(&tokens), vec!["{", "}", "{", "}"]);
        assert!(tokens.iter().step_by(2).all(|t| t.is_open_brace()));
        assert!(tokens.iter().skip(1).step_by(2).all(|t| t.is_close_brace()));
    }

    #[test]
    fn test_unquoted_input_never_fails() {
        let tokens = tokenize("café ~!$% \\x ; \u{b} <a>\n# only a comment").unwrap();
        assert_eq!(texts(&tokens), vec!["café", "~!$%", "\\x", ";", "\u{b}", "<a>"]);
    }

    #[test]
    fn test_hash_inside_word() {
        let tokens = tokenize("redir /a /b#top").unwrap();
        assert_eq!(tokens[2].text, "/b#top");
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("ab  cd").unwrap();
        assert_eq!(tokens[1].span, Location { start: 4, end: 6 });
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("root\n\"/var/www").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { line: 2, .. }));
    }
}
