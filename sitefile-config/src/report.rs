//! Human-readable error reports
//!
//! Renders an [`Error`] against its source text with `ariadne`, pointing at
//! the offending token.

use crate::parser::ParseError;
use crate::Error;
use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};
use std::ops::Range;

/// Render `error` as a plain-text report for `source`
pub fn render(source: &str, filename: &str, error: &Error) -> String {
    let (range, label) = match error {
        Error::Io(e) => return format!("{}: {}", filename, e),
        Error::Lex(e) => (point(source, e.position()), "here"),
        Error::Parse(ParseError::Syntax { span, .. }) if span.end > span.start => {
            (span.start..span.end, "unexpected token")
        }
        Error::Parse(ParseError::Syntax { span, .. }) => (point(source, span.start), "here"),
        Error::Parse(ParseError::Eof { .. }) => {
            (point(source, source.len().saturating_sub(1)), "input ends here")
        }
    };

    let mut out = Vec::new();
    let written = Report::build(ReportKind::Error, (filename, range.clone()))
        .with_config(
            Config::default()
                .with_color(false)
                .with_index_type(IndexType::Byte),
        )
        .with_message(error.to_string())
        .with_label(Label::new((filename, range)).with_message(label))
        .finish()
        .write((filename, Source::from(source)), &mut out);

    match written {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(_) => error.to_string(),
    }
}

/// Range covering the character at `offset`, clamped to the source
fn point(source: &str, offset: usize) -> Range<usize> {
    let mut start = offset.min(source.len());
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let end = source[start..]
        .chars()
        .next()
        .map_or(start, |c| start + c.len_utf8());
    start..end
}
