//! Builtin directives
//!
//! Each routine is entered with the parser on the directive name and reads
//! its arguments from the same line.

use crate::parser::parser::{ParseResult, Parser};
use sitefile_core::TlsConfig;

/// `root <path>`
pub fn root(p: &mut Parser<'_>) -> ParseResult<()> {
    if !p.next_arg() {
        return Err(p.arg_err());
    }
    let path = p.val().to_string();
    if p.next_arg() {
        return Err(p.arg_err());
    }

    p.config_mut().root = Some(path);
    Ok(())
}

/// `tls <certificate> <key>`
pub fn tls(p: &mut Parser<'_>) -> ParseResult<()> {
    if !p.next_arg() {
        return Err(p.arg_err());
    }
    let certificate = p.val().to_string();
    if !p.next_arg() {
        return Err(p.arg_err());
    }
    let key = p.val().to_string();
    if p.next_arg() {
        return Err(p.arg_err());
    }

    p.config_mut().tls = Some(TlsConfig {
        enabled: true,
        certificate,
        key,
    });
    Ok(())
}
