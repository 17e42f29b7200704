//! Shared helpers for integration tests.
//!
//! These mirror the crate's internal test helpers using only the public API.

#![expect(
    dead_code,
    reason = "helpers are reused across multiple tests so some may be unused"
)]

use bsvparse::ast::Dialect;
use bsvparse::{Diagnostic, DiagnosticKind, UnsupportedConstruct};

/// Render an expression, panicking with the diagnostics on failure.
#[track_caller]
pub fn expr_sexpr(src: &str) -> String {
    match bsvparse::parse_expression(src) {
        Ok(expr) => expr.to_sexpr(),
        Err(errors) => panic!("`{src}` failed to parse: {errors:?}"),
    }
}

/// Render a statement of dialect `D`, panicking with the diagnostics on
/// failure.
#[track_caller]
pub fn stmt_sexpr<D: Dialect>(src: &str) -> String {
    match bsvparse::parse_statement::<D>(src) {
        Ok(stmt) => stmt.to_sexpr(),
        Err(errors) => panic!("`{src}` failed to parse: {errors:?}"),
    }
}

/// Messages of every diagnostic, in order.
pub fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.message.as_str()).collect()
}

/// Unsupported constructs among `diagnostics`, in order.
pub fn unsupported(diagnostics: &[Diagnostic]) -> Vec<UnsupportedConstruct> {
    diagnostics
        .iter()
        .filter_map(|d| match d.kind {
            DiagnosticKind::Unsupported(construct) => Some(construct),
            _ => None,
        })
        .collect()
}
