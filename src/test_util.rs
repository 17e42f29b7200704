//! Helpers for asserting over parse results in unit tests.
//!
//! These functions reduce boilerplate when comparing expressions and
//! statements through their S-expression rendering and when checking that a
//! parse produced a particular diagnostic.

use crate::diagnostic::{Diagnostic, DiagnosticKind, UnsupportedConstruct};
use crate::parser::ast::Dialect;
use crate::{Parsed, parse, parse_expression, parse_statement};

/// Parse `src` as an expression and render it.
///
/// # Panics
/// Panics with the diagnostics when the expression does not parse.
#[track_caller]
pub(crate) fn expr_sexpr(src: &str) -> String {
    match parse_expression(src) {
        Ok(expr) => expr.to_sexpr(),
        Err(errors) => panic!("`{src}` failed to parse: {errors:?}"),
    }
}

/// Parse `src` as a statement of dialect `D` and render it.
///
/// # Panics
/// Panics with the diagnostics when the statement does not parse.
#[track_caller]
pub(crate) fn stmt_sexpr<D: Dialect>(src: &str) -> String {
    match parse_statement::<D>(src) {
        Ok(stmt) => stmt.to_sexpr(),
        Err(errors) => panic!("`{src}` failed to parse: {errors:?}"),
    }
}

/// Parse a source unit that must be free of diagnostics.
///
/// # Panics
/// Panics when any diagnostic is reported.
#[track_caller]
pub(crate) fn parse_ok(src: &str) -> Parsed {
    let parsed = parse(src);
    assert_no_diagnostics(parsed.diagnostics());
    parsed
}

/// Assert that a parse produced no diagnostics.
///
/// # Panics
/// Panics if `diagnostics` is not empty.
#[track_caller]
pub(crate) fn assert_no_diagnostics(diagnostics: &[Diagnostic]) {
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
}

/// Assert that exactly one diagnostic was reported and that its message
/// contains `pattern`.
///
/// # Panics
/// Panics when there is not exactly one diagnostic or the message differs.
#[track_caller]
pub(crate) fn assert_single_error<'a>(diagnostics: &'a [Diagnostic], pattern: &str) -> &'a Diagnostic {
    let [diag] = diagnostics else {
        panic!("expected one diagnostic, got {diagnostics:?}");
    };
    assert!(
        diag.message.contains(pattern),
        "expected message containing {pattern:?}, got {:?}",
        diag.message
    );
    diag
}

/// Kinds of every diagnostic that reports an unsupported construct.
pub(crate) fn unsupported(diagnostics: &[Diagnostic]) -> Vec<UnsupportedConstruct> {
    diagnostics
        .iter()
        .filter_map(|d| match d.kind {
            DiagnosticKind::Unsupported(construct) => Some(construct),
            _ => None,
        })
        .collect()
}

/// Messages of every diagnostic, in order.
pub(crate) fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.message.as_str()).collect()
}
