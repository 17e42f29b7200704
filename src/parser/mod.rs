//! Recursive-descent parser producing an owned AST and a `rowan` CST.
//!
//! This module contains the entry points for parsing Bluespec source. The
//! source is tokenised once; the significant tokens drive the declaration,
//! statement and expression parsers, while the full token list (trivia
//! included) is folded into a lossless green tree using the spans of the
//! declarations that were recognised.

use log::debug;

use crate::diagnostic::Diagnostic;
use crate::tokenizer::lex;
use crate::{Span, SyntaxKind};

pub mod ast;
pub mod cst_builder;
mod declaration;
mod expression;
mod statement;
mod token_stream;

#[cfg(test)]
mod tests;

pub use cst_builder::Parsed;
pub use expression::{LiteralError, parse_expression, parse_int_literal, parse_real_literal};
pub use statement::parse_statement;

use cst_builder::{NodeSpans, build_green_tree};
use token_stream::{Checkpoint, TokenStream};

/// How many diagnostics a parse collects before giving up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RecoveryMode {
    /// Resynchronise after each error and keep going.
    #[default]
    CollectAll,
    /// Stop at the first diagnostic and report only that one.
    FirstError,
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    pub recovery: RecoveryMode,
}

impl ParseOptions {
    #[must_use]
    pub fn first_error() -> Self {
        Self {
            recovery: RecoveryMode::FirstError,
        }
    }
}

/// Shared parser state: the token cursor plus the declaration spans that
/// become CST nodes.
pub(crate) struct Parser<'a> {
    pub(crate) ts: TokenStream<'a>,
    nodes: NodeSpans,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str, tokens: Vec<(SyntaxKind, Span)>, halt_on_error: bool) -> Self {
        Self {
            ts: TokenStream::new(tokens, src, halt_on_error),
            nodes: NodeSpans::default(),
        }
    }

    /// Record a completed declaration for the CST.
    pub(crate) fn node(&mut self, kind: SyntaxKind, span: Span) {
        self.nodes.push(kind, span);
    }

    /// Save the cursor, diagnostics and recorded nodes for speculation.
    pub(crate) fn checkpoint(&self) -> (Checkpoint, usize) {
        (self.ts.checkpoint(), self.nodes.len())
    }

    pub(crate) fn rewind(&mut self, (cp, nodes): (Checkpoint, usize)) {
        self.ts.rewind(cp);
        self.nodes.truncate(nodes);
    }

    pub(crate) fn finish(self) -> (Vec<Diagnostic>, NodeSpans) {
        (self.ts.errors, self.nodes)
    }
}

/// Parse a complete source unit with default options.
///
/// # Examples
///
/// ```rust
/// use bsvparse::parse;
///
/// let src = "package P; function Bool f(Bool x); return !x; endfunction endpackage";
/// let parsed = parse(src);
/// assert!(parsed.is_ok());
/// assert_eq!(parsed.syntax().text().to_string(), src);
/// ```
#[must_use]
pub fn parse(src: &str) -> Parsed {
    parse_with_options(src, ParseOptions::default())
}

/// Parse a complete source unit.
///
/// Lexical errors are reported alongside syntax errors; the text that failed
/// to lex is kept in the CST as an `N_ERROR` node. Diagnostics are ordered by
/// source position.
#[must_use]
pub fn parse_with_options(src: &str, options: ParseOptions) -> Parsed {
    let lexed = lex(src);
    let first_error = options.recovery == RecoveryMode::FirstError;
    let mut diagnostics: Vec<Diagnostic> =
        lexed.errors.iter().cloned().map(Diagnostic::from).collect();

    let (root, nodes) = if first_error && !diagnostics.is_empty() {
        (ast::SourceFile::default(), NodeSpans::default())
    } else {
        let mut parser = Parser::new(src, lexed.significant(), first_error);
        let root = parser.parse_source_file();
        let (errors, nodes) = parser.finish();
        diagnostics.extend(errors);
        (root, nodes)
    };

    if first_error {
        diagnostics.truncate(1);
    }
    diagnostics.sort_by_key(|d| d.span.start);
    debug!(
        "parsed {} bytes: {} tokens, {} declarations, {} diagnostics",
        src.len(),
        lexed.tokens.len(),
        nodes.len(),
        diagnostics.len()
    );

    let green = build_green_tree(&lexed.tokens, src, &nodes);
    Parsed::new(green, root, diagnostics)
}
