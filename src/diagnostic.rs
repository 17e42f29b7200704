//! Diagnostics collected while lexing and parsing.
//!
//! Every problem is reported as a [`Diagnostic`] carrying a kind, a message
//! and a source span. The parser never aborts: callers receive the full list
//! and decide what to do with it.

use std::fmt;

use chumsky::error::{Simple, SimpleReason};
use thiserror::Error;

use crate::tokenizer::{LexError, LineIndex, Position};
use crate::{Span, SyntaxKind};

/// Severity of a diagnostic. This layer only reports errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
        }
    }
}

/// Source forms the grammar recognises but deliberately does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnsupportedConstruct {
    Case,
    For,
    While,
    Typedef,
    Typeclass,
    Instance,
    Provisos,
    AttributeInstance,
    SystemCall,
    PatternMatch,
}

impl fmt::Display for UnsupportedConstruct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Case => "case statement",
            Self::For => "for loop",
            Self::While => "while loop",
            Self::Typedef => "type definition",
            Self::Typeclass => "typeclass definition",
            Self::Instance => "typeclass instance",
            Self::Provisos => "provisos",
            Self::AttributeInstance => "attribute instance",
            Self::SystemCall => "system task or function call",
            Self::PatternMatch => "pattern match",
        };
        f.write_str(text)
    }
}

/// Classification of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DiagnosticKind {
    #[error("lexical error")]
    Lexical,
    #[error("syntax error")]
    Syntax,
    #[error("unsupported construct ({0})")]
    Unsupported(UnsupportedConstruct),
}

/// A single lexical or syntactic problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    #[must_use]
    pub fn syntax(span: Span, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Syntax,
            message: message.into(),
            span,
        }
    }

    #[must_use]
    pub fn unsupported(span: Span, construct: UnsupportedConstruct) -> Self {
        Self {
            kind: DiagnosticKind::Unsupported(construct),
            message: format!("{construct} is not supported"),
            span,
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        Severity::Error
    }

    /// Line and column of the start of the span.
    #[must_use]
    pub fn position(&self, lines: &LineIndex<'_>) -> Position {
        lines.position(self.span.start)
    }
}

impl From<LexError> for Diagnostic {
    fn from(err: LexError) -> Self {
        Self {
            kind: DiagnosticKind::Lexical,
            message: err.to_string(),
            span: err.span(),
        }
    }
}

impl From<Simple<SyntaxKind>> for Diagnostic {
    fn from(err: Simple<SyntaxKind>) -> Self {
        let message = match err.reason() {
            SimpleReason::Custom(msg) => msg.clone(),
            SimpleReason::Unclosed { delimiter, .. } => {
                format!("unclosed {}", delimiter.describe())
            }
            SimpleReason::Unexpected => {
                let mut expected: Vec<&str> = err
                    .expected()
                    .map(|kind| kind.map_or("end of input", SyntaxKind::describe))
                    .collect();
                expected.sort_unstable();
                expected.dedup();
                let found = err.found().map_or("end of input", |k| k.describe());
                if expected.is_empty() {
                    format!("unexpected {found}")
                } else {
                    format!("expected {}, found {found}", expected.join(" or "))
                }
            }
        };
        Self::syntax(err.span(), message)
    }
}
