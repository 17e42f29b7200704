//! Library crate for bsvparse.
//!
//! A front end for a Bluespec-style hardware description language: a lexer,
//! a Pratt expression parser, a dialect-generic statement grammar and the
//! package-level declaration parser. Parsing yields an owned AST, a lossless
//! `rowan` syntax tree and every diagnostic found along the way.

#![forbid(unsafe_code)]

pub mod diagnostic;
pub mod language;
pub mod parser;
pub mod tokenizer;

#[cfg(test)]
pub(crate) mod test_util;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity, UnsupportedConstruct};
pub use language::{BsvLanguage, SyntaxKind, SyntaxNode};
pub use parser::{
    ParseOptions, Parsed, RecoveryMode, ast, parse, parse_expression, parse_statement,
    parse_with_options,
};
pub use tokenizer::{
    LexError, Lexer, LineIndex, Position, Span, Token, tokenize_with_trivia,
    tokenize_without_trivia,
};
