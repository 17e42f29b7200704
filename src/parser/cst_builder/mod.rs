//! CST construction utilities.
//!
//! Provides [`Parsed`], [`NodeSpans`] and [`build_green_tree`].

use rowan::GreenNode;

use super::ast::SourceFile;
use crate::diagnostic::Diagnostic;
use crate::language::SyntaxNode;

mod spans;
mod tree;

pub(crate) use self::spans::NodeSpans;
pub(crate) use self::tree::build_green_tree;

/// Result of a parse operation.
#[derive(Debug)]
pub struct Parsed {
    green: GreenNode,
    root: SourceFile,
    diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    pub(super) fn new(green: GreenNode, root: SourceFile, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            green,
            root,
            diagnostics,
        }
    }

    /// Access the `rowan` green tree.
    #[must_use]
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Root of the lossless syntax tree.
    #[must_use]
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Access the typed AST root.
    #[must_use]
    pub fn root(&self) -> &SourceFile {
        &self.root
    }

    /// Lexical, syntax and unsupported-construct diagnostics, ordered by
    /// position.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// `true` when no diagnostic was produced.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Split into the AST and diagnostics.
    #[must_use]
    pub fn into_parts(self) -> (SourceFile, Vec<Diagnostic>) {
        (self.root, self.diagnostics)
    }
}
