//! Cursor over significant tokens with diagnostic tracking.
//!
//! Provides lookahead, expectation, checkpointing and resynchronisation
//! helpers shared by the expression, statement and declaration parsers.

use log::warn;

use crate::diagnostic::{Diagnostic, UnsupportedConstruct};
use crate::{Span, SyntaxKind};

/// Saved cursor position for speculative parsing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint {
    pos: usize,
    errors: usize,
}

pub(crate) struct TokenStream<'a> {
    tokens: Vec<(SyntaxKind, Span)>,
    src: &'a str,
    pos: usize,
    halt_on_error: bool,
    pub(crate) errors: Vec<Diagnostic>,
}

impl<'a> TokenStream<'a> {
    pub(crate) fn new(tokens: Vec<(SyntaxKind, Span)>, src: &'a str, halt_on_error: bool) -> Self {
        Self {
            tokens,
            src,
            pos: 0,
            halt_on_error,
            errors: Vec::new(),
        }
    }

    pub(crate) fn peek(&self) -> Option<SyntaxKind> {
        self.nth(0)
    }

    pub(crate) fn nth(&self, n: usize) -> Option<SyntaxKind> {
        self.tokens.get(self.pos + n).map(|(k, _)| *k)
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek() == Some(kind)
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// At end of input or any block-closing keyword.
    pub(crate) fn at_closer(&self) -> bool {
        self.peek().is_none_or(SyntaxKind::is_block_closer)
    }

    /// Span of the next token, or an empty span at the end of input.
    pub(crate) fn peek_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map_or_else(|| self.eof_span(), |(_, sp)| sp.clone())
    }

    pub(crate) fn eof_span(&self) -> Span {
        self.src.len()..self.src.len()
    }

    pub(crate) fn bump(&mut self) -> Option<(SyntaxKind, Span)> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> Option<Span> {
        if self.at(kind) {
            self.bump().map(|(_, sp)| sp)
        } else {
            None
        }
    }

    /// Consume `kind` or record "expected `kind`, found ...".
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> Option<Span> {
        let span = self.eat(kind);
        if span.is_none() {
            self.error_expected(kind.describe());
        }
        span
    }

    /// Consume an identifier of the given class and return its text.
    pub(crate) fn expect_ident(&mut self, kind: SyntaxKind) -> Option<(String, Span)> {
        let span = self.expect(kind)?;
        Some((self.slice(&span), span))
    }

    /// Description of the next token for diagnostics.
    pub(crate) fn found(&self) -> &'static str {
        self.peek().map_or("end of input", SyntaxKind::describe)
    }

    pub(crate) fn error_expected(&mut self, what: &str) {
        let msg = format!("expected {what}, found {}", self.found());
        self.error(self.peek_span(), msg);
    }

    pub(crate) fn error(&mut self, span: Span, msg: impl Into<String>) {
        self.errors.push(Diagnostic::syntax(span, msg));
    }

    pub(crate) fn unsupported(&mut self, span: Span, construct: UnsupportedConstruct) {
        self.errors.push(Diagnostic::unsupported(span, construct));
    }

    /// Whether parsing should stop because the first error was requested.
    pub(crate) fn halted(&self) -> bool {
        self.halt_on_error && !self.errors.is_empty()
    }

    /// Start offset of the next token.
    pub(crate) fn start(&self) -> usize {
        self.peek_span().start
    }

    /// End offset of the last consumed token.
    pub(crate) fn last_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|idx| self.tokens.get(idx))
            .map_or(0, |(_, sp)| sp.end)
    }

    /// Span from `start` to the end of the last consumed token.
    pub(crate) fn span_from(&self, start: usize) -> Span {
        start..self.last_end().max(start)
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Whether the consumed tokens end a statement or block. A closer keeps
    /// its optional `: label`.
    pub(crate) fn after_boundary(&self) -> bool {
        match self.tokens.get(..self.pos).unwrap_or_default() {
            [
                ..,
                (closer, _),
                (SyntaxKind::T_COLON, _),
                (SyntaxKind::T_IDENT | SyntaxKind::T_TYPE_IDENT, _),
            ] => closer.is_block_closer(),
            [.., (last, _)] => *last == SyntaxKind::T_SEMI || last.is_block_closer(),
            [] => false,
        }
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            errors: self.errors.len(),
        }
    }

    /// Return to `cp`, dropping diagnostics recorded since.
    pub(crate) fn rewind(&mut self, cp: Checkpoint) {
        self.pos = cp.pos;
        self.errors.truncate(cp.errors);
    }

    pub(crate) fn src(&self) -> &'a str {
        self.src
    }

    /// Tokens from the cursor through the next `;`, stopping early before a
    /// keyword that cannot belong to an export or import list.
    pub(crate) fn list_tokens(&self) -> Vec<(SyntaxKind, Span)> {
        let rest = self.tokens.get(self.pos..).unwrap_or_default();
        let mut out = Vec::new();
        for (idx, (kind, span)) in rest.iter().enumerate() {
            if idx > 0 && kind.is_keyword() {
                break;
            }
            out.push((*kind, span.clone()));
            if *kind == SyntaxKind::T_SEMI {
                break;
            }
        }
        out
    }

    /// Kind of the token following the `action`/`actionvalue` block at the
    /// cursor, after its closing label and an optional `;`. `None` when the
    /// block is unclosed or nothing follows it.
    pub(crate) fn after_action_block(&self) -> Option<SyntaxKind> {
        let rest = self.tokens.get(self.pos..).unwrap_or_default();
        let mut depth = 0usize;
        let mut iter = rest.iter().map(|(kind, _)| *kind);
        for kind in iter.by_ref() {
            match kind {
                SyntaxKind::K_ACTION | SyntaxKind::K_ACTIONVALUE => depth += 1,
                SyntaxKind::K_ENDACTION | SyntaxKind::K_ENDACTIONVALUE => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        let mut next = iter.next();
        if next == Some(SyntaxKind::T_COLON) {
            iter.next();
            next = iter.next();
        }
        if next == Some(SyntaxKind::T_SEMI) {
            next = iter.next();
        }
        next
    }

    /// Advance past every token that starts before `offset`.
    pub(crate) fn skip_until(&mut self, offset: usize) {
        while !self.at_eof() && self.start() < offset {
            self.pos += 1;
        }
    }

    pub(crate) fn slice(&self, span: &Span) -> String {
        self.src.get(span.clone()).map_or_else(
            || {
                warn!("span {span:?} out of bounds for source of length {}", self.src.len());
                String::new()
            },
            str::to_string,
        )
    }

    /// Consume a bracketed group starting at the current opener, including
    /// nested groups. Returns `false` if the group is not closed.
    pub(crate) fn skip_balanced(&mut self) -> bool {
        let mut depth = 0usize;
        while let Some((kind, _)) = self.bump() {
            match kind {
                SyntaxKind::T_LPAREN
                | SyntaxKind::T_LBRACKET
                | SyntaxKind::T_LBRACE
                | SyntaxKind::T_ATTR_OPEN => depth += 1,
                SyntaxKind::T_RPAREN
                | SyntaxKind::T_RBRACKET
                | SyntaxKind::T_RBRACE
                | SyntaxKind::T_ATTR_CLOSE => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return true;
                    }
                }
                _ if depth == 0 => return true,
                _ => {}
            }
        }
        false
    }

    /// Consume from the current `open` keyword through its matching `close`.
    pub(crate) fn skip_through(&mut self, open: SyntaxKind, close: SyntaxKind) -> bool {
        let mut depth = 0usize;
        while let Some((kind, _)) = self.bump() {
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return true;
                }
            }
        }
        false
    }

    /// Consume through the next `;` outside brackets.
    pub(crate) fn skip_statement(&mut self) {
        let mut depth = 0usize;
        while let Some((kind, _)) = self.bump() {
            match kind {
                SyntaxKind::T_LPAREN | SyntaxKind::T_LBRACKET | SyntaxKind::T_LBRACE => {
                    depth += 1;
                }
                SyntaxKind::T_RPAREN | SyntaxKind::T_RBRACKET | SyntaxKind::T_RBRACE => {
                    depth = depth.saturating_sub(1);
                }
                SyntaxKind::T_SEMI if depth == 0 => return,
                _ => {}
            }
        }
    }

    /// Skip to the next statement boundary after an error.
    ///
    /// Stops after a `;` at bracket depth zero, or before a block-closing
    /// keyword or the start of a new definition. Consumes at least one token
    /// unless already at such a boundary.
    pub(crate) fn recover(&mut self) {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(kind) = self.peek() {
            if depth == 0 {
                if kind.is_block_closer() {
                    break;
                }
                if self.pos > start && starts_definition(kind) {
                    break;
                }
            }
            self.bump();
            match kind {
                SyntaxKind::T_LPAREN | SyntaxKind::T_LBRACKET | SyntaxKind::T_LBRACE => {
                    depth += 1;
                }
                SyntaxKind::T_RPAREN | SyntaxKind::T_RBRACKET | SyntaxKind::T_RBRACE => {
                    depth = depth.saturating_sub(1);
                }
                SyntaxKind::T_SEMI if depth == 0 => break,
                _ => {}
            }
        }
        if self.pos > start {
            let from = self.tokens.get(start).map_or(0, |(_, sp)| sp.start);
            warn!("recovery skipped {} tokens from offset {from}", self.pos - start);
        }
    }
}

fn starts_definition(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::K_RULE
            | SyntaxKind::K_METHOD
            | SyntaxKind::K_FUNCTION
            | SyntaxKind::K_MODULE
            | SyntaxKind::K_INTERFACE
    )
}
