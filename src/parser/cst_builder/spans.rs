//! Declaration spans recorded while parsing.
//!
//! `NodeSpans` collects the byte ranges of every declaration the parser
//! completed, tagged with the node kind to open in the CST. Declarations nest
//! (a rule inside a module inside a package), so the list is ordered with
//! outer nodes before the nodes they contain.

use crate::{Span, SyntaxKind};

#[derive(Debug, Clone, Default)]
pub(crate) struct NodeSpans {
    spans: Vec<(SyntaxKind, Span)>,
}

impl NodeSpans {
    /// Record a node. Empty spans are ignored.
    pub(crate) fn push(&mut self, kind: SyntaxKind, span: Span) {
        if span.start < span.end {
            self.spans.push((kind, span));
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.spans.len()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.spans.truncate(len);
    }

    /// Spans sorted by start, longest first, so that an enclosing node is
    /// opened before its children.
    pub(crate) fn sorted(&self) -> Vec<(SyntaxKind, Span)> {
        let mut out = self.spans.clone();
        out.sort_by(|(_, a), (_, b)| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_nodes_come_first() {
        let mut spans = NodeSpans::default();
        spans.push(SyntaxKind::N_RULE, 10..20);
        spans.push(SyntaxKind::N_MODULE_DEF, 0..30);
        spans.push(SyntaxKind::N_METHOD_DEF, 0..8);
        let kinds: Vec<SyntaxKind> = spans.sorted().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            [
                SyntaxKind::N_MODULE_DEF,
                SyntaxKind::N_METHOD_DEF,
                SyntaxKind::N_RULE
            ]
        );
    }

    #[test]
    fn empty_spans_are_dropped() {
        let mut spans = NodeSpans::default();
        spans.push(SyntaxKind::N_RULE, 4..4);
        assert_eq!(spans.len(), 0);
    }
}
