//! Build a `rowan` green tree from tokens and declaration spans.

use log::warn;
use rowan::{GreenNode, GreenNodeBuilder, Language};

use crate::{BsvLanguage, Span, SyntaxKind};

use super::spans::NodeSpans;

fn validate_token_span(span: &Span, src_len: usize) -> bool {
    let ok = span.start <= span.end && span.end <= src_len;
    if !ok {
        warn!("token span {span:?} out of bounds for source of length {src_len}");
    }
    ok
}

/// Finish every open node that ends at or before `pos`.
fn close_finished(builder: &mut GreenNodeBuilder<'_>, open: &mut Vec<usize>, pos: usize) {
    while open.last().is_some_and(|end| *end <= pos) {
        open.pop();
        builder.finish_node();
    }
}

/// Construct the CST from the full token stream and recorded node spans.
///
/// Every token, trivia and lexer error text included, becomes a leaf, so the
/// text of the root always equals `src`. Trivia between declarations stays at
/// the outer level.
pub(crate) fn build_green_tree(
    tokens: &[(SyntaxKind, Span)],
    src: &str,
    nodes: &NodeSpans,
) -> GreenNode {
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(BsvLanguage::kind_to_raw(SyntaxKind::N_SOURCE_FILE));

    let mut pending = nodes.sorted().into_iter().peekable();
    let mut open: Vec<usize> = Vec::new();

    for (kind, span) in tokens {
        if !validate_token_span(span, src.len()) {
            continue;
        }
        close_finished(&mut builder, &mut open, span.start);
        while let Some((node_kind, node_span)) = pending.next_if(|(_, s)| s.start <= span.start) {
            if node_span.end <= span.start {
                warn!("dropping {node_kind:?} node with stale span {node_span:?}");
                continue;
            }
            builder.start_node(BsvLanguage::kind_to_raw(node_kind));
            open.push(node_span.end);
        }
        push_token(&mut builder, *kind, span, src);
    }

    for _ in open {
        builder.finish_node();
    }
    builder.finish_node();
    builder.finish()
}

fn push_token(builder: &mut GreenNodeBuilder<'_>, kind: SyntaxKind, span: &Span, src: &str) {
    let text = src.get(span.clone()).unwrap_or_else(|| {
        warn!(
            "token span {span:?} is not on a character boundary in source of length {}",
            src.len()
        );
        ""
    });

    let raw = BsvLanguage::kind_to_raw(kind);
    if kind == SyntaxKind::N_ERROR {
        builder.start_node(raw);
        builder.token(raw, text);
        builder.finish_node();
    } else {
        builder.token(raw, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::SyntaxNode;
    use crate::tokenizer::lex;

    #[test]
    fn nodes_wrap_their_tokens_but_not_trailing_trivia() {
        let src = "rule r; endrule  // tail\n";
        let lexed = lex(src);
        let mut nodes = NodeSpans::default();
        nodes.push(SyntaxKind::N_RULE, 0..15);
        let root = SyntaxNode::new_root(build_green_tree(&lexed.tokens, src, &nodes));
        assert_eq!(root.text().to_string(), src);
        let rule = root.children().next().map(|n| (n.kind(), n.text().to_string()));
        assert_eq!(rule, Some((SyntaxKind::N_RULE, "rule r; endrule".to_string())));
    }

    #[test]
    fn lexer_errors_become_error_nodes() {
        let src = "x ` y";
        let lexed = lex(src);
        let root = SyntaxNode::new_root(build_green_tree(&lexed.tokens, src, &NodeSpans::default()));
        assert!(root.children().any(|n| n.kind() == SyntaxKind::N_ERROR));
        assert_eq!(root.text().to_string(), src);
    }
}
