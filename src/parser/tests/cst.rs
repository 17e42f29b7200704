//! Lossless syntax tree built alongside the AST.

use rstest::rstest;

use crate::language::SyntaxNode;
use crate::{SyntaxKind, parse};

fn child_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.children().map(|n| n.kind()).collect()
}

#[rstest]
#[case::package("package P; // note\nimport FIFO::*;\nendpackage\n")]
#[case::module("module mkA(Empty);\n  rule r (c);\n    x <= 1; /* set */\n  endrule\nendmodule")]
#[case::with_errors("module mkA(Empty); rule r; x <= ; endrule endmodule")]
#[case::lexer_error("function Bool f(Bool x); return x ` x; endfunction")]
#[case::unterminated("module mkA(Empty); rule r; x <= 1;")]
fn text_round_trips(#[case] src: &str) {
    let parsed = parse(src);
    assert_eq!(parsed.syntax().kind(), SyntaxKind::N_SOURCE_FILE);
    assert_eq!(parsed.syntax().text().to_string(), src);
}

#[test]
fn declarations_become_nested_nodes() {
    let src = "package P;
import FIFO::*;
module mkA(Empty);
    Bool flag = True;
    rule r;
        x <= 1;
    endrule
    method Action go;
        x <= 0;
    endmethod
endmodule
endpackage";
    let parsed = parse(src);
    let root = parsed.syntax();
    assert_eq!(child_kinds(&root), [SyntaxKind::N_PACKAGE]);
    let Some(package) = root.first_child() else {
        panic!("package node missing");
    };
    assert_eq!(
        child_kinds(&package),
        [SyntaxKind::N_IMPORT_DECL, SyntaxKind::N_MODULE_DEF]
    );
    let Some(module) = package.children().nth(1) else {
        panic!("module node missing");
    };
    assert_eq!(
        child_kinds(&module),
        [
            SyntaxKind::N_VAR_DECL,
            SyntaxKind::N_RULE,
            SyntaxKind::N_METHOD_DEF
        ]
    );
    let rule = module.children().nth(1).map(|n| n.text().to_string());
    assert_eq!(rule.as_deref(), Some("rule r;\n        x <= 1;\n    endrule"));
}

#[test]
fn block_bodied_method_adds_one_node() {
    let src = "interface Ifc; method Action go; endinterface
module mkA(Ifc);
    method Action go;
        action
            x <= 1;
        endaction
    endmethod
endmodule";
    let parsed = parse(src);
    assert!(parsed.is_ok(), "{:?}", parsed.diagnostics());
    let kinds: Vec<SyntaxKind> = parsed.syntax().descendants().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        [
            SyntaxKind::N_SOURCE_FILE,
            SyntaxKind::N_INTERFACE_DECL,
            SyntaxKind::N_MODULE_DEF,
            SyntaxKind::N_METHOD_DEF
        ]
    );
}

#[test]
fn failed_definitions_have_no_node() {
    let parsed = parse("function Bool f(Bool x); return x;");
    assert!(!parsed.is_ok());
    let kinds = child_kinds(&parsed.syntax());
    assert!(!kinds.contains(&SyntaxKind::N_FUNCTION_DEF));
}
