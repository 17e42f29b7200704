//! End-to-end parsing of complete source units.

mod test_util;

use bsvparse::ast::{Body, ModuleStmt, PackageStmt, SourceFile};
use bsvparse::{
    DiagnosticKind, LineIndex, ParseOptions, Severity, SyntaxKind, UnsupportedConstruct, parse,
    parse_with_options,
};
use rstest::{fixture, rstest};
use test_util::{messages, unsupported};

#[fixture]
fn fifo_package() -> &'static str {
    r#"package Buffer;

import FIFOF::*;
export Buffer(..);
export mkBuffer;

interface Buffer#(type t);
    method Action put(t x);
    method ActionValue#(t) get;
    method Bool notEmpty;
endinterface

(* synthesize *)
module mkBuffer(Buffer#(Bit#(8)));
    FIFOF#(Bit#(8)) q <- mkFIFOF;
    Reg#(UInt#(16)) seen <- mkReg(0);

    function Bool isZero(Bit#(8) v);
        return v == 0;
    endfunction

    rule count (q.notEmpty &&& !isZero(q.first));
        seen <= seen + 1;
    endrule : count

    method Action put(x) if (q.notFull);
        q.enq(x);
    endmethod

    method ActionValue#(Bit#(8)) get;
        q.deq;
        return q.first;
    endmethod

    method Bool notEmpty = q.notEmpty;
endmodule : mkBuffer

endpackage : Buffer
"#
}

#[rstest]
fn complete_package_reports_only_unsupported_forms(fifo_package: &str) {
    let parsed = parse(fifo_package);
    assert_eq!(
        unsupported(parsed.diagnostics()),
        [UnsupportedConstruct::AttributeInstance]
    );
    assert_eq!(parsed.diagnostics().len(), 2, "{:?}", parsed.diagnostics());
    assert_eq!(parsed.syntax().text().to_string(), fifo_package);
}

#[rstest]
fn package_structure(fifo_package: &str) {
    let parsed = parse(fifo_package);
    let SourceFile::Package(package) = parsed.root() else {
        panic!("expected a package");
    };
    assert_eq!(package.body.exports.len(), 2);
    assert_eq!(package.body.imports.len(), 1);
    let Some(PackageStmt::Module(module)) = package.body.stmts.get(1) else {
        panic!("expected the module second, got {:?}", package.body.stmts);
    };
    assert_eq!(module.name, "mkBuffer");
    let names: Vec<&str> = module
        .stmts
        .iter()
        .filter_map(|s| match s {
            ModuleStmt::Method(def) => Some(def.name.as_str()),
            ModuleStmt::Rule(rule) => Some(rule.name.as_str()),
            ModuleStmt::Function(def) => Some(def.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, ["isZero", "count", "put", "get"]);
    let Some(ModuleStmt::Method(get)) = module.stmts.iter().find(
        |s| matches!(s, ModuleStmt::Method(def) if def.name == "get"),
    ) else {
        panic!("get missing");
    };
    assert!(matches!(&get.body, Body::ActionValue(stmts) if stmts.len() == 2));
}

#[rstest]
fn shorthand_method_is_reported(fifo_package: &str) {
    let parsed = parse(fifo_package);
    let syntax: Vec<&str> = parsed
        .diagnostics()
        .iter()
        .filter(|d| d.kind == DiagnosticKind::Syntax)
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(syntax, ["expected `;`, found `=`"]);
}

#[test]
fn diagnostics_resolve_to_lines_and_columns() {
    let src = "module mkA(Empty);\n  rule r;\n    x <= ;\n  endrule\nendmodule\n";
    let parsed = parse(src);
    let lines = LineIndex::new(src);
    let [diag] = parsed.diagnostics() else {
        panic!("expected one diagnostic, got {:?}", parsed.diagnostics());
    };
    let pos = diag.position(&lines);
    assert_eq!((pos.line, pos.column), (3, 10));
    assert_eq!(diag.severity(), Severity::Error);
    assert_eq!(diag.to_string(), "syntax error: expected expression, found `;`");
}

#[test]
fn first_error_mode_keeps_the_tree_lossless() {
    let src = "module mkA(Empty); rule r; x <= ; y <= ; endrule endmodule";
    let all = parse(src);
    let first = parse_with_options(src, ParseOptions::first_error());
    assert_eq!(messages(all.diagnostics()).len(), 2);
    assert_eq!(messages(first.diagnostics()), ["expected expression, found `;`"]);
    assert_eq!(first.syntax().text().to_string(), src);
}

#[test]
fn bare_items_without_package() {
    let src = "import Vector::*;\nfunction Bool f(Bool b); return b; endfunction\n";
    let parsed = parse(src);
    assert!(parsed.is_ok(), "{:?}", parsed.diagnostics());
    assert!(matches!(parsed.root(), SourceFile::Items(_)));
    let kinds: Vec<SyntaxKind> = parsed.syntax().children().map(|n| n.kind()).collect();
    assert_eq!(kinds, [SyntaxKind::N_IMPORT_DECL, SyntaxKind::N_FUNCTION_DEF]);
}

#[test]
fn empty_input_is_valid() {
    let parsed = parse("");
    assert!(parsed.is_ok());
    assert!(parsed.root().body().stmts.is_empty());
}

#[rstest]
#[case::bad_import("import FIFO;")]
#[case::bad_export("export ;")]
#[case::missing_separator("export a b;")]
fn malformed_lists_report_one_error(#[case] src: &str) {
    let parsed = parse(src);
    let [diag] = parsed.diagnostics() else {
        panic!("expected one diagnostic, got {:?}", parsed.diagnostics());
    };
    assert_eq!(diag.kind, DiagnosticKind::Syntax);
    assert!(diag.message.starts_with("expected "), "{}", diag.message);
    assert!(parsed.root().body().exports.is_empty());
    assert!(parsed.root().body().imports.is_empty());
}
