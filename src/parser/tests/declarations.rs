//! Packages, interfaces, modules, methods, rules and functions.

use rstest::{fixture, rstest};

use crate::parser::ast::{
    Body, ExportItem, InterfaceMember, InterfaceStmt, ModuleStmt, PackageStmt, SourceFile,
    StmtKind, TypeFormalKind,
};
use crate::test_util::{assert_single_error, parse_ok};

#[fixture]
fn counter_package() -> &'static str {
    "package Counter;
import FIFO::*, Vector::*;
export Counter(..), mkCounter;

interface Counter;
    method Action incr(Bit#(8) d);
    method Bit#(8) value;
    interface Get#(Bit#(8)) out;
endinterface

module mkCounter(Counter);
    Reg#(Bit#(8)) x <- mkReg(0);
    Reg#(Bit#(8)) y <- mkRegU;
    FIFO#(Bit#(8)) fifo <- mkFIFO;

    rule r (x == 1);
        y <= x + 1;
    endrule

    method Action incr(Bit#(8) d);
        x <= x + d;
    endmethod

    method Bit#(8) value;
        return y;
    endmethod

    interface Get out;
        method ActionValue#(Bit#(8)) get;
            fifo.deq;
            return fifo.first;
        endmethod
    endinterface
endmodule
endpackage : Counter
"
}

fn module_stmts(root: &SourceFile, index: usize) -> &[ModuleStmt] {
    match root.body().stmts.get(index) {
        Some(PackageStmt::Module(def)) => &def.stmts,
        other => panic!("expected a module, got {other:?}"),
    }
}

#[rstest]
fn package_header_and_lists(counter_package: &str) {
    let parsed = parse_ok(counter_package);
    let SourceFile::Package(package) = parsed.root() else {
        panic!("expected a package");
    };
    assert_eq!(package.name, "Counter");
    assert_eq!(package.end_label.as_ref().map(|l| l.name.as_str()), Some("Counter"));
    let imports: Vec<&str> = package
        .body
        .imports
        .iter()
        .flat_map(|i| i.packages.iter().map(String::as_str))
        .collect();
    assert_eq!(imports, ["FIFO", "Vector"]);
    let exports: Vec<ExportItem> = package
        .body
        .exports
        .iter()
        .flat_map(|e| e.items.iter().cloned())
        .collect();
    assert_eq!(
        exports,
        [
            ExportItem::Ident {
                name: "Counter".into(),
                with_members: true
            },
            ExportItem::Ident {
                name: "mkCounter".into(),
                with_members: false
            },
        ]
    );
}

#[rstest]
fn interface_members(counter_package: &str) {
    let parsed = parse_ok(counter_package);
    let Some(PackageStmt::Interface(ifc)) = parsed.root().body().stmts.first() else {
        panic!("expected an interface declaration");
    };
    assert_eq!(ifc.name, "Counter");
    let summary: Vec<(String, usize)> = ifc
        .members
        .iter()
        .map(|m| match m {
            InterfaceMember::Method(proto) => (proto.name.clone(), proto.formals.len()),
            InterfaceMember::Subinterface(sub) => (format!("{}:{}", sub.name, sub.ty.to_source()), 0),
        })
        .collect();
    assert_eq!(
        summary,
        [
            ("incr".to_string(), 1),
            ("value".to_string(), 0),
            ("out:Get#(Bit#(8))".to_string(), 0),
        ]
    );
}

#[rstest]
fn module_body(counter_package: &str) {
    let parsed = parse_ok(counter_package);
    let stmts = module_stmts(parsed.root(), 1);
    assert_eq!(stmts.len(), 7);
    assert!(matches!(stmts.first(), Some(ModuleStmt::Bind(bind)) if bind.name == "x"));

    let Some(ModuleStmt::Rule(rule)) = stmts.get(3) else {
        panic!("expected a rule, got {:?}", stmts.get(3));
    };
    assert_eq!(rule.name, "r");
    assert_eq!(rule.guard.as_ref().map(|g| g.to_sexpr()).as_deref(), Some("(== x 1)"));
    let body: Vec<String> = rule.body.iter().map(|s| s.to_sexpr()).collect();
    assert_eq!(body, ["(<= y (+ x 1))"]);

    let Some(ModuleStmt::Method(incr)) = stmts.get(4) else {
        panic!("expected a method");
    };
    assert!(matches!(&incr.body, Body::Action(stmts) if stmts.len() == 1));
    let Some(ModuleStmt::Method(value)) = stmts.get(5) else {
        panic!("expected a method");
    };
    assert!(matches!(&value.body, Body::Value(stmts) if stmts.len() == 1));

    let Some(ModuleStmt::Subinterface(out)) = stmts.get(6) else {
        panic!("expected a subinterface definition");
    };
    assert_eq!(out.name, "out");
    let Some(InterfaceStmt::Method(get)) = out.stmts.first() else {
        panic!("expected a method in the subinterface");
    };
    assert!(matches!(&get.body, Body::ActionValue(stmts) if stmts.len() == 2));
}

#[test]
fn function_definition() {
    let parsed = parse_ok("function Bit#(8) f(Bit#(8) x); return x + 1; endfunction");
    let Some(PackageStmt::Function(def)) = parsed.root().body().stmts.first() else {
        panic!("expected a function");
    };
    assert_eq!(def.name, "f");
    assert_eq!(def.ret.to_source(), "Bit#(8)");
    assert_eq!(def.formals.len(), 1);
    let Body::Value(stmts) = &def.body else {
        panic!("expected a value body, got {:?}", def.body);
    };
    let rendered: Vec<String> = stmts.iter().map(|s| s.to_sexpr()).collect();
    assert_eq!(rendered, ["(return (+ x 1))"]);
}

#[test]
fn method_with_untyped_formals_and_guard() {
    let src = "module mkA(Put); method put(v) if (ready &&& !full); x <= v; endmethod endmodule";
    let parsed = parse_ok(src);
    let Some(ModuleStmt::Method(def)) = module_stmts(parsed.root(), 0).first() else {
        panic!("expected a method");
    };
    assert!(def.ret.is_none());
    assert!(def.formals.first().is_some_and(|f| f.ty.is_none() && f.name == "v"));
    assert_eq!(
        def.guard.as_ref().map(|g| g.to_sexpr()).as_deref(),
        Some("(&&& ready (! full))")
    );
    assert!(matches!(&def.body, Body::Action(_)));
}

#[rstest]
#[case::action("method Action go; action x <= 1; endaction endmethod", "(action (<= x 1))")]
#[case::actionvalue(
    "method ActionValue#(Bool) go; actionvalue return True; endactionvalue endmethod",
    "(actionvalue (return True))"
)]
#[case::labelled(
    "method Action go; action : blk x <= 1; endaction : blk endmethod",
    "(action (<= x 1))"
)]
#[case::semicolon("method Action go; action x <= 1; endaction; endmethod", "(action (<= x 1))")]
#[case::nested(
    "method Action go; action action x <= 1; endaction endaction endmethod",
    "(action (action (<= x 1)))"
)]
fn method_with_block_body(#[case] method: &str, #[case] expected: &str) {
    let src = format!("module mkA(Ifc); {method} endmodule");
    let parsed = parse_ok(&src);
    let Some(ModuleStmt::Method(def)) = module_stmts(parsed.root(), 0).first() else {
        panic!("expected a method");
    };
    let Body::Block(block) = &def.body else {
        panic!("expected a block body, got {:?}", def.body);
    };
    assert_eq!(block.to_sexpr(), expected);
}

#[test]
fn block_followed_by_statements_is_a_statement_body() {
    let src = "module mkA(Ifc);
    method Action go;
        action x <= 1; endaction
        y <= 2;
    endmethod
endmodule";
    let parsed = parse_ok(src);
    let Some(ModuleStmt::Method(def)) = module_stmts(parsed.root(), 0).first() else {
        panic!("expected a method");
    };
    assert!(matches!(&def.body, Body::Action(stmts) if stmts.len() == 2), "{:?}", def.body);
}

#[test]
fn deeply_nested_block_bodies_parse_once() {
    let mut src = "x <= 1;".to_string();
    for depth in 0..40 {
        src = format!(
            "module mkL{depth}(Empty); method Action m; action {src} endaction Bool done = True; endmethod endmodule"
        );
    }
    let parsed = parse_ok(&src);
    let Some(ModuleStmt::Method(def)) = module_stmts(parsed.root(), 0).first() else {
        panic!("expected a method");
    };
    assert!(matches!(&def.body, Body::Action(stmts) if stmts.len() == 2), "{:?}", def.body);
}

#[test]
fn module_header_parts() {
    let src = "module [Module] mkB#(parameter Bit#(4) w, Bool b)(Ifc ifc, Clock clk); endmodule : mkB";
    let parsed = parse_ok(src);
    let Some(PackageStmt::Module(def)) = parsed.root().body().stmts.first() else {
        panic!("expected a module");
    };
    assert_eq!(def.ctx_type.as_ref().map(|t| t.to_source()).as_deref(), Some("Module"));
    let params: Vec<(bool, &str)> = def
        .params
        .iter()
        .map(|p| (p.parameter, p.name.as_str()))
        .collect();
    assert_eq!(params, [(true, "w"), (false, "b")]);
    let args: Vec<Option<&str>> = def.args.iter().map(|a| a.name.as_deref()).collect();
    assert_eq!(args, [Some("ifc"), Some("clk")]);
    assert_eq!(def.end_label.as_ref().map(|l| l.name.as_str()), Some("mkB"));
}

#[test]
fn module_returns_interface_expression() {
    let src = "module mkC(Status);
    return interface Status;
        method Bool ok;
            return True;
        endmethod
    endinterface;
endmodule";
    let parsed = parse_ok(src);
    let Some(ModuleStmt::Return(expr)) = module_stmts(parsed.root(), 0).first() else {
        panic!("expected a return statement");
    };
    assert_eq!(expr.to_sexpr(), "(interface Status ok)");
}

#[test]
fn parameterised_interface() {
    let src = "interface Pipe#(type a, numeric type n); method Action put(a x); endinterface";
    let parsed = parse_ok(src);
    let Some(PackageStmt::Interface(ifc)) = parsed.root().body().stmts.first() else {
        panic!("expected an interface");
    };
    let formals: Vec<(TypeFormalKind, &str)> = ifc
        .formals
        .iter()
        .map(|f| (f.kind, f.name.as_str()))
        .collect();
    assert_eq!(
        formals,
        [(TypeFormalKind::Type, "a"), (TypeFormalKind::Numeric, "n")]
    );
}

#[test]
fn package_level_variables() {
    let parsed = parse_ok("Integer depth = 4; Bool on; on = True;");
    let kinds: Vec<&str> = parsed
        .root()
        .body()
        .stmts
        .iter()
        .map(|s| match s {
            PackageStmt::VarDecl(_) => "decl",
            PackageStmt::Assign(_) => "assign",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["decl", "decl", "assign"]);
}

#[test]
fn module_level_connections_and_nested_definitions() {
    let src = "module mkTop(Empty);
    Empty sub <- mkSub;
    mkConnection(a, b);
    function Bool pick(Bool p); return p; endfunction
    module mkInner(Empty); endmodule
endmodule";
    let parsed = parse_ok(src);
    let kinds: Vec<&str> = module_stmts(parsed.root(), 0)
        .iter()
        .map(|s| match s {
            ModuleStmt::Bind(_) => "bind",
            ModuleStmt::Expr(_) => "expr",
            ModuleStmt::Function(_) => "function",
            ModuleStmt::Module(_) => "module",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["bind", "expr", "function", "module"]);
}

#[test]
fn rule_body_holds_nested_statements() {
    let src = "module mkA(Empty);
    rule step;
        if (go) begin
            let n = count + 1;
            count <= n;
        end
        else count <= 0;
    endrule
endmodule";
    let parsed = parse_ok(src);
    let Some(ModuleStmt::Rule(rule)) = module_stmts(parsed.root(), 0).first() else {
        panic!("expected a rule");
    };
    assert!(rule.guard.is_none());
    let Some(StmtKind::If(stmt)) = rule.body.first().map(|s| &s.kind) else {
        panic!("expected an if statement");
    };
    assert!(stmt.else_branch.is_some());
}

#[rstest]
#[case::reg_write_at_package("x <= 1;", "register write is not permitted at package level")]
#[case::bind_at_package("let x <- f;", "`<-` binding is not permitted at package level")]
#[case::reg_write_in_module(
    "module mkA(Empty); x <= 1; endmodule",
    "register write is not permitted in a module body"
)]
#[case::missing_endmodule("module mkA(Empty);", "expected `endmodule`, found end of input")]
#[case::stray_closer("endrule", "unexpected `endrule`")]
#[case::trailing_after_package(
    "package P; endpackage function",
    "expected end of input, found `function`"
)]
fn declaration_errors(#[case] src: &str, #[case] expected: &str) {
    let parsed = crate::parse(src);
    assert_single_error(parsed.diagnostics(), expected);
}
