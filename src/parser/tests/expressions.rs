//! Primary expressions, literals and expression-level diagnostics.

use rstest::rstest;

use crate::diagnostic::{DiagnosticKind, UnsupportedConstruct};
use crate::parse_expression;
use crate::parser::ast::{ExprKind, Literal, TaggedPayload};
use crate::test_util::{assert_single_error, expr_sexpr};

#[rstest]
#[case::sized_hex("8'hFF", "8'hFF")]
#[case::separators_dropped("8'hF_F", "8'hFF")]
#[case::unsized_base("'b1010", "'b1010")]
#[case::decimal("42", "42")]
#[case::negative_unsized("-5", "-5")]
#[case::negated_sized("- 8'd5", "(- 8'd5)")]
#[case::fill_ones("'1", "'1")]
#[case::fill_zeros("'0", "'0")]
#[case::real("2.5e-3", "2.5e-3")]
#[case::string("\"hi\"", "\"hi\"")]
#[case::dont_care("?", "?")]
fn literals(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(expr_sexpr(src), expected);
}

#[test]
fn negative_literal_keeps_its_sign() {
    let expr = parse_expression("-5").unwrap_or_else(|e| panic!("{e:?}"));
    let ExprKind::Literal(Literal::Int(int)) = expr.kind else {
        panic!("expected an integer literal, got {expr:?}");
    };
    assert_eq!(int.value(), Some(5));
    assert_eq!(expr.span, 0..2);
}

#[rstest]
#[case::struct_literal("MyStruct{a: 1, b: 2}", "(struct MyStruct (a 1) (b 2))")]
#[case::concat("{a, b, 2'b01}", "(concat a b 2'b01)")]
#[case::nested_concat("{a, {b, c}}", "(concat a (concat b c))")]
#[case::call("f(x, y + 1)", "(call f x (+ y 1))")]
#[case::constructor_call("mkReg(0)", "(call mkReg 0)")]
#[case::type_ref("True", "True")]
#[case::value_of("valueOf(Bit#(8))", "(valueOf Bit#(8))")]
fn primaries(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(expr_sexpr(src), expected);
}

#[rstest]
#[case::with_operand("tagged Valid 5", "(tagged Valid 5)")]
#[case::without_operand("tagged Invalid", "(tagged Invalid)")]
#[case::struct_payload("tagged Point {x: 1, y: 2}", "(tagged Point (x 1) (y 2))")]
#[case::operand_with_postfix("tagged Valid f(x)", "(tagged Valid (call f x))")]
#[case::before_conditional("tagged Invalid ? a : b", "(? (tagged Invalid) a b)")]
#[case::operand_then_operator("tagged Valid x + 1", "(+ (tagged Valid x) 1)")]
fn tagged_unions(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(expr_sexpr(src), expected);
}

#[test]
fn tagged_payload_shape() {
    let expr = parse_expression("tagged Invalid").unwrap_or_else(|e| panic!("{e:?}"));
    assert!(matches!(
        expr.kind,
        ExprKind::Tagged {
            payload: TaggedPayload::None,
            ..
        }
    ));
}

#[rstest]
#[case::let_then_result("begin let y = x + 1; y * 2; end", "(begin (decl let (= y (+ x 1))) (* y 2))")]
#[case::result_only("begin x end", "(begin x)")]
#[case::result_with_semicolon("begin x; end", "(begin x)")]
#[case::typed_decl("begin Bool t = !x; t; end", "(begin (decl Bool (= t (! x))) t)")]
#[case::assignment("begin y = 1; y + x; end", "(begin (= y 1) (+ y x))")]
#[case::relational_result("begin a <= b end", "(begin (<= a b))")]
fn value_blocks(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(expr_sexpr(src), expected);
}

#[test]
fn value_block_labels_are_recorded() {
    let expr = parse_expression("begin : blk x end : other").unwrap_or_else(|e| panic!("{e:?}"));
    let ExprKind::Block(block) = expr.kind else {
        panic!("expected a value block, got {expr:?}");
    };
    assert_eq!(block.labels.open.map(|l| l.name).as_deref(), Some("blk"));
    assert_eq!(block.labels.close.map(|l| l.name).as_deref(), Some("other"));
}

#[rstest]
#[case::action("action x <= 1; y <= 2; endaction", "(action (<= x 1) (<= y 2))")]
#[case::actionvalue("actionvalue fifo.deq; return fifo.first; endactionvalue", "(actionvalue (. fifo deq) (return (. fifo first)))")]
fn action_blocks(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(expr_sexpr(src), expected);
}

#[test]
fn invalid_literal_digit_is_reported() {
    let errors = parse_expression("8'hGG").err().unwrap_or_default();
    let diag = assert_single_error(
        &errors,
        "invalid literal `8'hGG`: digit `G` is not valid in a hexadecimal literal",
    );
    assert_eq!(diag.kind, DiagnosticKind::Syntax);
    assert_eq!(diag.span, 0..5);
}

#[rstest]
#[case::missing_operand("1 +", "expected expression, found end of input")]
#[case::unclosed_paren("(a + b", "expected `)`, found end of input")]
#[case::missing_else("c ? a", "expected `:`, found end of input")]
#[case::trailing_tokens("a b", "expected end of input, found identifier")]
fn syntax_errors(#[case] src: &str, #[case] expected: &str) {
    let errors = parse_expression(src).err().unwrap_or_default();
    assert_single_error(&errors, expected);
}

#[rstest]
#[case::system_function("$time", UnsupportedConstruct::SystemCall)]
#[case::pattern_match("x matches tagged Valid .v", UnsupportedConstruct::PatternMatch)]
fn unsupported_expressions(#[case] src: &str, #[case] construct: UnsupportedConstruct) {
    let errors = parse_expression(src).err().unwrap_or_default();
    let diag = errors.first().unwrap_or_else(|| panic!("no diagnostic for {src}"));
    assert_eq!(diag.kind, DiagnosticKind::Unsupported(construct));
}
