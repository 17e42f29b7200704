//! Operator precedence and associativity.

use rstest::rstest;

use crate::test_util::expr_sexpr;

#[rstest]
#[case::mul_over_add("1 + 2 * 3", "(+ 1 (* 2 3))")]
#[case::and_over_or("a || b && c", "(|| a (&& b c))")]
#[case::left_assoc_sub("a - b - c", "(- (- a b) c)")]
#[case::left_assoc_div("a / b / c", "(/ (/ a b) c)")]
#[case::add_over_shift("x << 1 + 2", "(<< x (+ 1 2))")]
#[case::shift_over_relational("a < b >> 1", "(< a (>> b 1))")]
#[case::relational_over_equality("a < b == c", "(== (< a b) c)")]
#[case::equality_over_bitand("a == b & c", "(& (== a b) c)")]
#[case::bitwise_ladder("a & b | c ^ d", "(| (& a b) (^ c d))")]
#[case::xnor_between_xor_and_or("a ^ b ~^ c | d", "(| (^~ (^ a b) c) d)")]
#[case::bitor_over_logical_and("a | b && c", "(&& (| a b) c)")]
#[case::parens_override("(1 + 2) * 3", "(* (+ 1 2) 3)")]
fn binary_operators(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(expr_sexpr(src), expected);
}

#[rstest]
#[case::unary_binds_tighter("-a * b", "(* (- a) b)")]
#[case::not_before_and("!a && b", "(&& (! a) b)")]
#[case::reduction("&x | y", "(| (& x) y)")]
#[case::nested_unary("~ ~x", "(~ (~ x))")]
#[case::unary_over_postfix("-a[0]", "(- ([] a 0))")]
fn unary_operators(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(expr_sexpr(src), expected);
}

#[rstest]
#[case::simple("c ? a : b", "(? c a b)")]
#[case::right_nested("p ? a : q ? b : c", "(? p a (? q b c))")]
#[case::binary_predicate("a + b ? x : y", "(? (+ a b) x y)")]
#[case::branches_take_full_expressions("c ? a || b : d && e", "(? c (|| a b) (&& d e))")]
#[case::nested_in_then("p ? (q ? a : b) : c", "(? p (? q a b) c)")]
#[case::conjunct_predicate("x &&& y ? a : b", "(? (&&& x y) a b)")]
fn conditional(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(expr_sexpr(src), expected);
}

#[rstest]
#[case::select_then_add("a[3:0] + b", "(+ ([:] a 3 0) b)")]
#[case::call_then_method("f(a, b).g(1)", "(method (call f a b) g 1)")]
#[case::field_then_index("s.field[2]", "([] (. s field) 2)")]
#[case::method_without_args("fifo.first + 1", "(+ (. fifo first) 1)")]
fn postfix_chains(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(expr_sexpr(src), expected);
}
