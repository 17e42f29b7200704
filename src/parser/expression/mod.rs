//! Pratt parser for expressions.
//!
//! Provides [`parse_expression`], a hand-rolled Pratt parser over the
//! significant token stream. The implementation is split across submodules:
//! [`pratt`] hosts the entry points and postfix chains, [`prefix`] handles
//! unary operators and primaries, [`infix`] folds binary operators and the
//! conditional, [`condition`] parses `&&&` predicates and [`numeric`]
//! validates literal text.

mod condition;
mod infix;
mod numeric;
mod pratt;
mod prefix;

pub use numeric::{LiteralError, parse_int_literal, parse_real_literal};
pub use pratt::parse_expression;
