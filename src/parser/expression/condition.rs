//! Condition predicates: one or more expressions joined by `&&&`.
//!
//! `if`, rule guards, method guards and the conditional operator all use the
//! same predicate grammar. Inside an expression a `&&&` chain is only a
//! conditional when a `?` follows it; otherwise the chain belongs to the
//! enclosing guard and the expression ends before the first `&&&`.

use crate::SyntaxKind;
use crate::parser::Parser;
use crate::parser::ast::precedence::COND_BP;
use crate::parser::ast::{CondPredicate, Expr};

impl Parser<'_> {
    /// `expr (&&& expr)*`
    pub(crate) fn parse_cond_predicate(&mut self) -> Option<CondPredicate> {
        let start = self.ts.start();
        let mut conjuncts = vec![self.parse_expr(0)?];
        while self.ts.eat(SyntaxKind::T_AMP_AMP_AMP).is_some() {
            conjuncts.push(self.parse_expr(0)?);
        }
        Some(CondPredicate {
            conjuncts,
            span: self.ts.span_from(start),
        })
    }

    /// Speculatively read `&&& e ...` after `first`.
    ///
    /// Returns `Ok` with the conditional when the chain is followed by `?`.
    /// Otherwise the cursor and diagnostics are restored and `first` is
    /// handed back unchanged.
    pub(super) fn try_predicate_conditional(&mut self, first: Expr) -> Result<Option<Expr>, Expr> {
        let cp = self.checkpoint();
        let start = first.span.start;
        let mut rest = Vec::new();
        let mut complete = true;
        while self.ts.eat(SyntaxKind::T_AMP_AMP_AMP).is_some() {
            let Some(expr) = self.parse_expr(COND_BP + 1) else {
                complete = false;
                break;
            };
            rest.push(expr);
        }
        if !complete || rest.is_empty() || !self.ts.at(SyntaxKind::T_QUESTION) {
            self.rewind(cp);
            return Err(first);
        }
        let mut conjuncts = vec![first];
        conjuncts.extend(rest);
        let predicate = CondPredicate {
            conjuncts,
            span: self.ts.span_from(start),
        };
        Ok(self.finish_conditional(predicate))
    }
}
