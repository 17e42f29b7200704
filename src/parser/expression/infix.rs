//! Binary operators and the conditional expression.

use crate::SyntaxKind;
use crate::diagnostic::UnsupportedConstruct;
use crate::parser::Parser;
use crate::parser::ast::precedence::{COND_BP, infix_binding_power};
use crate::parser::ast::{CondPredicate, Expr, ExprKind};

impl Parser<'_> {
    /// Fold binary operators whose left binding power is at least `min_bp`.
    pub(crate) fn parse_infix(&mut self, mut lhs: Expr, min_bp: u8) -> Option<Expr> {
        loop {
            let Some(kind) = self.ts.peek() else { break };
            match kind {
                SyntaxKind::T_QUESTION if COND_BP >= min_bp => {
                    let span = lhs.span.clone();
                    let predicate = CondPredicate {
                        conjuncts: vec![lhs],
                        span,
                    };
                    lhs = self.finish_conditional(predicate)?;
                }
                SyntaxKind::T_AMP_AMP_AMP if COND_BP >= min_bp => {
                    match self.try_predicate_conditional(lhs) {
                        Ok(cond) => lhs = cond?,
                        Err(original) => {
                            lhs = original;
                            break;
                        }
                    }
                }
                SyntaxKind::K_MATCHES => {
                    let start = lhs.span.start;
                    self.ts.bump();
                    let span = self.ts.span_from(start);
                    self.ts.unsupported(span, UnsupportedConstruct::PatternMatch);
                    return None;
                }
                _ => {
                    let Some(entry) = infix_binding_power(kind) else {
                        break;
                    };
                    if entry.l_bp < min_bp {
                        break;
                    }
                    self.ts.bump();
                    let rhs = self.parse_expr(entry.r_bp)?;
                    let span = lhs.span.start..rhs.span.end;
                    lhs = Expr::new(
                        ExprKind::Binary {
                            op: entry.op,
                            lhs: Box::new(lhs),
                            rhs: Box::new(rhs),
                        },
                        span,
                    );
                }
            }
        }
        Some(lhs)
    }

    /// `? then : else` after a parsed predicate. The else branch is parsed
    /// at the conditional's own power so that `?:` nests to the right.
    pub(super) fn finish_conditional(&mut self, predicate: CondPredicate) -> Option<Expr> {
        let start = predicate.span.start;
        self.ts.expect(SyntaxKind::T_QUESTION)?;
        let then_branch = self.parse_expr(0)?;
        self.ts.expect(SyntaxKind::T_COLON)?;
        let else_branch = self.parse_expr(COND_BP)?;
        Some(Expr::new(
            ExprKind::Cond {
                predicate,
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            self.ts.span_from(start),
        ))
    }
}
