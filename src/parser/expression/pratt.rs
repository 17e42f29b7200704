//! Core Pratt loop, postfix chains and the standalone entry point.

use crate::SyntaxKind;
use crate::diagnostic::Diagnostic;
use crate::parser::Parser;
use crate::parser::ast::{Expr, ExprKind};
use crate::tokenizer::lex;

/// Parse a source string into an [`Expr`].
///
/// The whole input must be one expression.
///
/// # Errors
/// Returns every lexical and syntax diagnostic when parsing fails.
///
/// # Examples
///
/// ```rust
/// use bsvparse::parse_expression;
///
/// let expr = parse_expression("a[3:0] + b").map(|e| e.to_sexpr());
/// assert_eq!(expr.as_deref(), Ok("(+ ([:] a 3 0) b)"));
/// ```
#[must_use = "discarding the Result will ignore parse errors"]
pub fn parse_expression(src: &str) -> Result<Expr, Vec<Diagnostic>> {
    let lexed = lex(src);
    let mut parser = Parser::new(src, lexed.significant(), false);
    let expr = parser.parse_expr(0);
    if expr.is_some() && !parser.ts.at_eof() {
        parser.ts.error_expected("end of input");
    }
    let (errors, _) = parser.finish();
    let mut diagnostics: Vec<Diagnostic> =
        lexed.errors.into_iter().map(Diagnostic::from).collect();
    diagnostics.extend(errors);
    match expr {
        Some(expr) if diagnostics.is_empty() => Ok(expr),
        _ => {
            if diagnostics.is_empty() {
                diagnostics.push(Diagnostic::syntax(0..src.len(), "invalid expression"));
            }
            diagnostics.sort_by_key(|d| d.span.start);
            Err(diagnostics)
        }
    }
}

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self, min_bp: u8) -> Option<Expr> {
        let lhs = self.parse_prefix()?;
        let lhs = self.parse_postfix(lhs)?;
        self.parse_infix(lhs, min_bp)
    }

    /// A primary with its postfix chain and no operators. Statements parse
    /// their target this way before deciding between `=`, `<=` and `<-`.
    pub(crate) fn parse_postfix_expr(&mut self) -> Option<Expr> {
        let lhs = self.parse_primary()?;
        self.parse_postfix(lhs)
    }

    // Postfix forms bind tighter than every operator, so they chain directly
    // onto the operand.
    pub(crate) fn parse_postfix(&mut self, mut lhs: Expr) -> Option<Expr> {
        loop {
            lhs = match self.ts.peek() {
                Some(SyntaxKind::T_LPAREN) => self.parse_call_postfix(lhs)?,
                Some(SyntaxKind::T_LBRACKET) => self.parse_select_postfix(lhs)?,
                Some(SyntaxKind::T_DOT) => self.parse_dot_postfix(lhs)?,
                _ => break,
            };
        }
        Some(lhs)
    }

    fn parse_call_postfix(&mut self, lhs: Expr) -> Option<Expr> {
        let start = lhs.span.start;
        let args = self.parse_args()?;
        Some(Expr::new(
            ExprKind::Call {
                callee: Box::new(lhs),
                args,
            },
            self.ts.span_from(start),
        ))
    }

    fn parse_select_postfix(&mut self, lhs: Expr) -> Option<Expr> {
        let start = lhs.span.start;
        self.ts.bump(); // '['
        let hi = self.parse_expr(0)?;
        let lo = if self.ts.eat(SyntaxKind::T_COLON).is_some() {
            Some(Box::new(self.parse_expr(0)?))
        } else {
            None
        };
        self.ts.expect(SyntaxKind::T_RBRACKET)?;
        Some(Expr::new(
            ExprKind::BitSelect {
                expr: Box::new(lhs),
                hi: Box::new(hi),
                lo,
            },
            self.ts.span_from(start),
        ))
    }

    fn parse_dot_postfix(&mut self, lhs: Expr) -> Option<Expr> {
        let start = lhs.span.start;
        self.ts.bump(); // '.'
        let (name, _) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
        let kind = if self.ts.at(SyntaxKind::T_LPAREN) {
            let args = self.parse_args()?;
            ExprKind::MethodCall {
                recv: Box::new(lhs),
                method: name,
                args,
            }
        } else {
            ExprKind::Field {
                expr: Box::new(lhs),
                field: name,
            }
        };
        Some(Expr::new(kind, self.ts.span_from(start)))
    }

    /// `( [expr (, expr)*] )`
    pub(crate) fn parse_args(&mut self) -> Option<Vec<Expr>> {
        self.ts.expect(SyntaxKind::T_LPAREN)?;
        let mut args = Vec::new();
        if self.ts.eat(SyntaxKind::T_RPAREN).is_some() {
            return Some(args);
        }
        loop {
            args.push(self.parse_expr(0)?);
            if self.ts.eat(SyntaxKind::T_COMMA).is_none() {
                break;
            }
        }
        self.ts.expect(SyntaxKind::T_RPAREN)?;
        Some(args)
    }
}
