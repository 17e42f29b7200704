//! Prefix operators and primary expressions.

use crate::{Span, SyntaxKind};
use crate::diagnostic::UnsupportedConstruct;
use crate::parser::Parser;
use crate::parser::ast::precedence::prefix_binding_power;
use crate::parser::ast::{
    ActionCtx, ActionValueCtx, Expr, ExprKind, Literal, MemberBind, Sign, TaggedPayload, UnaryOp,
};

use super::numeric::{parse_int_literal, parse_real_literal};

/// Tokens that may begin the operand of `tagged Name`.
///
/// `?` is left out: after a payload-less tag it starts a conditional.
fn starts_tagged_operand(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::T_IDENT
            | SyntaxKind::T_TYPE_IDENT
            | SyntaxKind::T_INT
            | SyntaxKind::T_FILL
            | SyntaxKind::T_REAL
            | SyntaxKind::T_STRING
            | SyntaxKind::T_LPAREN
            | SyntaxKind::T_LBRACE
            | SyntaxKind::K_TAGGED
            | SyntaxKind::K_VALUEOF
    )
}

impl Parser<'_> {
    /// Unary operator or primary. A `+` or `-` directly before an unsized
    /// integer literal becomes the literal's sign.
    pub(super) fn parse_prefix(&mut self) -> Option<Expr> {
        let Some(entry) = self.ts.peek().and_then(prefix_binding_power) else {
            return self.parse_primary();
        };
        let start = self.ts.start();
        self.ts.bump();
        let sign = match entry.op {
            UnaryOp::Plus => Some(Sign::Plus),
            UnaryOp::Neg => Some(Sign::Minus),
            _ => None,
        };
        if let Some(sign) = sign
            && self.ts.at(SyntaxKind::T_INT)
        {
            let mut lit = self.parse_primary()?;
            if let ExprKind::Literal(Literal::Int(int)) = &mut lit.kind
                && int.width.is_none()
            {
                int.sign = Some(sign);
                return Some(Expr::new(lit.kind, self.ts.span_from(start)));
            }
            let operand = self.parse_postfix(lit)?;
            let operand = self.parse_infix(operand, entry.bp)?;
            return Some(Expr::new(
                ExprKind::Unary {
                    op: entry.op,
                    expr: Box::new(operand),
                },
                self.ts.span_from(start),
            ));
        }
        let operand = self.parse_expr(entry.bp)?;
        Some(Expr::new(
            ExprKind::Unary {
                op: entry.op,
                expr: Box::new(operand),
            },
            self.ts.span_from(start),
        ))
    }

    pub(crate) fn parse_primary(&mut self) -> Option<Expr> {
        let start = self.ts.start();
        let Some(kind) = self.ts.peek() else {
            self.ts.error_expected("expression");
            return None;
        };
        let expr_kind = match kind {
            SyntaxKind::T_IDENT => {
                let (name, _) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
                ExprKind::Var(name)
            }
            SyntaxKind::T_TYPE_IDENT => {
                let (name, _) = self.ts.expect_ident(SyntaxKind::T_TYPE_IDENT)?;
                if self.ts.at(SyntaxKind::T_LBRACE) {
                    let members = self.parse_member_binds()?;
                    ExprKind::Struct { name, members }
                } else {
                    ExprKind::TypeRef(name)
                }
            }
            SyntaxKind::T_INT | SyntaxKind::T_REAL | SyntaxKind::T_STRING | SyntaxKind::T_FILL => {
                ExprKind::Literal(self.parse_literal()?)
            }
            SyntaxKind::T_QUESTION => {
                self.ts.bump();
                ExprKind::DontCare
            }
            SyntaxKind::T_LPAREN => {
                self.ts.bump();
                let inner = self.parse_expr(0)?;
                self.ts.expect(SyntaxKind::T_RPAREN)?;
                return Some(Expr::new(inner.kind, self.ts.span_from(start)));
            }
            SyntaxKind::T_LBRACE => ExprKind::Concat(self.parse_concat()?),
            SyntaxKind::K_BEGIN => ExprKind::Block(self.parse_value_block()?),
            SyntaxKind::K_ACTION => ExprKind::ActionBlock(
                self.parse_block_body::<ActionCtx>(SyntaxKind::K_ACTION, SyntaxKind::K_ENDACTION)?,
            ),
            SyntaxKind::K_ACTIONVALUE => {
                ExprKind::ActionValueBlock(self.parse_block_body::<ActionValueCtx>(
                    SyntaxKind::K_ACTIONVALUE,
                    SyntaxKind::K_ENDACTIONVALUE,
                )?)
            }
            SyntaxKind::K_TAGGED => self.parse_tagged()?,
            SyntaxKind::K_INTERFACE => ExprKind::Interface(Box::new(self.parse_interface_expr()?)),
            SyntaxKind::K_VALUEOF => {
                self.ts.bump();
                self.ts.expect(SyntaxKind::T_LPAREN)?;
                let ty = self.parse_type()?;
                self.ts.expect(SyntaxKind::T_RPAREN)?;
                ExprKind::ValueOf(ty)
            }
            SyntaxKind::T_SYSTEM_IDENT => {
                let span = self.skip_system_call();
                self.ts.unsupported(span, UnsupportedConstruct::SystemCall);
                return None;
            }
            _ => {
                self.ts.error_expected("expression");
                return None;
            }
        };
        Some(Expr::new(expr_kind, self.ts.span_from(start)))
    }

    fn parse_literal(&mut self) -> Option<Literal> {
        let (kind, span) = self.ts.bump()?;
        let text = self.ts.slice(&span);
        let parsed = match kind {
            SyntaxKind::T_INT => parse_int_literal(&text).map(Literal::Int),
            SyntaxKind::T_REAL => parse_real_literal(&text).map(Literal::Real),
            SyntaxKind::T_FILL => Ok(Literal::Fill(text == "'1")),
            _ => Ok(Literal::String(
                text.trim_start_matches('"').trim_end_matches('"').to_string(),
            )),
        };
        match parsed {
            Ok(lit) => Some(lit),
            Err(err) => {
                self.ts
                    .error(span, format!("invalid literal `{text}`: {err}"));
                None
            }
        }
    }

    /// Skip `$name [( args )]` and return its span.
    pub(crate) fn skip_system_call(&mut self) -> Span {
        let start = self.ts.start();
        self.ts.bump();
        if self.ts.at(SyntaxKind::T_LPAREN) {
            self.ts.skip_balanced();
        }
        self.ts.span_from(start)
    }

    /// `{ field: expr, ... }` after a struct or tag name.
    fn parse_member_binds(&mut self) -> Option<Vec<MemberBind>> {
        self.ts.expect(SyntaxKind::T_LBRACE)?;
        let mut members = Vec::new();
        loop {
            let start = self.ts.start();
            let (field, _) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
            self.ts.expect(SyntaxKind::T_COLON)?;
            let value = self.parse_expr(0)?;
            members.push(MemberBind {
                field,
                value,
                span: self.ts.span_from(start),
            });
            if self.ts.eat(SyntaxKind::T_COMMA).is_none() {
                break;
            }
        }
        self.ts.expect(SyntaxKind::T_RBRACE)?;
        Some(members)
    }

    fn parse_concat(&mut self) -> Option<Vec<Expr>> {
        self.ts.expect(SyntaxKind::T_LBRACE)?;
        let mut items = Vec::new();
        loop {
            items.push(self.parse_expr(0)?);
            if self.ts.eat(SyntaxKind::T_COMMA).is_none() {
                break;
            }
        }
        self.ts.expect(SyntaxKind::T_RBRACE)?;
        Some(items)
    }

    fn parse_tagged(&mut self) -> Option<ExprKind> {
        self.ts.bump(); // 'tagged'
        let (name, _) = self.ts.expect_ident(SyntaxKind::T_TYPE_IDENT)?;
        let payload = match self.ts.peek() {
            Some(SyntaxKind::T_LBRACE) => TaggedPayload::Struct(self.parse_member_binds()?),
            Some(kind) if starts_tagged_operand(kind) => {
                TaggedPayload::Expr(Box::new(self.parse_postfix_expr()?))
            }
            _ => TaggedPayload::None,
        };
        Some(ExprKind::Tagged { name, payload })
    }
}
