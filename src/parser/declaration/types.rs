//! Types, type formals and value formals.

use crate::SyntaxKind;
use crate::diagnostic::UnsupportedConstruct;
use crate::parser::Parser;
use crate::parser::ast::{Formal, Type, TypeFormal, TypeFormalKind, TypeKind};

impl Parser<'_> {
    /// `Name [#(type, ...)]`, a type variable, a numeric type or
    /// `bit [hi:lo]`.
    pub(crate) fn parse_type(&mut self) -> Option<Type> {
        let start = self.ts.start();
        let kind = match self.ts.peek() {
            Some(SyntaxKind::T_TYPE_IDENT) => {
                let (name, _) = self.ts.expect_ident(SyntaxKind::T_TYPE_IDENT)?;
                let params = if self.ts.eat(SyntaxKind::T_HASH).is_some() {
                    self.parse_type_params()?
                } else {
                    Vec::new()
                };
                TypeKind::Named { name, params }
            }
            Some(SyntaxKind::T_IDENT) => {
                let (name, _) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
                TypeKind::Var(name)
            }
            Some(SyntaxKind::T_INT) => {
                let (_, span) = self.ts.bump()?;
                let text = self.ts.slice(&span);
                let Ok(n) = text.replace('_', "").parse::<u64>() else {
                    self.ts
                        .error(span, format!("`{text}` is not a numeric type"));
                    return None;
                };
                TypeKind::Nat(n)
            }
            Some(SyntaxKind::K_BIT) => {
                self.ts.bump();
                if self.ts.eat(SyntaxKind::T_LBRACKET).is_some() {
                    let hi = self.parse_bit_bound()?;
                    self.ts.expect(SyntaxKind::T_COLON)?;
                    let lo = self.parse_bit_bound()?;
                    self.ts.expect(SyntaxKind::T_RBRACKET)?;
                    TypeKind::Bit { hi, lo }
                } else {
                    TypeKind::Named {
                        name: "bit".to_string(),
                        params: Vec::new(),
                    }
                }
            }
            _ => {
                self.ts.error_expected("type");
                return None;
            }
        };
        Some(Type {
            kind,
            span: self.ts.span_from(start),
        })
    }

    fn parse_type_params(&mut self) -> Option<Vec<Type>> {
        self.ts.expect(SyntaxKind::T_LPAREN)?;
        let mut params = vec![self.parse_type()?];
        while self.ts.eat(SyntaxKind::T_COMMA).is_some() {
            params.push(self.parse_type()?);
        }
        self.ts.expect(SyntaxKind::T_RPAREN)?;
        Some(params)
    }

    fn parse_bit_bound(&mut self) -> Option<u64> {
        let span = self.ts.expect(SyntaxKind::T_INT)?;
        let text = self.ts.slice(&span);
        let Ok(n) = text.replace('_', "").parse::<u64>() else {
            self.ts.error(span, format!("`{text}` is not a bit index"));
            return None;
        };
        Some(n)
    }

    /// `#( [numeric|string] type name, ... )` after an interface name.
    pub(crate) fn parse_type_formals(&mut self) -> Option<Vec<TypeFormal>> {
        self.ts.expect(SyntaxKind::T_HASH)?;
        self.ts.expect(SyntaxKind::T_LPAREN)?;
        let mut formals = Vec::new();
        loop {
            let start = self.ts.start();
            let kind = if self.ts.eat(SyntaxKind::K_NUMERIC).is_some() {
                TypeFormalKind::Numeric
            } else if self.ts.eat(SyntaxKind::K_STRING).is_some() {
                TypeFormalKind::String
            } else {
                TypeFormalKind::Type
            };
            self.ts.expect(SyntaxKind::K_TYPE)?;
            let (name, _) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
            formals.push(TypeFormal {
                kind,
                name,
                span: self.ts.span_from(start),
            });
            if self.ts.eat(SyntaxKind::T_COMMA).is_none() {
                break;
            }
        }
        self.ts.expect(SyntaxKind::T_RPAREN)?;
        Some(formals)
    }

    /// `( [Type name (, Type name)*] )`
    ///
    /// With `allow_untyped`, a bare name followed by `,` or `)` is accepted
    /// as a formal whose type comes from the interface prototype.
    pub(crate) fn parse_formals(&mut self, allow_untyped: bool) -> Option<Vec<Formal>> {
        self.ts.expect(SyntaxKind::T_LPAREN)?;
        let mut formals = Vec::new();
        if self.ts.eat(SyntaxKind::T_RPAREN).is_some() {
            return Some(formals);
        }
        loop {
            self.skip_attributes();
            let start = self.ts.start();
            let untyped = allow_untyped
                && self.ts.at(SyntaxKind::T_IDENT)
                && matches!(
                    self.ts.nth(1),
                    Some(SyntaxKind::T_COMMA | SyntaxKind::T_RPAREN)
                );
            let ty = if untyped {
                None
            } else {
                Some(self.parse_type()?)
            };
            let (name, _) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
            formals.push(Formal {
                ty,
                name,
                span: self.ts.span_from(start),
            });
            if self.ts.eat(SyntaxKind::T_COMMA).is_none() {
                break;
            }
        }
        self.ts.expect(SyntaxKind::T_RPAREN)?;
        Some(formals)
    }

    /// `provisos ( ... )`, reported and skipped.
    pub(crate) fn skip_provisos(&mut self) {
        if !self.ts.at(SyntaxKind::K_PROVISOS) {
            return;
        }
        let start = self.ts.start();
        self.ts.bump();
        if self.ts.at(SyntaxKind::T_LPAREN) {
            self.ts.skip_balanced();
        }
        let span = self.ts.span_from(start);
        self.ts.unsupported(span, UnsupportedConstruct::Provisos);
    }
}
