//! Declarations, assignments, bindings and expression statements.
//!
//! These forms look the same in every dialect and at module and package
//! level, so they are parsed once into [`Simple`] and the caller decides
//! which of them it accepts.

use crate::parser::Parser;
use crate::parser::ast::{
    Assign, Bind, DeclType, Declarator, Expr, ExprKind, Leaf, Type, VarDecl,
};
use crate::{Span, SyntaxKind};

/// A statement that is not a block, conditional or definition.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Simple {
    VarDecl(VarDecl),
    Assign(Assign),
    RegWrite(Assign),
    Bind(Bind),
    Expr(Expr),
}

impl Simple {
    /// The dialect-sensitive leaf this statement is, if any.
    pub(crate) fn leaf(&self) -> Option<Leaf> {
        match self {
            Self::VarDecl(_) | Self::Assign(_) => None,
            Self::RegWrite(_) => Some(Leaf::RegisterWrite),
            Self::Bind(_) => Some(Leaf::Bind),
            Self::Expr(_) => Some(Leaf::ExprStatement),
        }
    }

    pub(crate) fn span(&self) -> Span {
        match self {
            Self::VarDecl(decl) => decl.span.clone(),
            Self::Assign(assign) | Self::RegWrite(assign) => assign.span.clone(),
            Self::Bind(bind) => bind.span.clone(),
            Self::Expr(expr) => expr.span.clone(),
        }
    }
}

impl Parser<'_> {
    /// Report a statement that parsed but is not allowed where it appears.
    /// `place` completes "... is not permitted", e.g. "at package level".
    pub(crate) fn report_misplaced(&mut self, simple: &Simple, place: &str) {
        let what = simple
            .leaf()
            .map_or_else(|| "statement".to_string(), |leaf| leaf.to_string());
        self.ts
            .error(simple.span(), format!("{what} is not permitted {place}"));
    }

    pub(crate) fn parse_simple(&mut self) -> Option<Simple> {
        if self.ts.at(SyntaxKind::K_LET) {
            return self.parse_let();
        }
        if self.at_typed_decl() {
            let start = self.ts.start();
            let ty = self.parse_type()?;
            return self.parse_typed_decl(start, ty);
        }
        let target = self.parse_postfix_expr()?;
        self.finish_simple(target)
    }

    /// Finish a statement whose target expression has been read.
    pub(crate) fn finish_simple(&mut self, target: Expr) -> Option<Simple> {
        let start = target.span.start;
        match self.ts.peek() {
            Some(SyntaxKind::T_EQ) => {
                self.ts.bump();
                let value = self.parse_expr(0)?;
                self.ts.expect(SyntaxKind::T_SEMI)?;
                if !target.is_lvalue() {
                    self.ts.error(target.span, "invalid assignment target");
                    return None;
                }
                Some(Simple::Assign(Assign {
                    target,
                    value,
                    span: self.ts.span_from(start),
                }))
            }
            Some(SyntaxKind::T_LTE) => {
                self.ts.bump();
                let value = self.parse_expr(0)?;
                self.ts.expect(SyntaxKind::T_SEMI)?;
                Some(Simple::RegWrite(Assign {
                    target,
                    value,
                    span: self.ts.span_from(start),
                }))
            }
            Some(SyntaxKind::T_LARROW) => {
                let ExprKind::Var(name) = target.kind else {
                    self.ts
                        .error(target.span, "expected a variable name before `<-`");
                    return None;
                };
                self.ts.bump();
                let value = self.parse_expr(0)?;
                self.ts.expect(SyntaxKind::T_SEMI)?;
                Some(Simple::Bind(Bind {
                    decl: None,
                    name,
                    value,
                    span: self.ts.span_from(start),
                }))
            }
            Some(SyntaxKind::T_SEMI) => {
                self.ts.bump();
                Some(Simple::Expr(target))
            }
            _ => {
                self.ts.error_expected("`=`, `<=`, `<-` or `;`");
                None
            }
        }
    }

    /// `let x = e;` or `let x <- e;`
    fn parse_let(&mut self) -> Option<Simple> {
        let start = self.ts.start();
        self.ts.bump(); // 'let'
        let (name, name_span) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
        if self.ts.eat(SyntaxKind::T_LARROW).is_some() {
            let value = self.parse_expr(0)?;
            self.ts.expect(SyntaxKind::T_SEMI)?;
            return Some(Simple::Bind(Bind {
                decl: Some(DeclType::Let),
                name,
                value,
                span: self.ts.span_from(start),
            }));
        }
        self.ts.expect(SyntaxKind::T_EQ)?;
        let init = self.parse_expr(0)?;
        let declarator = Declarator {
            name,
            dims: Vec::new(),
            init: Some(init),
            span: name_span.start..self.ts.last_end(),
        };
        self.ts.expect(SyntaxKind::T_SEMI)?;
        Some(Simple::VarDecl(VarDecl {
            ty: DeclType::Let,
            declarators: vec![declarator],
            span: self.ts.span_from(start),
        }))
    }

    /// `Type x[dims] [= e] (, y [= e])* ;` or `Type x <- e;`
    fn parse_typed_decl(&mut self, start: usize, ty: Type) -> Option<Simple> {
        let (name, name_span) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
        if self.ts.eat(SyntaxKind::T_LARROW).is_some() {
            let value = self.parse_expr(0)?;
            self.ts.expect(SyntaxKind::T_SEMI)?;
            return Some(Simple::Bind(Bind {
                decl: Some(DeclType::Typed(ty)),
                name,
                value,
                span: self.ts.span_from(start),
            }));
        }
        let mut declarators = vec![self.parse_declarator(name, name_span.start)?];
        while self.ts.eat(SyntaxKind::T_COMMA).is_some() {
            let (name, name_span) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
            declarators.push(self.parse_declarator(name, name_span.start)?);
        }
        self.ts.expect(SyntaxKind::T_SEMI)?;
        Some(Simple::VarDecl(VarDecl {
            ty: DeclType::Typed(ty),
            declarators,
            span: self.ts.span_from(start),
        }))
    }

    fn parse_declarator(&mut self, name: String, start: usize) -> Option<Declarator> {
        let mut dims = Vec::new();
        while self.ts.eat(SyntaxKind::T_LBRACKET).is_some() {
            dims.push(self.parse_expr(0)?);
            self.ts.expect(SyntaxKind::T_RBRACKET)?;
        }
        let init = if self.ts.eat(SyntaxKind::T_EQ).is_some() {
            Some(self.parse_expr(0)?)
        } else {
            None
        };
        Some(Declarator {
            name,
            dims,
            init,
            span: self.ts.span_from(start),
        })
    }

    /// Whether a type followed by a variable name starts here.
    ///
    /// Looks ahead without consuming input or recording diagnostics.
    pub(crate) fn at_typed_decl(&mut self) -> bool {
        if !matches!(
            self.ts.peek(),
            Some(SyntaxKind::T_TYPE_IDENT | SyntaxKind::K_BIT)
        ) {
            return false;
        }
        let cp = self.checkpoint();
        let found = self.parse_type().is_some() && self.ts.at(SyntaxKind::T_IDENT);
        self.rewind(cp);
        found
    }
}
