//! Interface declarations, subinterface definitions and interface
//! expressions.

use crate::SyntaxKind;
use crate::parser::Parser;
use crate::parser::ast::{
    ExpressionCtx, InterfaceDecl, InterfaceExpr, InterfaceMember, InterfaceStmt, MethodProto,
    SubinterfaceDecl, SubinterfaceDef, Type, TypeFormal,
};

impl Parser<'_> {
    /// `interface Name [#(formals)] ; member* endinterface [: Name]`
    pub(crate) fn parse_interface_decl(&mut self) -> Option<InterfaceDecl> {
        let start = self.ts.start();
        let Some((name, formals)) = self.parse_interface_decl_header() else {
            self.abandon(SyntaxKind::K_ENDINTERFACE);
            return None;
        };
        let mut members = Vec::new();
        while !self.ts.at_closer() && !self.ts.halted() {
            let before = self.ts.position();
            match self.parse_interface_member() {
                Some(member) => members.push(member),
                None => self.resync(before),
            }
        }
        self.ts.expect(SyntaxKind::K_ENDINTERFACE)?;
        let end_label = self.parse_label();
        let span = self.ts.span_from(start);
        self.node(SyntaxKind::N_INTERFACE_DECL, span.clone());
        Some(InterfaceDecl {
            name,
            formals,
            members,
            end_label,
            span,
        })
    }

    fn parse_interface_decl_header(&mut self) -> Option<(String, Vec<TypeFormal>)> {
        self.ts.bump(); // 'interface'
        let (name, _) = self.ts.expect_ident(SyntaxKind::T_TYPE_IDENT)?;
        let formals = if self.ts.at(SyntaxKind::T_HASH) {
            self.parse_type_formals()?
        } else {
            Vec::new()
        };
        self.ts.expect(SyntaxKind::T_SEMI)?;
        Some((name, formals))
    }

    fn parse_interface_member(&mut self) -> Option<InterfaceMember> {
        self.skip_attributes();
        let start = self.ts.start();
        match self.ts.peek() {
            Some(SyntaxKind::K_METHOD) => {
                self.ts.bump();
                let ret = self.parse_type()?;
                let (name, _) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
                let formals = if self.ts.at(SyntaxKind::T_LPAREN) {
                    self.parse_formals(false)?
                } else {
                    Vec::new()
                };
                self.ts.expect(SyntaxKind::T_SEMI)?;
                Some(InterfaceMember::Method(MethodProto {
                    ret,
                    name,
                    formals,
                    span: self.ts.span_from(start),
                }))
            }
            Some(SyntaxKind::K_INTERFACE) => {
                self.ts.bump();
                let ty = self.parse_type()?;
                let (name, _) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
                self.ts.expect(SyntaxKind::T_SEMI)?;
                Some(InterfaceMember::Subinterface(SubinterfaceDecl {
                    ty,
                    name,
                    span: self.ts.span_from(start),
                }))
            }
            _ => {
                self.ts
                    .error_expected("method or subinterface declaration");
                None
            }
        }
    }

    /// `interface Type name ; interfaceStmt* endinterface [: name]`
    pub(crate) fn parse_subinterface_def(&mut self) -> Option<SubinterfaceDef> {
        let start = self.ts.start();
        let Some((ty, name)) = self.parse_subinterface_header() else {
            self.abandon(SyntaxKind::K_ENDINTERFACE);
            return None;
        };
        let stmts = self.parse_interface_stmts();
        self.ts.expect(SyntaxKind::K_ENDINTERFACE)?;
        let end_label = self.parse_label();
        let span = self.ts.span_from(start);
        self.node(SyntaxKind::N_SUBINTERFACE_DEF, span.clone());
        Some(SubinterfaceDef {
            ty,
            name,
            stmts,
            end_label,
            span,
        })
    }

    fn parse_subinterface_header(&mut self) -> Option<(Type, String)> {
        self.ts.bump(); // 'interface'
        let ty = self.parse_type()?;
        let (name, _) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
        self.ts.expect(SyntaxKind::T_SEMI)?;
        Some((ty, name))
    }

    /// `interface Type ; interfaceStmt* endinterface [: Type]` in expression
    /// position.
    pub(crate) fn parse_interface_expr(&mut self) -> Option<InterfaceExpr> {
        self.ts.bump(); // 'interface'
        let ty = self.parse_type()?;
        self.ts.expect(SyntaxKind::T_SEMI)?;
        let stmts = self.parse_interface_stmts();
        self.ts.expect(SyntaxKind::K_ENDINTERFACE)?;
        let end_label = self.parse_label();
        Some(InterfaceExpr {
            ty,
            stmts,
            end_label,
        })
    }

    fn parse_interface_stmts(&mut self) -> Vec<InterfaceStmt> {
        let mut stmts = Vec::new();
        while !self.ts.at_closer() && !self.ts.halted() {
            let before = self.ts.position();
            self.skip_attributes();
            let stmt = match self.ts.peek() {
                Some(SyntaxKind::K_METHOD) => self.parse_method_def().map(InterfaceStmt::Method),
                Some(SyntaxKind::K_INTERFACE) => {
                    self.parse_subinterface_def().map(InterfaceStmt::Subinterface)
                }
                _ => self
                    .parse_stmt::<ExpressionCtx>()
                    .map(InterfaceStmt::Stmt),
            };
            match stmt {
                Some(stmt) => stmts.push(stmt),
                None => self.resync(before),
            }
        }
        stmts
    }
}
