//! Module definitions and the statements of a module body.

use crate::SyntaxKind;
use crate::diagnostic::UnsupportedConstruct;
use crate::parser::Parser;
use crate::parser::ast::{ActionCtx, ModuleArg, ModuleDef, ModuleParam, ModuleStmt, Type};
use crate::parser::statement::Simple;

struct ModuleHeader {
    ctx_type: Option<Type>,
    name: String,
    params: Vec<ModuleParam>,
    args: Vec<ModuleArg>,
}

impl Parser<'_> {
    /// `module [[Type]] name [#(params)] [(args)] [provisos] ; moduleStmt*
    /// endmodule [: name]`
    pub(crate) fn parse_module_def(&mut self) -> Option<ModuleDef> {
        let start = self.ts.start();
        let Some(header) = self.parse_module_header() else {
            self.abandon(SyntaxKind::K_ENDMODULE);
            return None;
        };
        let mut stmts = Vec::new();
        while !self.ts.at_closer() && !self.ts.halted() {
            let before = self.ts.position();
            match self.parse_module_stmt() {
                Some(stmt) => stmts.push(stmt),
                None => self.resync(before),
            }
        }
        self.ts.expect(SyntaxKind::K_ENDMODULE)?;
        let end_label = self.parse_label();
        let span = self.ts.span_from(start);
        self.node(SyntaxKind::N_MODULE_DEF, span.clone());
        Some(ModuleDef {
            ctx_type: header.ctx_type,
            name: header.name,
            params: header.params,
            args: header.args,
            stmts,
            end_label,
            span,
        })
    }

    fn parse_module_header(&mut self) -> Option<ModuleHeader> {
        self.ts.bump(); // 'module'
        let ctx_type = if self.ts.eat(SyntaxKind::T_LBRACKET).is_some() {
            let ty = self.parse_type()?;
            self.ts.expect(SyntaxKind::T_RBRACKET)?;
            Some(ty)
        } else {
            None
        };
        let (name, _) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
        let params = if self.ts.at(SyntaxKind::T_HASH) {
            self.parse_module_params()?
        } else {
            Vec::new()
        };
        let args = if self.ts.at(SyntaxKind::T_LPAREN) {
            self.parse_module_args()?
        } else {
            Vec::new()
        };
        self.skip_provisos();
        self.ts.expect(SyntaxKind::T_SEMI)?;
        Some(ModuleHeader {
            ctx_type,
            name,
            params,
            args,
        })
    }

    /// `#( [parameter] Type name, ... )`
    fn parse_module_params(&mut self) -> Option<Vec<ModuleParam>> {
        self.ts.bump(); // '#'
        self.ts.expect(SyntaxKind::T_LPAREN)?;
        let mut params = Vec::new();
        loop {
            self.skip_attributes();
            let start = self.ts.start();
            let parameter = self.ts.eat(SyntaxKind::K_PARAMETER).is_some();
            let ty = self.parse_type()?;
            let (name, _) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
            params.push(ModuleParam {
                parameter,
                ty,
                name,
                span: self.ts.span_from(start),
            });
            if self.ts.eat(SyntaxKind::T_COMMA).is_none() {
                break;
            }
        }
        self.ts.expect(SyntaxKind::T_RPAREN)?;
        Some(params)
    }

    /// `( Type [name], ... )`; the interface argument usually has no name.
    fn parse_module_args(&mut self) -> Option<Vec<ModuleArg>> {
        self.ts.bump(); // '('
        let mut args = Vec::new();
        if self.ts.eat(SyntaxKind::T_RPAREN).is_some() {
            return Some(args);
        }
        loop {
            self.skip_attributes();
            let start = self.ts.start();
            let ty = self.parse_type()?;
            let name = if self.ts.at(SyntaxKind::T_IDENT) {
                self.ts.expect_ident(SyntaxKind::T_IDENT).map(|(name, _)| name)
            } else {
                None
            };
            args.push(ModuleArg {
                ty,
                name,
                span: self.ts.span_from(start),
            });
            if self.ts.eat(SyntaxKind::T_COMMA).is_none() {
                break;
            }
        }
        self.ts.expect(SyntaxKind::T_RPAREN)?;
        Some(args)
    }

    fn parse_module_stmt(&mut self) -> Option<ModuleStmt> {
        self.skip_attributes();
        match self.ts.peek() {
            Some(SyntaxKind::K_METHOD) => self.parse_method_def().map(ModuleStmt::Method),
            Some(SyntaxKind::K_INTERFACE) => {
                self.parse_subinterface_def().map(ModuleStmt::Subinterface)
            }
            Some(SyntaxKind::K_RULE) => self.parse_rule().map(ModuleStmt::Rule),
            Some(SyntaxKind::K_RETURN) => self.parse_return().map(ModuleStmt::Return),
            Some(SyntaxKind::K_FUNCTION) => self.parse_function_def().map(ModuleStmt::Function),
            Some(SyntaxKind::K_MODULE) => self.parse_module_def().map(ModuleStmt::Module),
            Some(SyntaxKind::K_CASE | SyntaxKind::K_FOR | SyntaxKind::K_WHILE) => {
                self.skip_unsupported_stmt::<ActionCtx>();
                None
            }
            Some(SyntaxKind::T_SYSTEM_IDENT) => {
                let span = self.skip_system_call();
                self.ts.eat(SyntaxKind::T_SEMI);
                self.ts.unsupported(span, UnsupportedConstruct::SystemCall);
                None
            }
            _ => match self.parse_simple()? {
                Simple::VarDecl(decl) => {
                    self.node(SyntaxKind::N_VAR_DECL, decl.span.clone());
                    Some(ModuleStmt::VarDecl(decl))
                }
                Simple::Assign(assign) => {
                    self.node(SyntaxKind::N_VAR_ASSIGN, assign.span.clone());
                    Some(ModuleStmt::Assign(assign))
                }
                Simple::Bind(bind) => Some(ModuleStmt::Bind(bind)),
                Simple::Expr(expr) => Some(ModuleStmt::Expr(expr)),
                simple @ Simple::RegWrite(_) => {
                    self.report_misplaced(&simple, "in a module body");
                    None
                }
            },
        }
    }
}
