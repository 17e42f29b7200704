//! Methods, functions and rules.

use crate::SyntaxKind;
use crate::parser::Parser;
use crate::parser::ast::{
    ActionCtx, ActionValueCtx, Body, CondPredicate, Formal, FunctionBodyCtx, FunctionDef,
    MethodDef, Rule, Type,
};

/// Statement dialect of a method or function body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyDialect {
    Action,
    ActionValue,
    Value,
}

impl BodyDialect {
    /// No type or `Action` gives an action body, `ActionValue#(t)` an
    /// action-value body and any other type a function body.
    fn for_method(ret: Option<&Type>) -> Self {
        match ret.map(Type::name) {
            None | Some(Some("Action")) => Self::Action,
            Some(Some("ActionValue")) => Self::ActionValue,
            Some(_) => Self::Value,
        }
    }
}

struct MethodHeader {
    ret: Option<Type>,
    name: String,
    formals: Vec<Formal>,
    guard: Option<CondPredicate>,
}

impl Parser<'_> {
    /// `method [Type] name [(formals)] [if (pred)] ; body endmethod [: name]`
    pub(crate) fn parse_method_def(&mut self) -> Option<MethodDef> {
        let start = self.ts.start();
        let Some(header) = self.parse_method_header() else {
            self.abandon(SyntaxKind::K_ENDMETHOD);
            return None;
        };
        let dialect = BodyDialect::for_method(header.ret.as_ref());
        let body = self.parse_body(dialect, SyntaxKind::K_ENDMETHOD);
        self.ts.expect(SyntaxKind::K_ENDMETHOD)?;
        let end_label = self.parse_label();
        let span = self.ts.span_from(start);
        self.node(SyntaxKind::N_METHOD_DEF, span.clone());
        Some(MethodDef {
            ret: header.ret,
            name: header.name,
            formals: header.formals,
            guard: header.guard,
            body,
            end_label,
            span,
        })
    }

    fn parse_method_header(&mut self) -> Option<MethodHeader> {
        self.ts.bump(); // 'method'
        let untyped = self.ts.at(SyntaxKind::T_IDENT)
            && matches!(
                self.ts.nth(1),
                Some(SyntaxKind::T_LPAREN | SyntaxKind::T_SEMI | SyntaxKind::K_IF)
            );
        let ret = if untyped {
            None
        } else {
            Some(self.parse_type()?)
        };
        let (name, _) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
        let formals = if self.ts.at(SyntaxKind::T_LPAREN) {
            self.parse_formals(true)?
        } else {
            Vec::new()
        };
        let guard = if self.ts.eat(SyntaxKind::K_IF).is_some() {
            Some(self.parse_paren_predicate()?)
        } else {
            None
        };
        self.ts.expect(SyntaxKind::T_SEMI)?;
        Some(MethodHeader {
            ret,
            name,
            formals,
            guard,
        })
    }

    /// `function Type name [(formals)] [provisos] ; body endfunction [: name]`
    pub(crate) fn parse_function_def(&mut self) -> Option<FunctionDef> {
        let start = self.ts.start();
        let Some((ret, name, formals)) = self.parse_function_header() else {
            self.abandon(SyntaxKind::K_ENDFUNCTION);
            return None;
        };
        let body = self.parse_body(BodyDialect::Value, SyntaxKind::K_ENDFUNCTION);
        self.ts.expect(SyntaxKind::K_ENDFUNCTION)?;
        let end_label = self.parse_label();
        let span = self.ts.span_from(start);
        self.node(SyntaxKind::N_FUNCTION_DEF, span.clone());
        Some(FunctionDef {
            ret,
            name,
            formals,
            body,
            end_label,
            span,
        })
    }

    fn parse_function_header(&mut self) -> Option<(Type, String, Vec<Formal>)> {
        self.ts.bump(); // 'function'
        let ret = self.parse_type()?;
        let (name, _) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
        let formals = if self.ts.at(SyntaxKind::T_LPAREN) {
            self.parse_formals(false)?
        } else {
            Vec::new()
        };
        self.skip_provisos();
        self.ts.expect(SyntaxKind::T_SEMI)?;
        Some((ret, name, formals))
    }

    /// `rule name [(pred)] ; actionStmt* endrule [: name]`
    pub(crate) fn parse_rule(&mut self) -> Option<Rule> {
        let start = self.ts.start();
        let Some((name, guard)) = self.parse_rule_header() else {
            self.abandon(SyntaxKind::K_ENDRULE);
            return None;
        };
        let body = self.parse_stmts::<ActionCtx>();
        self.ts.expect(SyntaxKind::K_ENDRULE)?;
        let end_label = self.parse_label();
        let span = self.ts.span_from(start);
        self.node(SyntaxKind::N_RULE, span.clone());
        Some(Rule {
            name,
            guard,
            body,
            end_label,
            span,
        })
    }

    fn parse_rule_header(&mut self) -> Option<(String, Option<CondPredicate>)> {
        self.ts.bump(); // 'rule'
        let (name, _) = self.ts.expect_ident(SyntaxKind::T_IDENT)?;
        let guard = if self.ts.at(SyntaxKind::T_LPAREN) {
            Some(self.parse_paren_predicate()?)
        } else {
            None
        };
        self.ts.expect(SyntaxKind::T_SEMI)?;
        Some((name, guard))
    }

    fn parse_paren_predicate(&mut self) -> Option<CondPredicate> {
        self.ts.expect(SyntaxKind::T_LPAREN)?;
        let predicate = self.parse_cond_predicate()?;
        self.ts.expect(SyntaxKind::T_RPAREN)?;
        Some(predicate)
    }

    /// Statements up to `close`, or a lone `action`/`actionvalue` block.
    fn parse_body(&mut self, dialect: BodyDialect, close: SyntaxKind) -> Body {
        let lone_block = matches!(
            self.ts.peek(),
            Some(SyntaxKind::K_ACTION | SyntaxKind::K_ACTIONVALUE)
        ) && self.ts.after_action_block() == Some(close);
        if lone_block {
            let before = self.ts.position();
            match self.parse_primary() {
                Some(block) => {
                    self.ts.eat(SyntaxKind::T_SEMI);
                    return Body::Block(block);
                }
                None => self.resync(before),
            }
        }
        match dialect {
            BodyDialect::Action => Body::Action(self.parse_stmts::<ActionCtx>()),
            BodyDialect::ActionValue => Body::ActionValue(self.parse_stmts::<ActionValueCtx>()),
            BodyDialect::Value => Body::Value(self.parse_stmts::<FunctionBodyCtx>()),
        }
    }
}
