//! Blocks, conditionals and labels.

use crate::SyntaxKind;
use crate::parser::Parser;
use crate::parser::ast::{
    Block, Dialect, Expr, ExpressionCtx, IfStmt, Label, Labels, Stmt, ValueBlock,
};

use super::Simple;

impl Parser<'_> {
    /// `begin [: label] stmt* end [: label]`
    pub(crate) fn parse_block<D: Dialect>(&mut self) -> Option<Block<D>> {
        self.parse_block_body::<D>(SyntaxKind::K_BEGIN, SyntaxKind::K_END)
    }

    /// A labelled statement block delimited by `open` and `close`.
    ///
    /// Labels are recorded as written; a closing label that differs from the
    /// opening one is accepted.
    pub(crate) fn parse_block_body<D: Dialect>(
        &mut self,
        open: SyntaxKind,
        close: SyntaxKind,
    ) -> Option<Block<D>> {
        let start = self.ts.start();
        self.ts.expect(open)?;
        let open_label = self.parse_label();
        let stmts = self.parse_stmts::<D>();
        self.ts.expect(close)?;
        let close_label = self.parse_label();
        Some(Block {
            labels: Labels {
                open: open_label,
                close: close_label,
            },
            stmts,
            span: self.ts.span_from(start),
            dialect: D::default(),
        })
    }

    /// Statements up to the next block closer or the end of input.
    pub(crate) fn parse_stmts<D: Dialect>(&mut self) -> Vec<Stmt<D>> {
        let mut stmts = Vec::new();
        while !self.ts.at_closer() && !self.ts.halted() {
            let before = self.ts.position();
            match self.parse_stmt::<D>() {
                Some(stmt) => stmts.push(stmt),
                None => self.resync(before),
            }
        }
        stmts
    }

    /// `if ( predicate ) stmt [else stmt]`
    ///
    /// An `else` always belongs to the nearest unmatched `if`.
    pub(crate) fn parse_if<D: Dialect>(&mut self) -> Option<IfStmt<D>> {
        let start = self.ts.start();
        self.ts.bump(); // 'if'
        self.ts.expect(SyntaxKind::T_LPAREN)?;
        let predicate = self.parse_cond_predicate()?;
        self.ts.expect(SyntaxKind::T_RPAREN)?;
        let then_branch = Box::new(self.parse_stmt::<D>()?);
        let else_branch = if self.ts.eat(SyntaxKind::K_ELSE).is_some() {
            Some(Box::new(self.parse_stmt::<D>()?))
        } else {
            None
        };
        Some(IfStmt {
            predicate,
            then_branch,
            else_branch,
            span: self.ts.span_from(start),
        })
    }

    /// `: name` after a block keyword or closer.
    pub(crate) fn parse_label(&mut self) -> Option<Label> {
        self.ts.eat(SyntaxKind::T_COLON)?;
        match self.ts.peek() {
            Some(SyntaxKind::T_IDENT | SyntaxKind::T_TYPE_IDENT) => {
                let (_, span) = self.ts.bump()?;
                Some(Label {
                    name: self.ts.slice(&span),
                    span,
                })
            }
            _ => {
                self.ts.error_expected("label");
                None
            }
        }
    }

    /// `begin stmt* expr end` used as a value.
    ///
    /// Statements follow the expression dialect. The final expression is
    /// the block's result and may be followed by an optional `;`.
    pub(crate) fn parse_value_block(&mut self) -> Option<ValueBlock> {
        self.ts.expect(SyntaxKind::K_BEGIN)?;
        let open = self.parse_label();
        let mut stmts = Vec::new();
        let result = loop {
            if self.ts.halted() {
                return None;
            }
            if self.ts.at_closer() {
                self.ts.error_expected("expression");
                return None;
            }
            let before = self.ts.position();
            if self.starts_value_stmt() {
                match self.parse_stmt::<ExpressionCtx>() {
                    Some(stmt) => stmts.push(stmt),
                    None => self.resync(before),
                }
                continue;
            }
            let start = self.ts.start();
            let Some(target) = self.parse_postfix_expr() else {
                self.resync(before);
                continue;
            };
            match self.ts.peek() {
                Some(SyntaxKind::T_EQ | SyntaxKind::T_LARROW) => {
                    match self.finish_value_stmt(start, target) {
                        Some(stmt) => stmts.push(stmt),
                        None => self.resync(before),
                    }
                }
                Some(SyntaxKind::T_SEMI) if self.ts.nth(1) == Some(SyntaxKind::K_END) => {
                    self.ts.bump();
                    break target;
                }
                Some(SyntaxKind::T_SEMI) => {
                    if let Some(stmt) = self.finish_value_stmt(start, target) {
                        stmts.push(stmt);
                    }
                }
                _ => {
                    let Some(result) = self.parse_infix(target, 0) else {
                        self.resync(before);
                        continue;
                    };
                    self.ts.eat(SyntaxKind::T_SEMI);
                    break result;
                }
            }
        };
        self.ts.expect(SyntaxKind::K_END)?;
        let close = self.parse_label();
        Some(ValueBlock {
            labels: Labels { open, close },
            stmts,
            result: Box::new(result),
        })
    }

    fn finish_value_stmt(&mut self, start: usize, target: Expr) -> Option<Stmt<ExpressionCtx>> {
        let simple: Simple = self.finish_simple(target)?;
        let kind = self.simple_stmt::<ExpressionCtx>(simple)?;
        Some(Stmt {
            kind,
            span: self.ts.span_from(start),
        })
    }

    /// Whether the next tokens start a statement rather than the result
    /// expression of a value block.
    fn starts_value_stmt(&mut self) -> bool {
        match self.ts.peek() {
            Some(
                SyntaxKind::K_LET
                | SyntaxKind::K_IF
                | SyntaxKind::K_BEGIN
                | SyntaxKind::K_RETURN
                | SyntaxKind::K_FUNCTION
                | SyntaxKind::K_MODULE
                | SyntaxKind::K_CASE
                | SyntaxKind::K_FOR
                | SyntaxKind::K_WHILE
                | SyntaxKind::T_ATTR_OPEN
                | SyntaxKind::T_SYSTEM_IDENT,
            ) => true,
            _ => self.at_typed_decl(),
        }
    }
}
