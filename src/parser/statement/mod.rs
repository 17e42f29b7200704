//! Statement parsing, written once for every dialect.
//!
//! `parse_stmt::<D>` recognises the statement forms shared by all contexts and
//! checks each dialect-sensitive leaf against `D::KIND` before building it.
//! Leaves that are not permitted are reported and dropped so the rest of the
//! block still parses.

mod block;
mod simple;

pub(crate) use simple::Simple;

use crate::diagnostic::{Diagnostic, UnsupportedConstruct};
use crate::parser::Parser;
use crate::parser::ast::{Dialect, Expr, Leaf, Stmt, StmtKind};
use crate::tokenizer::lex;
use crate::{Span, SyntaxKind};

/// Parse a single statement in dialect `D`.
///
/// The whole input must be one statement.
///
/// # Errors
/// Returns every lexical and syntax diagnostic when parsing fails.
///
/// # Examples
///
/// ```rust
/// use bsvparse::ast::ActionCtx;
/// use bsvparse::parse_statement;
///
/// let stmt = parse_statement::<ActionCtx>("if (go) x <= 1; else x <= 2;")
///     .map(|s| s.to_sexpr());
/// assert_eq!(stmt.as_deref(), Ok("(if go (<= x 1) (<= x 2))"));
/// ```
#[must_use = "discarding the Result will ignore parse errors"]
pub fn parse_statement<D: Dialect>(src: &str) -> Result<Stmt<D>, Vec<Diagnostic>> {
    let lexed = lex(src);
    let mut parser = Parser::new(src, lexed.significant(), false);
    let stmt = parser.parse_stmt::<D>();
    if stmt.is_some() && !parser.ts.at_eof() {
        parser.ts.error_expected("end of input");
    }
    let (errors, _) = parser.finish();
    let mut diagnostics: Vec<Diagnostic> =
        lexed.errors.into_iter().map(Diagnostic::from).collect();
    diagnostics.extend(errors);
    match stmt {
        Some(stmt) if diagnostics.is_empty() => Ok(stmt),
        _ => {
            if diagnostics.is_empty() {
                diagnostics.push(Diagnostic::syntax(0..src.len(), "invalid statement"));
            }
            diagnostics.sort_by_key(|d| d.span.start);
            Err(diagnostics)
        }
    }
}

impl Parser<'_> {
    /// One statement of dialect `D`.
    ///
    /// Returns `None` when the statement was malformed, not permitted in `D`,
    /// or an unsupported construct that was skipped. In every case a
    /// diagnostic has been recorded.
    pub(crate) fn parse_stmt<D: Dialect>(&mut self) -> Option<Stmt<D>> {
        self.skip_attributes();
        let start = self.ts.start();
        let kind = match self.ts.peek() {
            Some(SyntaxKind::K_BEGIN) => StmtKind::Block(self.parse_block::<D>()?),
            Some(SyntaxKind::K_IF) => StmtKind::If(self.parse_if::<D>()?),
            Some(SyntaxKind::K_RETURN) => {
                let span = self.ts.peek_span();
                let expr = self.parse_return()?;
                self.permit::<D>(Leaf::Return, span)?;
                StmtKind::Return(expr)
            }
            Some(SyntaxKind::K_FUNCTION) => {
                StmtKind::Function(Box::new(self.parse_function_def()?))
            }
            Some(SyntaxKind::K_MODULE) => StmtKind::Module(Box::new(self.parse_module_def()?)),
            Some(SyntaxKind::K_CASE | SyntaxKind::K_FOR | SyntaxKind::K_WHILE) => {
                self.skip_unsupported_stmt::<D>();
                return None;
            }
            Some(SyntaxKind::T_SYSTEM_IDENT) => {
                self.parse_system_task::<D>();
                return None;
            }
            Some(SyntaxKind::K_ACTION | SyntaxKind::K_ACTIONVALUE) => {
                let span = self.ts.peek_span();
                let expr = self.parse_postfix_expr()?;
                self.ts.eat(SyntaxKind::T_SEMI);
                self.permit::<D>(Leaf::ActionBlock, span)?;
                StmtKind::Expr(expr)
            }
            None => {
                self.ts.error_expected("statement");
                return None;
            }
            Some(_) => {
                let simple = self.parse_simple()?;
                self.simple_stmt::<D>(simple)?
            }
        };
        Some(Stmt {
            kind,
            span: self.ts.span_from(start),
        })
    }

    /// Check a dialect-sensitive leaf, reporting it when `D` rejects it.
    pub(crate) fn permit<D: Dialect>(&mut self, leaf: Leaf, span: Span) -> Option<()> {
        if D::KIND.permits(leaf) {
            Some(())
        } else {
            self.ts
                .error(span, format!("{leaf} is not permitted in {}", D::KIND));
            None
        }
    }

    /// Turn a shared simple statement into a statement of dialect `D`.
    pub(crate) fn simple_stmt<D: Dialect>(&mut self, simple: Simple) -> Option<StmtKind<D>> {
        Some(match simple {
            Simple::VarDecl(decl) => StmtKind::VarDecl(decl),
            Simple::Assign(assign) => StmtKind::Assign(assign),
            Simple::RegWrite(assign) => {
                self.permit::<D>(Leaf::RegisterWrite, assign.span.clone())?;
                StmtKind::RegWrite(assign)
            }
            Simple::Bind(bind) => {
                self.permit::<D>(Leaf::Bind, bind.span.clone())?;
                StmtKind::Bind(bind)
            }
            Simple::Expr(expr) => {
                self.permit::<D>(Leaf::ExprStatement, expr.span.clone())?;
                StmtKind::Expr(expr)
            }
        })
    }

    /// `return expr ;`
    pub(crate) fn parse_return(&mut self) -> Option<Expr> {
        self.ts.bump(); // 'return'
        let expr = self.parse_expr(0)?;
        self.ts.expect(SyntaxKind::T_SEMI)?;
        Some(expr)
    }

    /// `$display(...);` in a statement position.
    fn parse_system_task<D: Dialect>(&mut self) {
        let span = self.skip_system_call();
        self.ts.eat(SyntaxKind::T_SEMI);
        if self.permit::<D>(Leaf::SystemTask, span.clone()).is_some() {
            self.ts.unsupported(span, UnsupportedConstruct::SystemCall);
        }
    }

    /// Skip `(* ... *)` attribute instances, reporting each one.
    pub(crate) fn skip_attributes(&mut self) {
        while self.ts.at(SyntaxKind::T_ATTR_OPEN) {
            let start = self.ts.start();
            self.ts.skip_balanced();
            let span = self.ts.span_from(start);
            self.ts
                .unsupported(span, UnsupportedConstruct::AttributeInstance);
        }
    }

    /// Report and step over `case`, `for` and `while` statements.
    ///
    /// The body of a loop is still parsed so that errors inside it surface
    /// and recovery resumes after it.
    pub(crate) fn skip_unsupported_stmt<D: Dialect>(&mut self) {
        let start = self.ts.start();
        match self.ts.peek() {
            Some(SyntaxKind::K_CASE) => {
                self.ts.skip_through(SyntaxKind::K_CASE, SyntaxKind::K_ENDCASE);
                self.parse_label();
                let span = self.ts.span_from(start);
                self.ts.unsupported(span, UnsupportedConstruct::Case);
            }
            Some(kind @ (SyntaxKind::K_FOR | SyntaxKind::K_WHILE)) => {
                self.ts.bump();
                if self.ts.at(SyntaxKind::T_LPAREN) {
                    self.ts.skip_balanced();
                }
                let construct = if kind == SyntaxKind::K_FOR {
                    UnsupportedConstruct::For
                } else {
                    UnsupportedConstruct::While
                };
                let span = self.ts.span_from(start);
                self.ts.unsupported(span, construct);
                let before = self.ts.position();
                if self.parse_stmt::<D>().is_none() {
                    self.resync(before);
                }
            }
            _ => {}
        }
    }

    /// Resynchronise after a statement that returned `None`.
    ///
    /// Nothing is skipped when the failed statement already consumed input up
    /// to a statement boundary.
    pub(crate) fn resync(&mut self, before: usize) {
        if self.ts.position() == before || !self.ts.after_boundary() {
            self.ts.recover();
        }
    }
}
