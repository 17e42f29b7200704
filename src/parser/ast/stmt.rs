//! Statement AST, parameterized by dialect.
//!
//! The same statement shapes appear in four surrounding contexts, each with
//! its own set of permitted leaves. A dialect is a zero-sized marker type so a
//! `Block<ActionCtx>` can only ever hold `Stmt<ActionCtx>` values, while the
//! block and conditional parsers are written once, generically.

use std::fmt;

use super::decl::{FunctionDef, ModuleDef};
use super::expr::{CondPredicate, Expr};
use super::types::Type;
use crate::Span;

mod sealed {
    pub trait Sealed {}
}

/// The closed set of statement dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialectKind {
    Action,
    ActionValue,
    Expression,
    FunctionBody,
}

/// Leaf statements whose legality depends on the dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Leaf {
    RegisterWrite,
    Bind,
    SystemTask,
    Return,
    ExprStatement,
    ActionBlock,
}

impl DialectKind {
    /// Whether the dialect accepts the given leaf.
    ///
    /// Declarations, assignments, nested definitions, blocks and conditionals
    /// are legal everywhere and are not listed here.
    #[must_use]
    pub fn permits(self, leaf: Leaf) -> bool {
        match leaf {
            Leaf::RegisterWrite
            | Leaf::Bind
            | Leaf::SystemTask
            | Leaf::ExprStatement
            | Leaf::ActionBlock => matches!(self, Self::Action | Self::ActionValue),
            Leaf::Return => matches!(self, Self::ActionValue | Self::FunctionBody),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Action => "an action block",
            Self::ActionValue => "an actionvalue block",
            Self::Expression => "an expression block",
            Self::FunctionBody => "a function body",
        })
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RegisterWrite => "register write",
            Self::Bind => "`<-` binding",
            Self::SystemTask => "system task",
            Self::Return => "`return`",
            Self::ExprStatement => "expression statement",
            Self::ActionBlock => "action block",
        })
    }
}

/// Compile-time statement dialect.
pub trait Dialect:
    sealed::Sealed + Copy + Default + fmt::Debug + PartialEq + Eq + 'static
{
    const KIND: DialectKind;
}

macro_rules! dialect {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl Dialect for $name {
            const KIND: DialectKind = DialectKind::$kind;
        }
    };
}

dialect!(
    /// Rule bodies, `action ... endaction` and `Action` methods.
    ActionCtx => Action
);
dialect!(
    /// `actionvalue ... endactionvalue` and `ActionValue` methods.
    ActionValueCtx => ActionValue
);
dialect!(
    /// Statements inside a `begin ... end` used as a value.
    ExpressionCtx => Expression
);
dialect!(
    /// Function bodies and value methods.
    FunctionBodyCtx => FunctionBody
);

/// `: name` after an opening or closing keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    pub span: Span,
}

/// Labels recorded on a block. They are not required to agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    pub open: Option<Label>,
    pub close: Option<Label>,
}

impl Labels {
    /// `false` only when both labels are present and differ.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        match (&self.open, &self.close) {
            (Some(open), Some(close)) => open.name == close.name,
            _ => true,
        }
    }
}

/// `begin [: l] stmt* end [: l]`, or the body of an `action`/`actionvalue`
/// block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block<D> {
    pub labels: Labels,
    pub stmts: Vec<Stmt<D>>,
    pub span: Span,
    pub dialect: D,
}

impl<D: Dialect> Block<D> {
    #[must_use]
    pub fn kind(&self) -> DialectKind {
        D::KIND
    }

    pub(crate) fn stmts_sexpr(&self) -> String {
        self.stmts
            .iter()
            .map(|s| format!(" {}", s.to_sexpr()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt<D> {
    pub predicate: CondPredicate,
    pub then_branch: Box<Stmt<D>>,
    pub else_branch: Option<Box<Stmt<D>>>,
    pub span: Span,
}

/// How a variable declaration introduces its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclType {
    Typed(Type),
    Let,
}

impl DeclType {
    fn to_source(&self) -> String {
        match self {
            Self::Typed(ty) => ty.to_source(),
            Self::Let => "let".to_string(),
        }
    }
}

/// One name in a declaration, with its optional initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: String,
    /// Array dimensions, as in `Reg#(Bool) flags[4][2];`.
    pub dims: Vec<Expr>,
    pub init: Option<Expr>,
    pub span: Span,
}

impl Declarator {
    fn to_sexpr(&self) -> String {
        let dims: String = self
            .dims
            .iter()
            .map(|d| format!("[{}]", d.to_sexpr()))
            .collect();
        match &self.init {
            Some(init) => format!("(= {}{dims} {})", self.name, init.to_sexpr()),
            None => format!("{}{dims}", self.name),
        }
    }
}

/// `Type a [= e], b [= e];` or `let a = e;`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub ty: DeclType,
    pub declarators: Vec<Declarator>,
    pub span: Span,
}

/// `lvalue = e;` and, as a register write, `lvalue <= e;`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub target: Expr,
    pub value: Expr,
    pub span: Span,
}

/// `[Type | let] name <- e;`
#[derive(Debug, Clone, PartialEq)]
pub struct Bind {
    /// `None` binds an existing name.
    pub decl: Option<DeclType>,
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt<D> {
    pub kind: StmtKind<D>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind<D> {
    VarDecl(VarDecl),
    Assign(Assign),
    Bind(Bind),
    RegWrite(Assign),
    /// Call, method call or parenthesised expression used for its effect.
    Expr(Expr),
    Return(Expr),
    Function(Box<FunctionDef>),
    Module(Box<ModuleDef>),
    Block(Block<D>),
    If(IfStmt<D>),
}

impl VarDecl {
    pub(crate) fn to_sexpr(&self) -> String {
        let names: String = self
            .declarators
            .iter()
            .map(|d| format!(" {}", d.to_sexpr()))
            .collect();
        format!("(decl {}{names})", self.ty.to_source())
    }
}

impl Assign {
    pub(crate) fn to_sexpr(&self, op: &str) -> String {
        format!("({op} {} {})", self.target.to_sexpr(), self.value.to_sexpr())
    }
}

impl Bind {
    pub(crate) fn to_sexpr(&self) -> String {
        let decl = self
            .decl
            .as_ref()
            .map(|d| format!("{} ", d.to_source()))
            .unwrap_or_default();
        format!("(<- {decl}{} {})", self.name, self.value.to_sexpr())
    }
}

impl<D: Dialect> Stmt<D> {
    #[must_use]
    pub fn dialect(&self) -> DialectKind {
        D::KIND
    }

    /// Render the statement as an S-expression for tests.
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        match &self.kind {
            StmtKind::VarDecl(decl) => decl.to_sexpr(),
            StmtKind::Assign(assign) => assign.to_sexpr("="),
            StmtKind::RegWrite(write) => write.to_sexpr("<="),
            StmtKind::Bind(bind) => bind.to_sexpr(),
            StmtKind::Expr(expr) => expr.to_sexpr(),
            StmtKind::Return(expr) => format!("(return {})", expr.to_sexpr()),
            StmtKind::Function(def) => format!("(function {})", def.name),
            StmtKind::Module(def) => format!("(module {})", def.name),
            StmtKind::Block(block) => format!("(block{})", block.stmts_sexpr()),
            StmtKind::If(stmt) => {
                let else_part = stmt
                    .else_branch
                    .as_ref()
                    .map(|s| format!(" {}", s.to_sexpr()))
                    .unwrap_or_default();
                format!(
                    "(if {} {}{else_part})",
                    stmt.predicate.to_sexpr(),
                    stmt.then_branch.to_sexpr()
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DialectKind::Action, Leaf::RegisterWrite, true)]
    #[case(DialectKind::ActionValue, Leaf::Bind, true)]
    #[case(DialectKind::Expression, Leaf::RegisterWrite, false)]
    #[case(DialectKind::FunctionBody, Leaf::SystemTask, false)]
    #[case(DialectKind::Action, Leaf::Return, false)]
    #[case(DialectKind::ActionValue, Leaf::Return, true)]
    #[case(DialectKind::FunctionBody, Leaf::Return, true)]
    #[case(DialectKind::Expression, Leaf::Return, false)]
    fn leaf_permissions(#[case] dialect: DialectKind, #[case] leaf: Leaf, #[case] ok: bool) {
        assert_eq!(dialect.permits(leaf), ok);
    }

    #[test]
    fn marker_types_carry_their_kind() {
        assert_eq!(ActionCtx::KIND, DialectKind::Action);
        assert_eq!(ActionValueCtx::KIND, DialectKind::ActionValue);
        assert_eq!(ExpressionCtx::KIND, DialectKind::Expression);
        assert_eq!(FunctionBodyCtx::KIND, DialectKind::FunctionBody);
    }

    #[rstest]
    #[case(Some("a"), Some("a"), true)]
    #[case(Some("a"), Some("b"), false)]
    #[case(None, Some("b"), true)]
    #[case(Some("a"), None, true)]
    fn label_consistency(
        #[case] open: Option<&str>,
        #[case] close: Option<&str>,
        #[case] expected: bool,
    ) {
        let label = |name: &str| Label {
            name: name.to_string(),
            span: 0..0,
        };
        let labels = Labels {
            open: open.map(label),
            close: close.map(label),
        };
        assert_eq!(labels.is_consistent(), expected);
    }
}
