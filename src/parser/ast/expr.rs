//! Expression AST.
//!
//! Provides a structured representation of parsed expressions. Every node
//! records its source span so later phases can report against the
//! text without re-parsing tokens.

use super::decl::InterfaceStmt;
use super::literal::Literal;
use super::stmt::{ActionCtx, ActionValueCtx, Block, ExpressionCtx, Label, Labels, Stmt};
use super::types::Type;
use crate::Span;

/// Unary operators in expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `+`
    Plus,
    /// `-`
    Neg,
    /// `!`
    Not,
    /// `~`
    BitNot,
    /// `&` reduction.
    ReduceAnd,
    /// `~&` reduction.
    ReduceNand,
    /// `|` reduction.
    ReduceOr,
    /// `~|` reduction.
    ReduceNor,
    /// `^` reduction.
    ReduceXor,
    /// `^~` or `~^` reduction.
    ReduceXnor,
}

impl UnaryOp {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Neg => "-",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::ReduceAnd => "&",
            Self::ReduceNand => "~&",
            Self::ReduceOr => "|",
            Self::ReduceNor => "~|",
            Self::ReduceXor => "^",
            Self::ReduceXnor => "^~",
        }
    }
}

/// Binary operators in expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Shl,
    Shr,
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
    Neq,
    BitAnd,
    BitXor,
    /// `^~` or `~^`.
    BitXnor,
    BitOr,
    And,
    Or,
}

impl BinaryOp {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitXnor => "^~",
            Self::BitOr => "|",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

/// One or more boolean expressions joined by `&&&`.
///
/// Shared by `if` statements, rule guards, method guards and the condition
/// of `?:`.
#[derive(Debug, Clone, PartialEq)]
pub struct CondPredicate {
    pub conjuncts: Vec<Expr>,
    pub span: Span,
}

impl CondPredicate {
    pub(crate) fn to_sexpr(&self) -> String {
        match self.conjuncts.as_slice() {
            [single] => single.to_sexpr(),
            many => {
                let parts: Vec<String> = many.iter().map(Expr::to_sexpr).collect();
                format!("(&&& {})", parts.join(" "))
            }
        }
    }
}

/// `field: expr` inside a struct or tagged-union literal.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberBind {
    pub field: String,
    pub value: Expr,
    pub span: Span,
}

/// Payload following `tagged Name`.
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedPayload {
    /// `tagged Invalid`
    None,
    /// `tagged Point { x: 1, y: 2 }`
    Struct(Vec<MemberBind>),
    /// `tagged Valid x`
    Expr(Box<Expr>),
}

/// `begin [: l] stmt* expr end [: l]` used as a value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueBlock {
    pub labels: Labels,
    pub stmts: Vec<Stmt<ExpressionCtx>>,
    pub result: Box<Expr>,
}

/// `interface Ifc; ... endinterface` used as a value.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceExpr {
    pub ty: Type,
    pub stmts: Vec<InterfaceStmt>,
    pub end_label: Option<Label>,
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Value identifier reference.
    Var(String),
    /// Type identifier used as a value, e.g. `True` or an enum tag.
    TypeRef(String),
    Literal(Literal),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Cond {
        predicate: CondPredicate,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Concat(Vec<Expr>),
    /// `e[hi:lo]`, or `e[hi]` when `lo` is absent.
    BitSelect {
        expr: Box<Expr>,
        hi: Box<Expr>,
        lo: Option<Box<Expr>>,
    },
    Block(ValueBlock),
    ActionBlock(Block<ActionCtx>),
    ActionValueBlock(Block<ActionValueCtx>),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    MethodCall {
        recv: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    Field {
        expr: Box<Expr>,
        field: String,
    },
    Struct {
        name: String,
        members: Vec<MemberBind>,
    },
    Tagged {
        name: String,
        payload: TaggedPayload,
    },
    Interface(Box<InterfaceExpr>),
    /// `?`
    DontCare,
    ValueOf(Type),
}

fn list(items: &[Expr]) -> String {
    items
        .iter()
        .map(|e| format!(" {}", e.to_sexpr()))
        .collect()
}

fn members(binds: &[MemberBind]) -> String {
    binds
        .iter()
        .map(|m| format!(" ({} {})", m.field, m.value.to_sexpr()))
        .collect()
}

impl Expr {
    pub(crate) fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Whether the expression can appear on the left of `=` or `<=`.
    #[must_use]
    pub fn is_lvalue(&self) -> bool {
        match &self.kind {
            ExprKind::Var(_) => true,
            ExprKind::Field { expr, .. } | ExprKind::BitSelect { expr, .. } => expr.is_lvalue(),
            _ => false,
        }
    }

    /// Display the expression as a simple S-expression for tests.
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        match &self.kind {
            ExprKind::Var(name) | ExprKind::TypeRef(name) => name.clone(),
            ExprKind::Literal(lit) => lit.to_sexpr(),
            ExprKind::Unary { op, expr } => format!("({} {})", op.symbol(), expr.to_sexpr()),
            ExprKind::Binary { op, lhs, rhs } => {
                format!("({} {} {})", op.symbol(), lhs.to_sexpr(), rhs.to_sexpr())
            }
            ExprKind::Cond {
                predicate,
                then_branch,
                else_branch,
            } => format!(
                "(? {} {} {})",
                predicate.to_sexpr(),
                then_branch.to_sexpr(),
                else_branch.to_sexpr()
            ),
            ExprKind::Concat(items) => format!("(concat{})", list(items)),
            ExprKind::BitSelect { expr, hi, lo: None } => {
                format!("([] {} {})", expr.to_sexpr(), hi.to_sexpr())
            }
            ExprKind::BitSelect {
                expr,
                hi,
                lo: Some(lo),
            } => format!(
                "([:] {} {} {})",
                expr.to_sexpr(),
                hi.to_sexpr(),
                lo.to_sexpr()
            ),
            ExprKind::Block(block) => {
                let stmts: String = block
                    .stmts
                    .iter()
                    .map(|s| format!(" {}", s.to_sexpr()))
                    .collect();
                format!("(begin{stmts} {})", block.result.to_sexpr())
            }
            ExprKind::ActionBlock(block) => format!("(action{})", block.stmts_sexpr()),
            ExprKind::ActionValueBlock(block) => {
                format!("(actionvalue{})", block.stmts_sexpr())
            }
            ExprKind::Call { callee, args } => {
                format!("(call {}{})", callee.to_sexpr(), list(args))
            }
            ExprKind::MethodCall { recv, method, args } => {
                format!("(method {} {method}{})", recv.to_sexpr(), list(args))
            }
            ExprKind::Field { expr, field } => format!("(. {} {field})", expr.to_sexpr()),
            ExprKind::Struct { name, members: binds } => {
                format!("(struct {name}{})", members(binds))
            }
            ExprKind::Tagged { name, payload } => match payload {
                TaggedPayload::None => format!("(tagged {name})"),
                TaggedPayload::Struct(binds) => format!("(tagged {name}{})", members(binds)),
                TaggedPayload::Expr(expr) => format!("(tagged {name} {})", expr.to_sexpr()),
            },
            ExprKind::Interface(ifc) => {
                let names: String = ifc
                    .stmts
                    .iter()
                    .filter_map(InterfaceStmt::member_name)
                    .map(|n| format!(" {n}"))
                    .collect();
                format!("(interface {}{names})", ifc.ty.to_source())
            }
            ExprKind::DontCare => "?".to_string(),
            ExprKind::ValueOf(ty) => format!("(valueOf {})", ty.to_source()),
        }
    }
}
