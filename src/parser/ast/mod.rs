//! Owned syntax tree produced by the parser.
//!
//! Nodes are built bottom-up, never mutated afterwards and carry the byte span
//! of the source text they came from. Statements are generic over their
//! dialect; see [`stmt`].

pub mod decl;
pub mod expr;
pub mod literal;
pub(crate) mod precedence;
pub mod stmt;
pub mod types;

pub use decl::{
    Body, ExportDecl, ExportItem, Formal, FunctionDef, ImportDecl, InterfaceDecl, InterfaceMember,
    InterfaceStmt, MethodDef, MethodProto, ModuleArg, ModuleDef, ModuleParam, ModuleStmt, Package,
    PackageBody, PackageStmt, Rule, SourceFile, SubinterfaceDecl, SubinterfaceDef, TypeFormal,
    TypeFormalKind,
};
pub use expr::{
    BinaryOp, CondPredicate, Expr, ExprKind, InterfaceExpr, MemberBind, TaggedPayload, UnaryOp,
    ValueBlock,
};
pub use literal::{Base, Exponent, IntLiteral, Literal, RealLiteral, Sign};
pub use stmt::{
    ActionCtx, ActionValueCtx, Assign, Bind, Block, DeclType, Declarator, Dialect, DialectKind,
    ExpressionCtx, FunctionBodyCtx, IfStmt, Label, Labels, Leaf, Stmt, StmtKind, VarDecl,
};
pub use types::{Type, TypeKind};
