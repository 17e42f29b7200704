//! Declaration-level AST: packages, interfaces, modules, rules, methods and
//! functions.

use super::expr::{CondPredicate, Expr};
use super::stmt::{
    ActionCtx, ActionValueCtx, Assign, Bind, ExpressionCtx, FunctionBodyCtx, Label, Stmt, VarDecl,
};
use super::types::Type;
use crate::Span;

/// Root of a parsed source unit.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceFile {
    Package(Package),
    /// A bare sequence of exports, imports and declarations.
    Items(PackageBody),
}

impl SourceFile {
    /// Top-level contents regardless of whether a `package` wrapper exists.
    #[must_use]
    pub fn body(&self) -> &PackageBody {
        match self {
            Self::Package(pkg) => &pkg.body,
            Self::Items(body) => body,
        }
    }
}

impl Default for SourceFile {
    fn default() -> Self {
        Self::Items(PackageBody::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageBody {
    pub exports: Vec<ExportDecl>,
    pub imports: Vec<ImportDecl>,
    pub stmts: Vec<PackageStmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub name: String,
    pub body: PackageBody,
    pub end_label: Option<Label>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportItem {
    /// `name` or `Name`, with `(..)` when members are exported too.
    Ident { name: String, with_members: bool },
    /// `Pkg::*`
    Package(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDecl {
    pub items: Vec<ExportItem>,
    pub span: Span,
}

/// `import A::*, B::*;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub packages: Vec<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PackageStmt {
    Interface(InterfaceDecl),
    Module(ModuleDef),
    Function(FunctionDef),
    VarDecl(VarDecl),
    Assign(Assign),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFormalKind {
    Type,
    Numeric,
    String,
}

/// `[numeric | string] type Name` in an interface header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFormal {
    pub kind: TypeFormalKind,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub name: String,
    pub formals: Vec<TypeFormal>,
    pub members: Vec<InterfaceMember>,
    pub end_label: Option<Label>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceMember {
    Method(MethodProto),
    Subinterface(SubinterfaceDecl),
}

/// Formal parameter of a method, function or prototype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formal {
    /// Method definitions may omit the type.
    pub ty: Option<Type>,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodProto {
    pub ret: Type,
    pub name: String,
    pub formals: Vec<Formal>,
    pub span: Span,
}

/// `interface Type name;` inside an interface declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct SubinterfaceDecl {
    pub ty: Type,
    pub name: String,
    pub span: Span,
}

/// `[parameter] Type name` inside `#( ... )`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleParam {
    pub parameter: bool,
    pub ty: Type,
    pub name: String,
    pub span: Span,
}

/// Interface type (and optional name) inside the module's argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleArg {
    pub ty: Type,
    pub name: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDef {
    /// Monad type in `module [Type] mkFoo`.
    pub ctx_type: Option<Type>,
    pub name: String,
    pub params: Vec<ModuleParam>,
    pub args: Vec<ModuleArg>,
    pub stmts: Vec<ModuleStmt>,
    pub end_label: Option<Label>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModuleStmt {
    Method(MethodDef),
    Subinterface(SubinterfaceDef),
    Rule(Rule),
    Return(Expr),
    VarDecl(VarDecl),
    Bind(Bind),
    Assign(Assign),
    /// Call statement such as `mkConnection(a, b);`.
    Expr(Expr),
    Function(FunctionDef),
    Module(ModuleDef),
}

/// Statements of a method or function body, in the dialect chosen by the
/// declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Action(Vec<Stmt<ActionCtx>>),
    ActionValue(Vec<Stmt<ActionValueCtx>>),
    Value(Vec<Stmt<FunctionBodyCtx>>),
    /// The whole body is one `action` or `actionvalue` block expression.
    Block(Expr),
}

impl Body {
    /// Number of top-level statements; a block body counts as one.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Action(stmts) => stmts.len(),
            Self::ActionValue(stmts) => stmts.len(),
            Self::Value(stmts) => stmts.len(),
            Self::Block(_) => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub ret: Option<Type>,
    pub name: String,
    pub formals: Vec<Formal>,
    pub guard: Option<CondPredicate>,
    pub body: Body,
    pub end_label: Option<Label>,
    pub span: Span,
}

/// `interface Type name; interfaceStmt* endinterface`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubinterfaceDef {
    pub ty: Type,
    pub name: String,
    pub stmts: Vec<InterfaceStmt>,
    pub end_label: Option<Label>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceStmt {
    Method(MethodDef),
    Subinterface(SubinterfaceDef),
    Stmt(Stmt<ExpressionCtx>),
}

impl InterfaceStmt {
    /// Name of the interface member this statement defines, if any.
    #[must_use]
    pub fn member_name(&self) -> Option<&str> {
        match self {
            Self::Method(def) => Some(&def.name),
            Self::Subinterface(def) => Some(&def.name),
            Self::Stmt(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub name: String,
    pub guard: Option<CondPredicate>,
    pub body: Vec<Stmt<ActionCtx>>,
    pub end_label: Option<Label>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub ret: Type,
    pub name: String,
    pub formals: Vec<Formal>,
    pub body: Body,
    pub end_label: Option<Label>,
    pub span: Span,
}
