//! Type expressions as written in declarations.
//!
//! Types are recorded structurally only; whether `Bit#(8)` is well formed is
//! a question for a later phase.

use crate::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub kind: TypeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// `Bit#(8)`, `Reg#(Bit#(8))`, `Bool`.
    Named { name: String, params: Vec<Type> },
    /// A lowercase type variable such as `t` in `Get#(t)`.
    Var(String),
    /// Type-level number, e.g. the `8` in `Bit#(8)`.
    Nat(u64),
    /// `bit [hi:lo]`.
    Bit { hi: u64, lo: u64 },
}

impl Type {
    /// Head name of a named type, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Render the type back to compact source form.
    #[must_use]
    pub fn to_source(&self) -> String {
        match &self.kind {
            TypeKind::Named { name, params } if params.is_empty() => name.clone(),
            TypeKind::Named { name, params } => {
                let inner: Vec<String> = params.iter().map(Self::to_source).collect();
                format!("{name}#({})", inner.join(", "))
            }
            TypeKind::Var(name) => name.clone(),
            TypeKind::Nat(n) => n.to_string(),
            TypeKind::Bit { hi, lo } => format!("bit[{hi}:{lo}]"),
        }
    }
}
