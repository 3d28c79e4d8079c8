//! What a reference resolves to.
//!
//! A [`Resolution`] is attached per node by the resolution pass. Declarations
//! in the module point back at their declaring node; built-ins point into the
//! static tables; anything an external provider answered is carried as an
//! [`ExternalEntity`].

use fgl_ir::{Ast, NodeId, NodeKind};

use crate::builtins::{
    BuiltinEntry, BuiltinFunction, ClassMethod, CollectionMethod, ProgramRegister, SystemClass,
    SystemConstant, SystemMacro, SystemPackage,
};

/// A built-in table entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Builtin {
    Function(&'static BuiltinFunction),
    Package(&'static SystemPackage),
    Class(&'static SystemClass),
    ClassMethod(&'static ClassMethod),
    Constant(&'static SystemConstant),
    Macro(&'static SystemMacro),
    Register(&'static ProgramRegister),
    Method(&'static CollectionMethod),
}

impl Builtin {
    pub fn entry(self) -> &'static dyn BuiltinEntry {
        match self {
            Builtin::Function(e) => e,
            Builtin::Package(e) => e,
            Builtin::Class(e) => e,
            Builtin::ClassMethod(e) => e,
            Builtin::Constant(e) => e,
            Builtin::Macro(e) => e,
            Builtin::Register(e) => e,
            Builtin::Method(e) => e,
        }
    }

    pub fn name(self) -> &'static str {
        self.entry().name()
    }

    pub fn doc(self) -> &'static str {
        self.entry().doc()
    }
}

/// Kind of symbol an external provider found.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExternalKind {
    Function { returns: usize },
    Variable,
    Constant,
    Type,
    Table,
    Column,
}

/// A symbol found outside the current module.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExternalEntity {
    pub name: Box<str>,
    pub kind: ExternalKind,
    /// Module or file the symbol was found in, when known.
    pub origin: Option<Box<str>>,
}

impl ExternalEntity {
    pub fn new(name: impl Into<Box<str>>, kind: ExternalKind) -> Self {
        ExternalEntity {
            name: name.into(),
            kind,
            origin: None,
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<Box<str>>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Result of resolving one reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Variable or parameter; `decl` is the `VarDef` or `Param` node.
    Variable { decl: NodeId, ty: Option<NodeId> },
    /// Record member reached through `.name`; `decl` is its `VarDef`.
    Field { decl: NodeId, ty: Option<NodeId> },
    Constant { decl: NodeId },
    /// `decl` is the `TypeDef`.
    Type { decl: NodeId },
    /// `decl` is the `Function` node.
    Function { decl: NodeId, returns: usize },
    /// `DECLARE` or `PREPARE` statement.
    Cursor { decl: NodeId },
    /// `IMPORT` statement that brought a module name into scope.
    Module { decl: NodeId },
    Builtin(Builtin),
    External(ExternalEntity),
}

impl Resolution {
    /// Number of values a call to this returns, or `None` when it cannot be
    /// called.
    pub fn return_count(&self, ast: &Ast) -> Option<usize> {
        match self {
            Resolution::Function { returns, .. } => Some(*returns),
            Resolution::Variable { ty: Some(ty), .. } | Resolution::Field { ty: Some(ty), .. } => {
                match ast.kind(*ty) {
                    NodeKind::FunctionType { returns, .. } => Some(returns.len()),
                    _ => None,
                }
            }
            Resolution::Builtin(Builtin::Function(f)) => Some(usize::from(f.returns)),
            Resolution::Builtin(Builtin::ClassMethod(m)) => Some(usize::from(m.returns)),
            Resolution::Builtin(Builtin::Method(m)) => Some(usize::from(m.returns)),
            Resolution::External(ExternalEntity {
                kind: ExternalKind::Function { returns },
                ..
            }) => Some(*returns),
            _ => None,
        }
    }

    /// Whether a value can be assigned to this.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Resolution::Variable { .. }
                | Resolution::Field { .. }
                | Resolution::Builtin(Builtin::Register(_))
                | Resolution::External(ExternalEntity {
                    kind: ExternalKind::Variable,
                    ..
                })
        )
    }

    /// Declared type node of a variable or member.
    pub fn declared_type(&self) -> Option<NodeId> {
        match self {
            Resolution::Variable { ty, .. } | Resolution::Field { ty, .. } => *ty,
            _ => None,
        }
    }

    /// Short description for messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Resolution::Variable { .. } => "variable",
            Resolution::Field { .. } => "record member",
            Resolution::Constant { .. } | Resolution::Builtin(Builtin::Constant(_)) => "constant",
            Resolution::Type { .. } => "type",
            Resolution::Function { .. } | Resolution::Builtin(Builtin::Function(_)) => "function",
            Resolution::Cursor { .. } => "cursor",
            Resolution::Module { .. } => "module",
            Resolution::Builtin(Builtin::Package(_)) => "package",
            Resolution::Builtin(Builtin::Class(_)) => "class",
            Resolution::Builtin(Builtin::ClassMethod(_) | Builtin::Method(_)) => "method",
            Resolution::Builtin(Builtin::Macro(_)) => "macro",
            Resolution::Builtin(Builtin::Register(_)) => "program register",
            Resolution::External(entity) => match entity.kind {
                ExternalKind::Function { .. } => "function",
                ExternalKind::Variable => "variable",
                ExternalKind::Constant => "constant",
                ExternalKind::Type => "type",
                ExternalKind::Table => "table",
                ExternalKind::Column => "column",
            },
        }
    }
}

#[cfg(test)]
mod tests;
