//! Member lookup on type nodes.
//!
//! A [`TypeRef`] is a view of a type node in the AST. Member lookup has two
//! modes: [`MemberMode::Value`] for members reached through a value of the
//! type, and [`MemberMode::ArrayElement`] for members of the contained
//! element type once the caller has indexed into an array or dictionary.
//!
//! Arrays and dictionaries delegate to their single child type and, in value
//! mode, also offer their built-in collection methods. Character scalars
//! offer the string methods. Named types are followed through `TYPE`
//! definitions and system classes. `LIKE` types depend on the database
//! schema and are opaque here.

use bitflags::bitflags;
use fgl_ir::{Ast, Ident, LanguageVersion, NodeId, NodeKind};

use crate::builtins::{find_method, methods_for, Receiver, SystemClass};
use crate::entity::{Builtin, Resolution};

/// Longest chain of `TYPE a b` aliases followed before giving up.
const MAX_ALIAS_DEPTH: usize = 32;

bitflags! {
    /// Which kinds of members a lookup accepts.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct MemberKinds: u8 {
        /// Record members.
        const VARIABLE = 1 << 0;
        /// Methods of collections, strings and classes.
        const METHOD = 1 << 1;
        const ALL = Self::VARIABLE.bits() | Self::METHOD.bits();
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum MemberMode {
    #[default]
    Value,
    ArrayElement,
}

/// Target of a named type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NamedTarget {
    /// Type node of a `TYPE` definition.
    Node(NodeId),
    Class(&'static SystemClass),
    /// Known to exist, but its members cannot be listed (an imported or
    /// external type).
    Opaque,
}

/// Resolves the path of a named type.
pub trait TypeNames {
    /// `None` when the name is unknown.
    fn resolve_type(&self, path: &[Ident], at: NodeId) -> Option<NamedTarget>;
}

/// A member found on a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Member {
    /// Record member; `decl` is its `VarDef`.
    Field {
        name: Box<str>,
        decl: NodeId,
        ty: Option<NodeId>,
    },
    Method(Builtin),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Field { name, .. } => name,
            Member::Method(builtin) => builtin.name(),
        }
    }

    pub fn into_resolution(self) -> Resolution {
        match self {
            Member::Field { decl, ty, .. } => Resolution::Field { decl, ty },
            Member::Method(builtin) => Resolution::Builtin(builtin),
        }
    }
}

/// Outcome of a single member lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberLookup {
    Found(Member),
    /// The type is fully known and has no such member.
    Missing,
    /// The type's members cannot be determined here.
    Opaque,
}

/// What a type is once aliases are followed.
enum Shape<'a> {
    Node(TypeRef<'a>),
    Class(&'static SystemClass),
    Opaque,
}

/// A type node of an AST.
#[derive(Copy, Clone, Debug)]
pub struct TypeRef<'a> {
    ast: &'a Ast,
    id: NodeId,
}

impl<'a> TypeRef<'a> {
    /// `None` unless `id` is a type node.
    pub fn new(ast: &'a Ast, id: NodeId) -> Option<Self> {
        ast.kind(id).is_type().then_some(TypeRef { ast, id })
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn kind(self) -> &'a NodeKind {
        self.ast.kind(self.id)
    }

    fn version(self) -> LanguageVersion {
        self.ast.version()
    }

    /// Element type of an array, value type of a dictionary.
    pub fn element(self) -> Option<TypeRef<'a>> {
        match self.kind() {
            NodeKind::ArrayType { element, .. } => element.and_then(|e| TypeRef::new(self.ast, e)),
            NodeKind::DictionaryType { value } => value.and_then(|v| TypeRef::new(self.ast, v)),
            _ => None,
        }
    }

    /// Built-in method receiver of this type, if it has one.
    fn receiver(self) -> Option<Receiver> {
        match self.kind() {
            NodeKind::ArrayType { .. } => Some(Receiver::Array),
            NodeKind::DictionaryType { .. } => Some(Receiver::Dictionary),
            NodeKind::ScalarType { kind, .. } if kind.is_character() => Some(Receiver::String),
            _ => None,
        }
    }

    pub fn is_collection(self) -> bool {
        matches!(
            self.kind(),
            NodeKind::ArrayType { .. } | NodeKind::DictionaryType { .. }
        )
    }

    /// Return count when values of this type can be called.
    pub fn return_count(self) -> Option<usize> {
        match self.kind() {
            NodeKind::FunctionType { returns, .. } => Some(returns.len()),
            _ => None,
        }
    }

    /// Follow named types to the type they stand for.
    fn shape(self, names: &dyn TypeNames) -> Shape<'a> {
        let mut current = self;
        for _ in 0..MAX_ALIAS_DEPTH {
            let NodeKind::NamedType { path } = current.kind() else {
                return Shape::Node(current);
            };
            match names.resolve_type(path, current.id) {
                Some(NamedTarget::Node(target)) => match TypeRef::new(current.ast, target) {
                    Some(next) => current = next,
                    None => return Shape::Opaque,
                },
                Some(NamedTarget::Class(class)) => return Shape::Class(class),
                Some(NamedTarget::Opaque) | None => return Shape::Opaque,
            }
        }
        tracing::debug!(ty = ?self.id, "named type alias chain too long");
        Shape::Opaque
    }

    /// The type this stands for once named types are followed; `None` for
    /// system classes and types that cannot be known here.
    pub fn resolve(self, names: &dyn TypeNames) -> Option<TypeRef<'a>> {
        match self.shape(names) {
            Shape::Node(ty) => Some(ty),
            Shape::Class(_) | Shape::Opaque => None,
        }
    }

    /// Look up member `name`.
    pub fn lookup_member(
        self,
        name: &str,
        mode: MemberMode,
        kinds: MemberKinds,
        names: &dyn TypeNames,
    ) -> MemberLookup {
        fgl_stack::ensure_sufficient_stack(|| self.lookup_member_inner(name, mode, kinds, names))
    }

    fn lookup_member_inner(
        self,
        name: &str,
        mode: MemberMode,
        kinds: MemberKinds,
        names: &dyn TypeNames,
    ) -> MemberLookup {
        let version = self.version();
        let ty = match self.shape(names) {
            Shape::Node(ty) => ty,
            Shape::Class(class) => {
                return class
                    .object_methods(version)
                    .find(|m| m.name.eq_ignore_ascii_case(name))
                    .filter(|_| kinds.contains(MemberKinds::METHOD))
                    .map_or(MemberLookup::Missing, |m| {
                        MemberLookup::Found(Member::Method(Builtin::ClassMethod(m)))
                    });
            }
            Shape::Opaque => return MemberLookup::Opaque,
        };

        if mode == MemberMode::Value && kinds.contains(MemberKinds::METHOD) {
            if let Some(method) = ty
                .receiver()
                .and_then(|receiver| find_method(receiver, name, version))
            {
                return MemberLookup::Found(Member::Method(Builtin::Method(method)));
            }
        }

        match ty.kind() {
            NodeKind::ArrayType { .. } | NodeKind::DictionaryType { .. } => match ty.element() {
                Some(element) => element.lookup_member(name, MemberMode::Value, kinds, names),
                None => MemberLookup::Opaque,
            },
            NodeKind::RecordType { .. } if kinds.contains(MemberKinds::VARIABLE) => ty
                .fields()
                .find(|m| m.name().eq_ignore_ascii_case(name))
                .map_or(MemberLookup::Missing, MemberLookup::Found),
            NodeKind::LikeType { .. } => MemberLookup::Opaque,
            _ => MemberLookup::Missing,
        }
    }

    /// Every member visible in `mode`.
    ///
    /// Opaque parts of the type contribute nothing.
    pub fn members(
        self,
        mode: MemberMode,
        kinds: MemberKinds,
        names: &dyn TypeNames,
    ) -> Vec<Member> {
        fgl_stack::ensure_sufficient_stack(|| self.members_inner(mode, kinds, names))
    }

    fn members_inner(
        self,
        mode: MemberMode,
        kinds: MemberKinds,
        names: &dyn TypeNames,
    ) -> Vec<Member> {
        let version = self.version();
        let ty = match self.shape(names) {
            Shape::Node(ty) => ty,
            Shape::Class(class) if kinds.contains(MemberKinds::METHOD) => {
                return class
                    .object_methods(version)
                    .map(|m| Member::Method(Builtin::ClassMethod(m)))
                    .collect();
            }
            Shape::Class(_) | Shape::Opaque => return Vec::new(),
        };

        let mut out = Vec::new();
        if mode == MemberMode::Value && kinds.contains(MemberKinds::METHOD) {
            if let Some(receiver) = ty.receiver() {
                out.extend(
                    methods_for(receiver, version).map(|m| Member::Method(Builtin::Method(m))),
                );
            }
        }
        match ty.kind() {
            NodeKind::ArrayType { .. } | NodeKind::DictionaryType { .. } => {
                if let Some(element) = ty.element() {
                    out.extend(element.members(MemberMode::Value, kinds, names));
                }
            }
            NodeKind::RecordType { .. } if kinds.contains(MemberKinds::VARIABLE) => {
                out.extend(ty.fields());
            }
            _ => {}
        }
        out
    }

    /// Members of a `RECORD` type in declaration order.
    fn fields(self) -> impl Iterator<Item = Member> + 'a {
        let ast = self.ast;
        let fields: &'a [NodeId] = match ast.kind(self.id) {
            NodeKind::RecordType { fields } => fields,
            _ => &[],
        };
        fields.iter().flat_map(move |&decl| {
            let (names, ty): (&'a [Ident], Option<NodeId>) = match ast.kind(decl) {
                NodeKind::VarDef { names, ty } => (names, *ty),
                _ => (&[], None),
            };
            names.iter().map(move |name| Member::Field {
                name: name.text.clone(),
                decl,
                ty,
            })
        })
    }
}

#[cfg(test)]
mod tests;
