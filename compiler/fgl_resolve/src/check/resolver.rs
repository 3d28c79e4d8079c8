use fgl_diagnostic::ErrorCode;
use fgl_ir::{
    Ast, CursorSource, Ident, ImportKind, LanguageVersion, MenuOptionKind, NameSuffix, NodeId,
    NodeKind, Span, WheneverAction,
};

use crate::analysis::{AnalysisEnv, ModuleAnalysis, ResolveError, SearchMode};
use crate::builtins::{self, SystemClass};
use crate::deferred::DeferredSearches;
use crate::entity::{Builtin, ExternalEntity, Resolution};
use crate::provider::{function_return_count, ProviderResult};
use crate::scope::{ModuleScope, Symbol, SymbolKind};
use crate::typeref::{MemberKinds, MemberLookup, MemberMode, NamedTarget, TypeNames, TypeRef};

/// What resolving one reference produced.
enum Outcome {
    Resolved(Resolution),
    /// Exists as far as can be told, but cannot be pinned down here.
    Unknown,
    /// Record the key and retry later.
    Deferred(String),
    Failed(ResolveError),
}

/// One step along a member path.
enum Step {
    Found(Resolution),
    Missing,
    Opaque,
}

/// Answer of an external provider, or the lack of one.
enum External {
    Found(ExternalEntity),
    NotFound,
    Later,
    /// No provider configured, or providers are off in quick mode.
    Unavailable,
}

impl From<ProviderResult> for External {
    fn from(result: ProviderResult) -> Self {
        match result {
            ProviderResult::Found(entity) => External::Found(entity),
            ProviderResult::NotFound => External::NotFound,
            ProviderResult::SearchLater => External::Later,
        }
    }
}

/// Whether a resolved reference can be called.
enum Callable {
    Returns(usize),
    No,
    /// Its type cannot be known here.
    Unknown,
}

/// Where a type path leads.
enum TypeTarget {
    Declared { decl: NodeId, ty: Option<NodeId> },
    Class(&'static SystemClass),
    Module { decl: NodeId, kind: ImportKind },
}

pub(super) struct Resolver<'a, 'p> {
    ast: &'a Ast,
    env: &'a AnalysisEnv<'p>,
    scope: ModuleScope,
    version: LanguageVersion,
    mode: SearchMode,
    call_context: bool,
    analysis: &'a mut ModuleAnalysis,
    deferred: &'a mut DeferredSearches,
    on_error: &'a mut dyn FnMut(ResolveError),
}

impl<'a, 'p> Resolver<'a, 'p> {
    pub(super) fn new(
        ast: &'a Ast,
        env: &'a AnalysisEnv<'p>,
        mode: SearchMode,
        call_context: bool,
        analysis: &'a mut ModuleAnalysis,
        deferred: &'a mut DeferredSearches,
        on_error: &'a mut dyn FnMut(ResolveError),
    ) -> Self {
        Resolver {
            ast,
            env,
            scope: ModuleScope::build(ast),
            version: env.version,
            mode,
            call_context,
            analysis,
            deferred,
            on_error,
        }
    }

    pub(super) fn visit(&mut self, id: NodeId) {
        let ast = self.ast;
        match ast.kind(id) {
            NodeKind::Name { base, suffixes } => {
                if !self.is_action_name(id) {
                    self.resolve_name(id, base, suffixes);
                }
            }
            NodeKind::Call { returning, .. } => {
                self.check_call_arity(id);
                for &target in returning {
                    self.check_assignable(target);
                }
            }
            NodeKind::Let {
                target: Some(target),
                ..
            } => self.check_assignable(*target),
            NodeKind::Open { cursor, .. }
            | NodeKind::Fetch { cursor, .. }
            | NodeKind::Close { cursor }
            | NodeKind::Foreach { cursor, .. } => {
                self.resolve_cursor(id, cursor.as_ref(), "cursor");
            }
            NodeKind::Free { cursor } => {
                self.resolve_cursor(id, cursor.as_ref(), "cursor or prepared statement");
            }
            NodeKind::Execute { statement, .. } => {
                self.resolve_cursor(id, statement.as_ref(), "prepared statement");
            }
            NodeKind::Declare {
                source: CursorSource::Prepared(statement),
                ..
            } => self.resolve_cursor(id, Some(statement), "prepared statement"),
            NodeKind::LikeType {
                table: Some(table),
                column,
            } => self.resolve_like(id, table, column.as_ref()),
            NodeKind::NamedType { path } => self.resolve_named_type(id, path),
            NodeKind::Whenever {
                action: Some(WheneverAction::Call(handler)),
                ..
            } => self.resolve_handler(id, handler),
            _ => {}
        }
    }

    fn report(&mut self, error: ResolveError) {
        (self.on_error)(error);
    }

    fn record(&mut self, id: NodeId, outcome: Outcome) {
        match outcome {
            Outcome::Resolved(resolution) => self.analysis.set(id, resolution),
            Outcome::Unknown => {
                self.analysis.remove(id);
            }
            Outcome::Deferred(key) => {
                self.analysis.remove(id);
                let offset = self.ast.span(id).start;
                tracing::debug!(%key, offset, "deferring lookup");
                self.deferred.add(&key, offset);
            }
            Outcome::Failed(error) => {
                self.analysis.remove(id);
                self.report(error);
            }
        }
    }

    /// Defer `key`, or give up quietly when deferring is off.
    fn deferral(&self, key: String) -> Outcome {
        match self.mode {
            SearchMode::Full => Outcome::Deferred(key),
            SearchMode::Quick => Outcome::Unknown,
        }
    }

    fn ask_functions(&self, key: &str) -> External {
        match (self.mode, self.env.functions) {
            (SearchMode::Full, Some(provider)) => provider.find_function(key).into(),
            _ => External::Unavailable,
        }
    }

    fn ask_program(&self, key: &str) -> External {
        match (self.mode, self.env.program) {
            (SearchMode::Full, Some(provider)) => provider.find_declaration(key).into(),
            _ => External::Unavailable,
        }
    }

    /// `ON ACTION name` names an action, not a variable.
    fn is_action_name(&self, id: NodeId) -> bool {
        self.ast.parent(id).is_some_and(|parent| {
            matches!(
                self.ast.kind(parent),
                NodeKind::MenuOption {
                    kind: MenuOptionKind::Action,
                    name: Some(name),
                    ..
                } if *name == id
            )
        })
    }

    fn is_callee(&self, id: NodeId) -> bool {
        self.ast.parent(id).is_some_and(|parent| {
            matches!(
                self.ast.kind(parent),
                NodeKind::Call { callee: Some(callee), .. } if *callee == id
            )
        })
    }

    // Names

    fn resolve_name(&mut self, id: NodeId, base: &Ident, suffixes: &[NameSuffix]) {
        let has_call = suffixes.iter().any(|s| matches!(s, NameSuffix::Call(_)));
        let call = self.call_context || has_call || self.is_callee(id);
        let outcome = match self.scope.lookup(self.ast, &base.text, id) {
            Some(Symbol {
                kind: SymbolKind::Module(ImportKind::Fgl),
                decl,
                ..
            }) => self.resolve_qualified(decl, base, suffixes, call),
            Some(symbol) => self.walk(symbol_resolution(self.ast, symbol), base, suffixes),
            None => self.resolve_unscoped(base, suffixes, call),
        };
        let outcome = match outcome {
            Outcome::Resolved(resolution)
                if has_call && matches!(self.callable(&resolution), Callable::No) =>
            {
                Outcome::Failed(ResolveError::new(
                    ErrorCode::E2004,
                    format!(
                        "`{}` is a {} and cannot be called",
                        name_text(self.ast, id),
                        resolution.describe()
                    ),
                    self.ast.span(id),
                ))
            }
            other => other,
        };
        self.record(id, outcome);
    }

    /// `module.member` through an `IMPORT FGL module`.
    fn resolve_qualified(
        &self,
        decl: NodeId,
        module: &Ident,
        suffixes: &[NameSuffix],
        call: bool,
    ) -> Outcome {
        let Some(NameSuffix::Member(member)) = suffixes.first() else {
            return Outcome::Resolved(Resolution::Module { decl });
        };
        let key = format!("{}.{}", module.key(), member.key());
        let external = if call {
            self.ask_functions(&key)
        } else {
            self.ask_program(&key)
        };
        match external {
            External::Found(entity) => Outcome::Resolved(Resolution::External(entity)),
            External::NotFound => Outcome::Failed(ResolveError::new(
                ErrorCode::E2001,
                format!("no definition found for `{module}.{member}`"),
                module.span.merge(member.span),
            )),
            External::Later | External::Unavailable => self.deferral(key),
        }
    }

    /// A name not declared in the module: providers first, then built-ins.
    ///
    /// A project definition shadows a built-in of the same name, so a
    /// provider that may still find one defers the lookup even when a
    /// built-in matches.
    fn resolve_unscoped(
        &self,
        base: &Ident,
        suffixes: &[NameSuffix],
        call: bool,
    ) -> Outcome {
        let (text, span) = lookup_key(base, suffixes, call);
        let key = text.to_ascii_lowercase();
        let external = if call {
            self.ask_functions(&key)
        } else {
            self.ask_program(&key)
        };
        let unavailable = match external {
            External::Found(entity) if call => {
                return Outcome::Resolved(Resolution::External(entity));
            }
            External::Found(entity) => {
                return self.walk(Resolution::External(entity), base, suffixes);
            }
            External::Later => return self.deferral(key),
            External::NotFound => false,
            External::Unavailable => true,
        };

        if let Some(builtin) = self.builtin_base(base, call) {
            return self.walk(Resolution::Builtin(builtin), base, suffixes);
        }
        // Without a function provider another module may still define it.
        if unavailable && (call || self.mode == SearchMode::Quick) {
            return self.deferral(key);
        }
        Outcome::Failed(ResolveError::new(
            ErrorCode::E2001,
            format!("no definition found for `{text}`"),
            span,
        ))
    }

    fn builtin_base(&self, base: &Ident, call: bool) -> Option<Builtin> {
        let name = base.as_str();
        let version = self.version;
        if call {
            if let Some(function) = builtins::find_function(name, version) {
                return Some(Builtin::Function(function));
            }
        }
        if let Some(package) = builtins::find_package(name, version) {
            if package.implicit || self.scope.imports_package(package.name) {
                return Some(Builtin::Package(package));
            }
        }
        builtins::find_register(name, version)
            .map(Builtin::Register)
            .or_else(|| builtins::find_constant(name, version).map(Builtin::Constant))
            .or_else(|| builtins::find_macro(name, version).map(Builtin::Macro))
    }

    /// Follow the member suffixes of a name from its resolved base.
    ///
    /// Stops at a call or `.*`; indexing switches the next lookup to the
    /// element type.
    fn walk(&self, start: Resolution, base: &Ident, suffixes: &[NameSuffix]) -> Outcome {
        let mut current = start;
        let mut mode = MemberMode::Value;
        let mut path = base.text.to_string();
        for suffix in suffixes {
            match suffix {
                NameSuffix::Call(_) | NameSuffix::AllMembers => break,
                NameSuffix::Index(_) => mode = MemberMode::ArrayElement,
                NameSuffix::Member(member) => {
                    match self.member_of(&current, member, mode) {
                        Step::Found(next) => current = next,
                        Step::Opaque => return Outcome::Unknown,
                        Step::Missing => {
                            return Outcome::Failed(ResolveError::new(
                                ErrorCode::E2001,
                                format!("no definition found for `{member}` in `{path}`"),
                                member.span,
                            ));
                        }
                    }
                    mode = MemberMode::Value;
                    path.push('.');
                    path.push_str(&member.text);
                }
            }
        }
        Outcome::Resolved(current)
    }

    fn member_of(
        &self,
        current: &Resolution,
        member: &Ident,
        mode: MemberMode,
    ) -> Step {
        let name = member.as_str();
        let found = |resolution: Option<Resolution>| resolution.map_or(Step::Missing, Step::Found);
        match current {
            Resolution::Variable { ty, .. } | Resolution::Field { ty, .. } => {
                let Some(ty) = ty.and_then(|ty| TypeRef::new(self.ast, ty)) else {
                    return Step::Opaque;
                };
                match ty.lookup_member(name, mode, MemberKinds::ALL, self) {
                    MemberLookup::Found(member) => Step::Found(member.into_resolution()),
                    MemberLookup::Missing => Step::Missing,
                    MemberLookup::Opaque => Step::Opaque,
                }
            }
            Resolution::Builtin(Builtin::Package(package)) => found(
                package
                    .class(name, self.version)
                    .map(|class| Resolution::Builtin(Builtin::Class(class))),
            ),
            Resolution::Builtin(Builtin::Class(class)) => found(
                class
                    .method(name, self.version)
                    .map(|method| Resolution::Builtin(Builtin::ClassMethod(method))),
            ),
            Resolution::Builtin(Builtin::Register(register)) => found(
                register
                    .child(name, self.version)
                    .map(|child| Resolution::Builtin(Builtin::Register(child))),
            ),
            Resolution::External(_) | Resolution::Module { .. } => Step::Opaque,
            _ => Step::Missing,
        }
    }

    /// `WHENEVER ... CALL handler`
    fn resolve_handler(&mut self, id: NodeId, handler: &Ident) {
        let outcome = match self.scope.lookup(self.ast, &handler.text, id) {
            Some(symbol) if symbol.kind == SymbolKind::Function => {
                Outcome::Resolved(symbol_resolution(self.ast, symbol))
            }
            _ => self.resolve_unscoped(handler, &[], true),
        };
        self.record(id, outcome);
    }

    // Types

    fn find_type(&self, path: &[Ident], at: NodeId) -> Option<TypeTarget> {
        let (first, rest) = path.split_first()?;
        match self.scope.lookup(self.ast, &first.text, at) {
            Some(Symbol {
                kind: SymbolKind::Type,
                decl,
                ty,
            }) if rest.is_empty() => return Some(TypeTarget::Declared { decl, ty }),
            Some(Symbol {
                kind: SymbolKind::Module(kind @ ImportKind::Java),
                decl,
                ..
            }) => return Some(TypeTarget::Module { decl, kind }),
            Some(Symbol {
                kind: SymbolKind::Module(kind @ ImportKind::Fgl),
                decl,
                ..
            }) if !rest.is_empty() => return Some(TypeTarget::Module { decl, kind }),
            _ => {}
        }
        let [class] = rest else {
            return None;
        };
        builtins::find_package(&first.text, self.version)
            .filter(|package| package.implicit || self.scope.imports_package(package.name))?
            .class(&class.text, self.version)
            .map(TypeTarget::Class)
    }

    fn resolve_named_type(&mut self, id: NodeId, path: &[Ident]) {
        let text = path
            .iter()
            .map(Ident::as_str)
            .collect::<Vec<_>>()
            .join(".");
        let key = text.to_ascii_lowercase();
        let outcome = match self.find_type(path, id) {
            Some(TypeTarget::Declared { decl, .. }) => Outcome::Resolved(Resolution::Type { decl }),
            Some(TypeTarget::Class(class)) => {
                Outcome::Resolved(Resolution::Builtin(Builtin::Class(class)))
            }
            Some(TypeTarget::Module {
                decl,
                kind: ImportKind::Java | ImportKind::Builtin,
            }) => Outcome::Resolved(Resolution::Module { decl }),
            Some(TypeTarget::Module { .. }) => match self.ask_program(&key) {
                External::Found(entity) => Outcome::Resolved(Resolution::External(entity)),
                External::NotFound => self.missing_type(id, &text),
                External::Later | External::Unavailable => self.deferral(key),
            },
            None => match self.ask_program(&key) {
                External::Found(entity) => Outcome::Resolved(Resolution::External(entity)),
                External::Later => self.deferral(key),
                External::Unavailable if self.mode == SearchMode::Quick => Outcome::Unknown,
                External::NotFound | External::Unavailable => self.missing_type(id, &text),
            },
        };
        self.record(id, outcome);
    }

    fn missing_type(&self, id: NodeId, text: &str) -> Outcome {
        Outcome::Failed(ResolveError::new(
            ErrorCode::E2001,
            format!("no definition found for type `{text}`"),
            self.ast.span(id),
        ))
    }

    /// `LIKE tab.col` and `RECORD LIKE tab.*` against the schema.
    fn resolve_like(&mut self, id: NodeId, table: &Ident, column: Option<&Ident>) {
        let Some(database) = self.env.database.filter(|_| self.mode == SearchMode::Full) else {
            return;
        };
        let column_key = column.map(Ident::key);
        let outcome = match database.find_column(&table.key(), column_key.as_deref()) {
            ProviderResult::Found(entity) => Outcome::Resolved(Resolution::External(entity)),
            ProviderResult::NotFound => Outcome::Failed(ResolveError::new(
                ErrorCode::E2001,
                format!(
                    "no definition found for `{table}.{}`",
                    column.map_or("*", Ident::as_str)
                ),
                self.ast.span(id),
            )),
            ProviderResult::SearchLater => Outcome::Deferred(format!(
                "{}.{}",
                table.key(),
                column_key.as_deref().unwrap_or("*")
            )),
        };
        self.record(id, outcome);
    }

    // Statements

    /// Resolve a cursor or prepared statement reference.
    ///
    /// The parser binds references that follow their declaration in the same
    /// routine; the rest are looked up among all declarations of the module.
    fn resolve_cursor(&mut self, id: NodeId, name: Option<&Ident>, what: &str) {
        let Some(name) = name else {
            return;
        };
        let decl = self
            .ast
            .attributes
            .variable_reference(id)
            .or_else(|| self.scope.cursor(&name.text));
        let outcome = match decl {
            Some(decl) => Outcome::Resolved(Resolution::Cursor { decl }),
            None => Outcome::Failed(ResolveError::new(
                ErrorCode::E2005,
                format!("{what} `{name}` is not declared"),
                name.span,
            )),
        };
        self.record(id, outcome);
    }

    /// `CALL f() RETURNING a, b` must name as many targets as `f` returns.
    pub(super) fn check_call_arity(&mut self, id: NodeId) {
        let ast = self.ast;
        let NodeKind::Call {
            callee: Some(callee),
            returning,
        } = ast.kind(id)
        else {
            return;
        };
        if returning.is_empty() {
            return;
        }
        let Some(Callable::Returns(expected)) =
            self.analysis.get(*callee).map(|resolution| self.callable(resolution))
        else {
            return;
        };
        if returning.len() != expected {
            self.report(ResolveError::new(
                ErrorCode::E2002,
                format!(
                    "unexpected number of return variables ({}) found, expected {expected}",
                    returning.len()
                ),
                self.ast.span(id),
            ));
        }
    }

    fn callable(&self, resolution: &Resolution) -> Callable {
        if let Some(returns) = resolution.return_count(self.ast) {
            return Callable::Returns(returns);
        }
        let Some(ty) = resolution
            .declared_type()
            .and_then(|ty| TypeRef::new(self.ast, ty))
        else {
            return Callable::No;
        };
        match ty.resolve(self) {
            Some(ty) => ty.return_count().map_or(Callable::No, Callable::Returns),
            None => Callable::Unknown,
        }
    }

    /// Assignment targets must be storage.
    fn check_assignable(&mut self, target: NodeId) {
        let Some(resolution) = self.analysis.get(target) else {
            return;
        };
        if resolution.is_storage() {
            return;
        }
        let message = format!(
            "`{}` is a {}, not a variable",
            name_text(self.ast, target),
            resolution.describe()
        );
        self.report(ResolveError::new(
            ErrorCode::E2003,
            message,
            self.ast.span(target),
        ));
    }
}

impl TypeNames for Resolver<'_, '_> {
    fn resolve_type(&self, path: &[Ident], at: NodeId) -> Option<NamedTarget> {
        Some(match self.find_type(path, at)? {
            TypeTarget::Declared { ty, .. } => ty.map_or(NamedTarget::Opaque, NamedTarget::Node),
            TypeTarget::Class(class) => NamedTarget::Class(class),
            TypeTarget::Module { .. } => NamedTarget::Opaque,
        })
    }
}

fn symbol_resolution(ast: &Ast, symbol: Symbol) -> Resolution {
    let Symbol { kind, decl, ty } = symbol;
    match kind {
        SymbolKind::Variable | SymbolKind::Parameter => Resolution::Variable { decl, ty },
        SymbolKind::Constant => Resolution::Constant { decl },
        SymbolKind::Type => Resolution::Type { decl },
        SymbolKind::Function => Resolution::Function {
            decl,
            returns: function_return_count(ast, decl),
        },
        SymbolKind::Module(_) => Resolution::Module { decl },
    }
}

/// Lookup key of an unresolved name and the span it covers.
///
/// In call context members (and `[]` for indexing) are part of the key, up
/// to the call itself.
fn lookup_key(base: &Ident, suffixes: &[NameSuffix], call: bool) -> (String, Span) {
    let mut text = base.text.to_string();
    let mut span = base.span;
    if call {
        for suffix in suffixes {
            match suffix {
                NameSuffix::Member(member) => {
                    text.push('.');
                    text.push_str(&member.text);
                    span = span.merge(member.span);
                }
                NameSuffix::Index(_) => text.push_str("[]"),
                NameSuffix::AllMembers | NameSuffix::Call(_) => break,
            }
        }
    }
    (text, span)
}

/// `a.b.c` for a name node, without indexes and arguments.
fn name_text(ast: &Ast, id: NodeId) -> String {
    let NodeKind::Name { base, suffixes } = ast.kind(id) else {
        return ast.kind(id).name().to_owned();
    };
    let mut text = base.text.to_string();
    for suffix in suffixes {
        match suffix {
            NameSuffix::Member(member) => {
                text.push('.');
                text.push_str(&member.text);
            }
            NameSuffix::Call(_) => break,
            NameSuffix::Index(_) | NameSuffix::AllMembers => {}
        }
    }
    text
}
