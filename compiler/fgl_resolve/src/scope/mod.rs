//! Module scope chain.
//!
//! A module has one scope for its module-level declarations (including the
//! contents of `GLOBALS` blocks) and one child scope per routine holding its
//! parameters and `DEFINE`d locals. Lookups walk from the routine scope to
//! the module scope. Keys are lowercase: FGL names are case-insensitive.

use std::rc::Rc;

use fgl_ir::{Ast, ImportKind, NodeId, NodeKind};
use rustc_hash::FxHashMap;

/// What kind of declaration a name refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Constant,
    Type,
    Function,
    /// `IMPORT FGL module` or `IMPORT JAVA class`.
    Module(ImportKind),
}

/// A declaration visible by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub decl: NodeId,
    /// Declared type node of variables, parameters, constants and types.
    pub ty: Option<NodeId>,
}

impl Symbol {
    pub fn new(kind: SymbolKind, decl: NodeId, ty: Option<NodeId>) -> Self {
        Symbol { kind, decl, ty }
    }
}

#[derive(Clone, Debug, Default)]
struct ScopeInner {
    bindings: FxHashMap<String, Symbol>,
    parent: Option<Scope>,
}

/// One level of the scope chain.
///
/// `Rc`-shared so routine scopes hold their parent without copying it.
#[derive(Clone, Debug, Default)]
pub struct Scope(Rc<ScopeInner>);

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    /// Create a child scope.
    #[must_use]
    pub fn child(&self) -> Self {
        Scope(Rc::new(ScopeInner {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        }))
    }

    /// Bind `name` in this scope, replacing an earlier binding of the same
    /// name at this level.
    pub fn bind(&mut self, name: &str, symbol: Symbol) {
        let inner = Rc::make_mut(&mut self.0);
        inner.bindings.insert(name.to_ascii_lowercase(), symbol);
    }

    /// Look `name` up here, then in the parents.
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        let key = name.to_ascii_lowercase();
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(symbol) = current.0.bindings.get(&key) {
                return Some(*symbol);
            }
            scope = current.0.parent.as_ref();
        }
        None
    }

    /// Look `name` up in this level only.
    pub fn lookup_local(&self, name: &str) -> Option<Symbol> {
        self.0.bindings.get(&name.to_ascii_lowercase()).copied()
    }

    /// Names bound at this level.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.bindings.keys().map(String::as_str)
    }
}

/// All scopes of one module, plus its cursor and statement declarations.
#[derive(Clone, Debug, Default)]
pub struct ModuleScope {
    module: Scope,
    routines: FxHashMap<NodeId, Scope>,
    cursors: FxHashMap<String, NodeId>,
    /// Extension modules brought in with `IMPORT name`.
    packages: Vec<String>,
}

impl ModuleScope {
    /// Collect the declarations of `ast`.
    pub fn build(ast: &Ast) -> Self {
        let mut scope = ModuleScope::default();
        let Some(root) = ast.root() else {
            return scope;
        };
        let items = ast.children(root).to_vec();
        for item in &items {
            scope.declare_item(ast, *item);
        }
        // Routines last, so their scopes see every module-level name.
        for item in items {
            if ast.kind(item).is_routine() {
                let routine = scope.routine_scope(ast, item);
                scope.routines.insert(item, routine);
            }
        }
        for (id, node) in ast.iter() {
            if matches!(node.kind, NodeKind::Declare { .. } | NodeKind::Prepare { .. }) {
                if let Some(name) = ast.attributes.variable(id) {
                    scope.cursors.entry(name.to_ascii_lowercase()).or_insert(id);
                }
            }
        }
        tracing::trace!(
            routines = scope.routines.len(),
            cursors = scope.cursors.len(),
            "module scope built"
        );
        scope
    }

    fn declare_item(&mut self, ast: &Ast, item: NodeId) {
        match ast.kind(item) {
            NodeKind::Import { kind, path } => match kind {
                ImportKind::Builtin => {
                    if let Some(first) = path.first() {
                        self.packages.push(first.key());
                    }
                }
                ImportKind::Fgl | ImportKind::Java => {
                    if let Some(last) = path.last() {
                        self.module
                            .bind(&last.text, Symbol::new(SymbolKind::Module(*kind), item, None));
                    }
                }
            },
            NodeKind::Globals { items, .. } => {
                for inner in items {
                    self.declare_item(ast, *inner);
                }
            }
            NodeKind::Function { name: Some(name), .. } => {
                self.module
                    .bind(&name.text, Symbol::new(SymbolKind::Function, item, None));
            }
            _ => declare_into(&mut self.module, ast, item),
        }
    }

    fn routine_scope(&self, ast: &Ast, routine: NodeId) -> Scope {
        let mut scope = self.module.child();
        if let NodeKind::Function { params, .. } = ast.kind(routine) {
            for param in params {
                if let NodeKind::Param { name, ty } = ast.kind(*param) {
                    scope.bind(&name.text, Symbol::new(SymbolKind::Parameter, *param, *ty));
                }
            }
        }
        // Locals are routine-wide wherever the DEFINE sits.
        for id in ast.post_order(routine) {
            declare_into(&mut scope, ast, id);
        }
        scope
    }

    /// Find `name` as seen from node `at`.
    pub fn lookup(&self, ast: &Ast, name: &str, at: NodeId) -> Option<Symbol> {
        self.scope_at(ast, at).lookup(name)
    }

    /// Innermost scope that applies at node `at`.
    pub fn scope_at(&self, ast: &Ast, at: NodeId) -> &Scope {
        let routine = if ast.kind(at).is_routine() {
            Some(at)
        } else {
            ast.enclosing_routine(at)
        };
        routine
            .and_then(|r| self.routines.get(&r))
            .unwrap_or(&self.module)
    }

    pub fn module(&self) -> &Scope {
        &self.module
    }

    /// First `DECLARE` or `PREPARE` of `name` anywhere in the module.
    pub fn cursor(&self, name: &str) -> Option<NodeId> {
        self.cursors.get(&name.to_ascii_lowercase()).copied()
    }

    /// Whether the extension module `name` was imported.
    pub fn imports_package(&self, name: &str) -> bool {
        self.packages.iter().any(|p| p.eq_ignore_ascii_case(name))
    }
}

/// Bind what a `DEFINE`, `CONSTANT` or `TYPE` statement declares.
fn declare_into(scope: &mut Scope, ast: &Ast, stmt: NodeId) {
    match ast.kind(stmt) {
        NodeKind::Define { vars, .. } => {
            for var in vars {
                if let NodeKind::VarDef { names, ty } = ast.kind(*var) {
                    for name in names {
                        scope.bind(&name.text, Symbol::new(SymbolKind::Variable, *var, *ty));
                    }
                }
            }
        }
        NodeKind::Constant { defs, .. } => {
            for def in defs {
                if let NodeKind::ConstDef { name, ty, .. } = ast.kind(*def) {
                    scope.bind(&name.text, Symbol::new(SymbolKind::Constant, *def, *ty));
                }
            }
        }
        NodeKind::TypeDecl { defs, .. } => {
            for def in defs {
                if let NodeKind::TypeDef { name, ty } = ast.kind(*def) {
                    scope.bind(&name.text, Symbol::new(SymbolKind::Type, *def, *ty));
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests;
