//! External providers consulted during resolution.
//!
//! The resolver only knows the module it is checking. Names defined in other
//! modules, in `GLOBALS` files or in the database schema come from
//! providers supplied by the host. Each provider answers with a
//! [`ProviderResult`]; `SearchLater` means the answer may exist once more
//! modules are loaded, and makes the resolver defer the lookup.
//!
//! [`ProjectIndex`] is the provider the command-line driver builds from all
//! the modules it was given.

use fgl_ir::{Access, Ast, NodeId, NodeKind};
use rustc_hash::FxHashMap;

use crate::entity::{ExternalEntity, ExternalKind};

/// Answer of a provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderResult {
    Found(ExternalEntity),
    NotFound,
    /// Not known yet; ask again after more modules are loaded.
    SearchLater,
}

/// Resolves functions defined in other modules.
pub trait FunctionProvider: Send + Sync {
    /// `key` is the lowercase name, qualified as `module.function` when the
    /// call was qualified.
    fn find_function(&self, key: &str) -> ProviderResult;
}

/// Resolves table and column references against the database schema.
pub trait DatabaseProvider: Send + Sync {
    /// `column` is `None` for `table.*`.
    fn find_column(&self, table: &str, column: Option<&str>) -> ProviderResult;
}

/// Resolves program-level declarations (globals files and public module
/// variables, constants and types).
pub trait ProgramFileProvider: Send + Sync {
    fn find_declaration(&self, key: &str) -> ProviderResult;
}

/// Function and declaration index over the modules of a project.
///
/// While modules are still being added, misses answer `SearchLater`; after
/// [`ProjectIndex::seal`] they answer `NotFound`.
#[derive(Clone, Debug, Default)]
pub struct ProjectIndex {
    functions: FxHashMap<String, ExternalEntity>,
    declarations: FxHashMap<String, ExternalEntity>,
    sealed: bool,
}

impl ProjectIndex {
    pub fn new() -> Self {
        ProjectIndex::default()
    }

    /// Register the public functions and program-level declarations of a
    /// module.
    ///
    /// Functions are indexed under both `name` and `module.name`.
    /// Declarations are those of `GLOBALS` blocks and `PUBLIC` module-level
    /// statements, indexed the same two ways.
    pub fn add_module(&mut self, module: &str, ast: &Ast) {
        let Some(root) = ast.root() else {
            return;
        };
        let module_key = module.to_ascii_lowercase();
        for &item in ast.children(root) {
            match ast.kind(item) {
                NodeKind::Function {
                    access,
                    name: Some(name),
                    ..
                } if *access != Access::Private => {
                    let entity = ExternalEntity::new(
                        name.text.clone(),
                        ExternalKind::Function {
                            returns: function_return_count(ast, item),
                        },
                    )
                    .with_origin(module);
                    self.functions
                        .insert(format!("{module_key}.{}", name.key()), entity.clone());
                    self.functions.entry(name.key()).or_insert(entity);
                }
                NodeKind::Globals { items, .. } => {
                    for &inner in items {
                        self.add_declarations_from(ast, module, inner);
                    }
                }
                _ => self.add_declarations_from_public(ast, module, item),
            }
        }
        tracing::debug!(
            module,
            functions = self.functions.len(),
            declarations = self.declarations.len(),
            "module indexed"
        );
    }

    fn add_declarations_from_public(&mut self, ast: &Ast, module: &str, stmt: NodeId) {
        let access = match ast.kind(stmt) {
            NodeKind::Define { access, .. }
            | NodeKind::Constant { access, .. }
            | NodeKind::TypeDecl { access, .. } => *access,
            _ => return,
        };
        if access == Access::Public {
            self.add_declarations_from(ast, module, stmt);
        }
    }

    fn add_declarations_from(&mut self, ast: &Ast, module: &str, stmt: NodeId) {
        let module_key = module.to_ascii_lowercase();
        let mut add = |name: &fgl_ir::Ident, kind: ExternalKind| {
            let entity = ExternalEntity::new(name.text.clone(), kind).with_origin(module);
            self.declarations
                .insert(format!("{module_key}.{}", name.key()), entity.clone());
            self.declarations.entry(name.key()).or_insert(entity);
        };
        match ast.kind(stmt) {
            NodeKind::Define { vars, .. } => {
                for var in vars {
                    if let NodeKind::VarDef { names, .. } = ast.kind(*var) {
                        for name in names {
                            add(name, ExternalKind::Variable);
                        }
                    }
                }
            }
            NodeKind::Constant { defs, .. } => {
                for def in defs {
                    if let NodeKind::ConstDef { name, .. } = ast.kind(*def) {
                        add(name, ExternalKind::Constant);
                    }
                }
            }
            NodeKind::TypeDecl { defs, .. } => {
                for def in defs {
                    if let NodeKind::TypeDef { name, .. } = ast.kind(*def) {
                        add(name, ExternalKind::Type);
                    }
                }
            }
            _ => {}
        }
    }

    /// Every module has been added; misses are final from now on.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    fn miss(&self) -> ProviderResult {
        if self.sealed {
            ProviderResult::NotFound
        } else {
            ProviderResult::SearchLater
        }
    }
}

impl FunctionProvider for ProjectIndex {
    fn find_function(&self, key: &str) -> ProviderResult {
        match self.functions.get(&key.to_ascii_lowercase()) {
            Some(entity) => ProviderResult::Found(entity.clone()),
            None => self.miss(),
        }
    }
}

impl ProgramFileProvider for ProjectIndex {
    fn find_declaration(&self, key: &str) -> ProviderResult {
        match self.declarations.get(&key.to_ascii_lowercase()) {
            Some(entity) => ProviderResult::Found(entity.clone()),
            None => self.miss(),
        }
    }
}

/// Number of values a function returns.
///
/// Typed functions declare it with `RETURNS`; a legacy function without
/// `RETURNS` returns as many values as its first `RETURN` with values.
pub fn function_return_count(ast: &Ast, function: NodeId) -> usize {
    let NodeKind::Function { returns, .. } = ast.kind(function) else {
        return 0;
    };
    if !returns.is_empty() {
        return returns.len();
    }
    ast.post_order(function)
        .into_iter()
        .find_map(|id| match ast.kind(id) {
            NodeKind::Return { values } if !values.is_empty() => Some(values.len()),
            _ => None,
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests;
