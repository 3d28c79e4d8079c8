//! Symbol and type resolution for FGL modules.
//!
//! Resolution runs over a parsed [`fgl_ir::Ast`] and binds each reference to
//! what it names: a declaration in the module, a built-in symbol, or an
//! entity from another module or the database schema supplied by an
//! external provider. It is safe to run more than once on the same module;
//! each run replaces the results of the previous one.
//!
//! # Modules
//!
//! - [`builtins`]: version-gated catalogs of system functions, classes,
//!   constants, macros, program registers and collection methods
//! - [`entity`]: what a reference resolves to
//! - [`scope`]: module and routine scopes
//! - [`typeref`]: member lookup on type nodes
//! - [`provider`]: external provider traits and the project index
//! - [`deferred`]: lookups postponed until more modules are loaded
//! - [`check`]: the resolution pass itself

pub mod analysis;
pub mod builtins;
pub mod check;
pub mod deferred;
pub mod entity;
pub mod provider;
pub mod scope;
pub mod typeref;

pub use analysis::{AnalysisEnv, ModuleAnalysis, ResolveError, SearchMode};
pub use check::{check_for_errors, report_unresolved, retry_deferred};
pub use deferred::DeferredSearches;
pub use entity::{Builtin, ExternalEntity, ExternalKind, Resolution};
pub use provider::{
    DatabaseProvider, FunctionProvider, ProgramFileProvider, ProjectIndex, ProviderResult,
};

#[cfg(test)]
mod tests;
