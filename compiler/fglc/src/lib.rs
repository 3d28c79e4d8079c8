//! FGL project checker.
//!
//! # Pipeline
//!
//! ```text
//! source files ──(rayon)──► parse_source() ──► Ast + ParseError
//!     │
//!     ▼
//! check_for_errors()  per module, cross-module lookups deferred
//!     │
//!     ▼
//! ProjectIndex over every module ──► retry_deferred() ──► report_unresolved()
//!     │
//!     ▼
//! DiagnosticQueue per module ──► rendered diagnostics
//! ```
//!
//! Modules are independent until the project index is built, so the parse
//! and first resolution pass run one module per task.

pub mod commands;
pub mod config;
pub mod driver;
mod error;

use std::sync::Once;

pub use config::CheckOptions;
pub use driver::{check_modules, ModuleReport, SourceModule};
pub use error::CliError;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// The filter comes from `FGL_LOG`, or `RUST_LOG` when that is unset. With
/// neither set nothing is installed. Later calls are no-ops.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let directives = std::env::var("FGL_LOG").or_else(|_| std::env::var("RUST_LOG"));
        if let Ok(directives) = directives {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::new(directives))
                .init();
        }
    });
}
