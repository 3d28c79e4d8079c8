//! Driver failures: reading input and interpreting arguments.

use std::io;

/// Failure of a `fglc` command before any diagnostics are produced.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot find file '{path}'")]
    NotFound { path: String },

    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },

    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },

    #[error("error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("unknown language version `{0}` (expected one of 2.30, 2.40, 2.50, 3.00, 3.10, 3.20, 4.00, 4.01)")]
    UnknownVersion(String),

    #[error("invalid error limit `{0}`: expected a non-negative number")]
    InvalidErrorLimit(String),

    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("no input files")]
    NoInput,

    #[error("unknown error code `{0}`: codes have the format EXXXX, e.g. E2001")]
    UnknownErrorCode(String),
}

impl CliError {
    /// Classify an I/O failure on `path`.
    #[cold]
    pub fn from_io(path: &str, error: io::Error) -> Self {
        let path = path.to_string();
        match error.kind() {
            io::ErrorKind::NotFound => CliError::NotFound { path },
            io::ErrorKind::PermissionDenied => CliError::PermissionDenied { path },
            io::ErrorKind::InvalidData => CliError::InvalidUtf8 { path },
            _ => CliError::Io {
                path,
                source: error,
            },
        }
    }
}
