//! Options for `fglc check` and the commands that share its flags.

use std::path::PathBuf;

use fgl_diagnostic::DiagnosticConfig;
use fgl_ir::LanguageVersion;
use fgl_resolve::SearchMode;

use crate::CliError;

/// Environment variable naming the default language version.
pub const VERSION_ENV: &str = "FGL_VERSION";

/// What to check and how.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckOptions {
    pub version: LanguageVersion,
    /// Errors reported per module before giving up (0 = unlimited).
    pub error_limit: usize,
    pub search_mode: SearchMode,
    pub paths: Vec<PathBuf>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            version: LanguageVersion::LATEST,
            error_limit: DiagnosticConfig::default().error_limit,
            search_mode: SearchMode::Full,
            paths: Vec::new(),
        }
    }
}

impl CheckOptions {
    /// Build options from command arguments (after the command name).
    ///
    /// `env_version` is the value of [`VERSION_ENV`], if set; a
    /// `--version=` flag overrides it. At least one path is required.
    pub fn from_args(args: &[String], env_version: Option<&str>) -> Result<Self, CliError> {
        let mut options = CheckOptions::default();
        if let Some(text) = env_version.filter(|t| !t.trim().is_empty()) {
            options.version = parse_version(text)?;
        }

        for arg in args {
            if let Some(text) = arg.strip_prefix("--version=") {
                options.version = parse_version(text)?;
            } else if let Some(text) = arg.strip_prefix("--error-limit=") {
                options.error_limit = text
                    .parse()
                    .map_err(|_| CliError::InvalidErrorLimit(text.to_string()))?;
            } else if arg == "--quick" || arg == "-q" {
                options.search_mode = SearchMode::Quick;
            } else if arg.starts_with('-') {
                return Err(CliError::UnknownOption(arg.clone()));
            } else {
                options.paths.push(PathBuf::from(arg));
            }
        }

        if options.paths.is_empty() {
            return Err(CliError::NoInput);
        }
        Ok(options)
    }

    pub fn diagnostic_config(&self) -> DiagnosticConfig {
        DiagnosticConfig {
            error_limit: self.error_limit,
            ..DiagnosticConfig::default()
        }
    }
}

fn parse_version(text: &str) -> Result<LanguageVersion, CliError> {
    LanguageVersion::parse(text.trim()).ok_or_else(|| CliError::UnknownVersion(text.to_string()))
}

#[cfg(test)]
mod tests;
