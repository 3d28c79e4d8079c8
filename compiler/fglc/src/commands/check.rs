//! `fglc check`: parse and resolve a set of modules together.

use rayon::prelude::*;

use super::read_file;
use crate::driver::{check_modules, SourceModule};
use crate::{CheckOptions, CliError};

/// Read every path of `options`, in parallel.
pub fn read_modules(options: &CheckOptions) -> Result<Vec<SourceModule>, CliError> {
    options
        .paths
        .par_iter()
        .map(|path| {
            let path = path.to_string_lossy().into_owned();
            let source = read_file(&path)?;
            Ok(SourceModule::new(path, source))
        })
        .collect()
}

/// Check the modules named by `options` and print their diagnostics.
///
/// Returns the number of errors reported.
pub fn check_files(options: &CheckOptions) -> Result<usize, CliError> {
    let modules = read_modules(options)?;
    let reports = check_modules(&modules, options);

    let mut errors = 0;
    for report in &reports {
        print!("{}", report.render());
        errors += report.error_count();
    }
    tracing::info!(modules = reports.len(), errors, "check finished");
    if errors > 0 {
        let plural = if errors == 1 { "" } else { "s" };
        eprintln!("error: {errors} error{plural} found in {} module(s)", reports.len());
    }
    Ok(errors)
}
