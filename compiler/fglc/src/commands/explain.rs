//! `fglc explain`: describe an error code.

use fgl_diagnostic::ErrorCode;

use crate::CliError;

pub fn explain_error(code_str: &str) -> Result<(), CliError> {
    let code =
        ErrorCode::parse(code_str).ok_or_else(|| CliError::UnknownErrorCode(code_str.to_string()))?;
    println!("{code}: {}", code.description());
    Ok(())
}
