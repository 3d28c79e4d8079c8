//! Debug commands: `fglc parse` and `fglc lex`.

use fgl_ir::{LanguageVersion, NodeKind};
use fgl_parse::{parse_source, ParseOptions};

use super::read_file;
use crate::CliError;

/// Parse a file and display a summary of its tree.
pub fn parse_file(path: &str, version: LanguageVersion) -> Result<(), CliError> {
    let content = read_file(path)?;
    let result = parse_source(&content, ParseOptions::new(version));
    let ast = &result.ast;

    println!("Parse result for '{path}' (version {version}):");
    println!("  Nodes: {}", ast.len());
    println!("  Errors: {}", result.errors.len());

    let items = ast.root().map_or(&[][..], |root| ast.children(root));
    if !items.is_empty() {
        println!();
        println!("Items:");
        for &item in items {
            match ast.kind(item) {
                NodeKind::Function {
                    name: Some(name), ..
                } => println!("  {} {name} @ {}", ast.kind(item).name(), ast.span(item)),
                kind => println!("  {} @ {}", kind.name(), ast.span(item)),
            }
        }
    }

    if !result.errors.is_empty() {
        println!();
        println!("Errors:");
        for error in &result.errors {
            println!("  {}: {}", error.span, error.to_diagnostic());
        }
    }
    Ok(())
}

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) -> Result<(), CliError> {
    let content = read_file(path)?;
    let tokens = fgl_lexer::lex(&content);

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in tokens.iter() {
        println!("  {:?} {:?} @ {}", token.kind, &*token.image, token.span);
    }
    if !tokens.comments().is_empty() {
        println!("Comments: {}", tokens.comments().len());
    }
    for error in tokens.errors() {
        println!("  error {:?} @ {}", error.kind, error.span);
    }
    Ok(())
}
