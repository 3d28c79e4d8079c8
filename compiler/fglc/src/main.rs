//! FGL checker CLI.

use fglc::commands::{check_files, explain_error, lex_file, parse_file};
use fglc::config::VERSION_ENV;
use fglc::{init_tracing, CheckOptions, CliError};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let env_version = std::env::var(VERSION_ENV).ok();

    let result = match command.as_str() {
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: fglc check <files...> [--version=<v>] [--error-limit=<n>] [--quick]");
                std::process::exit(1);
            }
            CheckOptions::from_args(&args[2..], env_version.as_deref())
                .and_then(|options| check_files(&options))
                .map(|errors| {
                    if errors > 0 {
                        std::process::exit(1);
                    }
                })
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: fglc parse <file> [--version=<v>]");
                std::process::exit(1);
            }
            CheckOptions::from_args(&args[2..], env_version.as_deref()).and_then(|options| {
                options
                    .paths
                    .iter()
                    .try_for_each(|path| parse_file(&path.to_string_lossy(), options.version))
            })
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: fglc lex <file>");
                std::process::exit(1);
            }
            lex_file(&args[2])
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: fglc explain <ERROR_CODE>");
                eprintln!("Example: fglc explain E2001");
                std::process::exit(1);
            }
            explain_error(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "-V" => {
            println!("fglc {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(error) = result {
        report(&error);
        std::process::exit(1);
    }
}

fn report(error: &CliError) {
    eprintln!("error: {error}");
    if let CliError::NoInput | CliError::UnknownOption(_) = error {
        eprintln!("Run `fglc help` for usage.");
    }
}

fn print_usage() {
    println!("FGL checker");
    println!();
    println!("Usage: fglc <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <files...>     Parse and resolve modules together");
    println!("  parse <file>         Parse and display tree info");
    println!("  lex <file>           Tokenize and display tokens");
    println!("  explain <code>       Explain an error code (e.g., E2001)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Check options:");
    println!("  --version=<v>        Language version: 2.30 .. 4.01 (default: 4.01, env: FGL_VERSION)");
    println!("  --error-limit=<n>    Errors shown per module, 0 for no limit (default: 50)");
    println!("  --quick, -q          Local and built-in lookups only");
    println!();
    println!("Logging:");
    println!("  FGL_LOG=<filter>     tracing filter, e.g. FGL_LOG=fgl_resolve=debug");
}
