//! Arbor CLI
//!
//! Inspect serialized expression trees and stable hashes.

use std::sync::Once;

mod commands;

static TRACING_INIT: Once = Once::new();

/// Install the subscriber once.
///
/// `RUST_LOG` selects the filter (e.g. `RUST_LOG=arbor_json=debug`);
/// `ARBOR_LOG_TREE` switches to indented hierarchical output.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var_os("ARBOR_LOG_TREE").is_some() {
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let ok = match args[1].as_str() {
        "tokens" => {
            if args.len() < 3 {
                eprintln!("Usage: arbor tokens <file.json>");
                std::process::exit(1);
            }
            commands::tokens_file(&args[2])
        }
        "fmt" => {
            if args.len() < 3 {
                eprintln!("Usage: arbor fmt <file.json>");
                std::process::exit(1);
            }
            commands::format_file(&args[2])
        }
        "strhash" => {
            if args.len() < 3 {
                eprintln!("Usage: arbor strhash <text> [--seed <u64>]");
                std::process::exit(1);
            }
            commands::string_hash(&args[2..])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            true
        }
        "version" | "--version" | "-V" => {
            println!("arbor {}", env!("CARGO_PKG_VERSION"));
            true
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            false
        }
    };

    if !ok {
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Arbor - expression tree tooling");
    println!();
    println!("Usage: arbor <command> [args]");
    println!();
    println!("Commands:");
    println!("  tokens <file>                Print the structural event stream of a JSON document");
    println!("  fmt <file>                   Re-emit a document through the tree reader and writer");
    println!("  strhash <text> [--seed <n>]  Print the stable string hash of <text>");
    println!("  help                         Show this message");
    println!("  version                      Show version information");
    println!();
    println!("Environment:");
    println!("  RUST_LOG        tracing filter, e.g. arbor_json=debug");
    println!("  ARBOR_LOG_TREE  hierarchical trace output");
}
