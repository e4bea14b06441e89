//! # Habitz CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/` and this file only
//! invokes `cli::run()` and handles process termination. Everything below the CLI
//! (API, commands, session, storage) is UI agnostic; see the library docs.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
