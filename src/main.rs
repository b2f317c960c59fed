//! ledgerview CLI entry point
//!
//! A minimal entrypoint that parses CLI arguments, dispatches to the
//! selected command, prints errors to stderr, and exits non-zero on
//! failure. All logic is delegated to the CLI module.

use ledgerview::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
