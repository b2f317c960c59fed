//! CLI argument definitions using clap
//!
//! Commands:
//! - ledgerview serve --config <path>
//! - ledgerview query --config <path> [filters]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ledgerview - paginated queries over append-only transaction logs
#[derive(Parser, Debug)]
#[command(name = "ledgerview")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./ledgerview.json")]
        config: PathBuf,
    },

    /// Execute a single query and print the page as JSON
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./ledgerview.json")]
        config: PathBuf,

        /// Only return transactions for this account
        #[arg(long)]
        account_id: Option<String>,

        /// Inclusive lower timestamp bound, e.g. 2023-01-01T00:00:00
        #[arg(long)]
        from_date: Option<String>,

        /// Inclusive upper timestamp bound
        #[arg(long)]
        to_date: Option<String>,

        /// Resume token from a previous page
        #[arg(long)]
        page_token: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
