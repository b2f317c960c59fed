//! CLI command implementations
//!
//! `serve` loads configuration, builds the page merger and runs the
//! HTTP server. `query` runs one page fetch against the configured
//! logs and prints the result as JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::observability;
use crate::pager::{PageMerger, PagerConfig, DEFAULT_PAGE_SIZE};
use crate::rest_api::{self, TransactionParams};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the credit transaction log
    #[serde(default = "default_credits_file")]
    pub credits_file: PathBuf,

    /// Path to the debit transaction log
    #[serde(default = "default_debits_file")]
    pub debits_file: PathBuf,

    /// Maximum transactions returned per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Host to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_credits_file() -> PathBuf {
    PathBuf::from("credits.csv")
}

fn default_debits_file() -> PathBuf {
    PathBuf::from("debits.csv")
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credits_file: default_credits_file(),
            debits_file: default_debits_file(),
            page_size: default_page_size(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            CliError::Config(format!("invalid config {}: {}", path.display(), e))
        })?;
        if config.page_size == 0 {
            return Err(CliError::Config("page_size must be positive".to_string()));
        }
        Ok(config)
    }

    /// Engine configuration for the page merger
    pub fn pager_config(&self) -> PagerConfig {
        PagerConfig {
            credits_file: self.credits_file.clone(),
            debits_file: self.debits_file.clone(),
            page_size: self.page_size,
        }
    }

    /// Socket address string for the HTTP listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses arguments and dispatches to the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Command::Serve { config } => serve(&config),
        Command::Query {
            config,
            account_id,
            from_date,
            to_date,
            page_token,
        } => query(&config, account_id, from_date, to_date, page_token),
    }
}

fn serve(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let credits = config.credits_file.display().to_string();
    let debits = config.debits_file.display().to_string();
    observability::info(
        "CONFIG_LOADED",
        &[
            ("credits_file", credits.as_str()),
            ("debits_file", debits.as_str()),
        ],
    );

    let merger = Arc::new(PageMerger::new(config.pager_config()));
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(rest_api::serve(merger, &config.socket_addr()))?;
    Ok(())
}

fn query(
    config_path: &Path,
    account_id: Option<String>,
    from_date: Option<String>,
    to_date: Option<String>,
    page_token: Option<String>,
) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let merger = PageMerger::new(config.pager_config());

    let params = TransactionParams {
        account_id,
        from_date,
        to_date,
        page_token,
    };
    let (query, token) = params.into_query()?;
    let page = merger.fetch_page(&query, token.as_deref())?;

    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("ledgerview.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    #[test]
    fn test_defaults_applied() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{}");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.credits_file, PathBuf::from("credits.csv"));
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_explicit_values_respected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{"credits_file": "/data/in.csv", "debits_file": "/data/out.csv", "page_size": 5, "port": 9000}"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.credits_file, PathBuf::from("/data/in.csv"));
        assert_eq!(config.socket_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_invalid_json_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "not json");
        assert!(matches!(Config::load(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn test_missing_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(Config::load(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"page_size": 0}"#);
        assert!(matches!(Config::load(&path), Err(CliError::Config(_))));
    }
}
