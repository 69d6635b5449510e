/// Configuration for the booking CLI.
/// Handles command-line argument parsing and session settings.
use crate::cli::Command;
use crate::error::{BookingError, Result};
use chrono::Duration;
use clap::Parser;
use directories::BaseDirs;
use std::path::PathBuf;

const DEFAULT_DIR: &str = ".railbook";
const DEFAULT_DB_FILE: &str = "railbook.db";

#[derive(Parser, Debug)]
#[command(name = "railbook")]
#[command(about = "Train ticket booking against a local store", long_about = None)]
pub struct Config {
    /// SQLite database file path (default: ~/.railbook/railbook.db)
    #[arg(long, global = true, env = "RAILBOOK_DB")]
    pub database: Option<PathBuf>,

    /// Enable verbose logging (DEBUG level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Parse command-line arguments into Config
    pub fn from_args() -> Self {
        Config::parse()
    }

    /// The explicit `--database` path, or the default under the home directory
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }

        let base_dirs = BaseDirs::new()
            .ok_or_else(|| BookingError::Config("Failed to get home directory".to_string()))?;
        Ok(base_dirs.home_dir().join(DEFAULT_DIR).join(DEFAULT_DB_FILE))
    }
}

/// Session lifetimes issued on register and login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub register_ttl: Duration,
    pub login_ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            register_ttl: Duration::minutes(30),
            login_ttl: Duration::hours(24),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_config() {
        let config = SessionConfig::default();
        assert_eq!(config.register_ttl.num_minutes(), 30);
        assert_eq!(config.login_ttl.num_hours(), 24);
    }

    #[test]
    fn test_custom_database() {
        let config = Config::try_parse_from(["railbook", "--database", "/tmp/custom.db", "whoami"]).unwrap();
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/custom.db"));
        assert!(!config.verbose);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let config = Config::try_parse_from(["railbook", "trains", "list", "-v"]).unwrap();
        assert!(config.verbose);
    }
}
