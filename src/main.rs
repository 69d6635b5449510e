/// Railbook - Main entry point
///
/// A command-line front end for booking train tickets against a local SQLite store
use anyhow::Context;
use railbook::{cli, BookingClient, Config, SessionConfig};

fn main() -> anyhow::Result<()> {
    let config = Config::from_args();

    // Initialize logger with appropriate level based on verbose flag
    let log_level = if config.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let db_path = config.database_path()?;

    let client = BookingClient::new_with_storage_path(&db_path, SessionConfig::default())
        .with_context(|| format!("Failed to open store at {}", db_path.display()))?;

    let output = cli::execute(&client, config.command)?;
    println!("{}", output);

    Ok(())
}
