//! CLI command implementations

use std::path::Path;

use serde_json::json;
use tracing::info;

use crate::http_server::HttpServer;
use crate::observability;
use crate::seed::SeedLoader;
use crate::store::{schema, Database};

use super::args::Command;
use super::config::Config;
use super::errors::{store_error, CliError, CliErrorCode, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Installs logging, parses arguments and dispatches to the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    observability::init_logging();
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(config.as_deref()),
        Command::Serve { config, port } => serve(config.as_deref(), port),
    }
}

/// Create the tables and load the seed documents
///
/// Runs once, before the server. Not safe to repeat: see [`crate::seed`].
pub fn init(config_path: Option<&Path>) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    let db = Database::new(&config.database_path);

    let mut conn = db.connect().map_err(store_error(CliErrorCode::SeedFailed))?;
    let report = SeedLoader::new(&config.customers_seed, &config.items_seed)
        .run(&mut conn)
        .map_err(store_error(CliErrorCode::SeedFailed))?;

    write_response(json!({
        "initialized": true,
        "database": config.database_path.display().to_string(),
        "seed": serde_json::to_value(&report)?,
    }))
}

/// Start the HTTP server
///
/// Ensures the tables exist (no seeding), then serves until killed.
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load_or_default(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let db = Database::new(&config.database_path);
    {
        let conn = db.connect().map_err(store_error(CliErrorCode::BootFailed))?;
        schema::ensure_schema(&conn).map_err(store_error(CliErrorCode::BootFailed))?;
    }
    info!(database = %db.path().display(), "database ready");

    let server = HttpServer::new(config.http.clone(), db);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}
