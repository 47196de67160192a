//! CLI module for storedesk
//!
//! Provides command-line interface for:
//! - init: Create the tables and load the seed documents
//! - serve: Run the HTTP server

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
