// vsix - editor extension backup and restore
// Main CLI entry point

use clap::Parser;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vsix_backup::cli::{Cli, CliDispatcher};
use vsix_backup::utils::error::UserError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let result = CliDispatcher::execute(cli).await;

    if let Err(err) = result {
        let user_error = UserError::from_vsix_error(&err);
        user_error.print();
        process::exit(user_error.exit_code);
    }
}
