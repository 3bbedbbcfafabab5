//! Palaver CLI entrypoint for GitHub discussion tools.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use palaver::{DiscussionError, PalaverConfig};
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode, DiscussionError> {
    let config = load_config()?;
    let outcome = cli::invoke::run(&config).await?;
    cli::output::write_outcome(&outcome)?;

    Ok(if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`DiscussionError::Configuration`] when ortho-config fails to
/// parse arguments or load configuration files.
fn load_config() -> Result<PalaverConfig, DiscussionError> {
    PalaverConfig::load().map_err(|error| DiscussionError::Configuration {
        message: error.to_string(),
    })
}
