use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stylist::assembly::request::{handle_assemble, load_request};
use stylist::config::Config;
use stylist::EngineError;

fn main() -> Result<ExitCode> {
    // Load configuration first (fails on unparsable env vars)
    let config = Config::from_env()?;

    // Initialize structured logging; stdout is reserved for the JSON result
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting stylist v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Assembly config: count={} attempts_cap={} policy={:?}",
        config.default_count, config.attempts_cap, config.formality_policy
    );

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: stylist <request.json>")?;

    let outcome = load_request(&path).and_then(|request| handle_assemble(&config, request));

    match outcome {
        Ok(response) => {
            if response.catalog.malformed > 0 {
                warn!(
                    "{} catalog items skipped for missing category or formality tags",
                    response.catalog.malformed
                );
            }
            info!(
                "Returning {} outfits (seed {})",
                response.outfits.len(),
                response.seed
            );
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!("Assembly failed: {err}");
            println!("{}", serde_json::to_string_pretty(&err.to_body())?);
            Ok(exit_code_for(&err))
        }
    }
}

fn exit_code_for(err: &EngineError) -> ExitCode {
    match err {
        EngineError::InsufficientCatalog { .. } => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}
