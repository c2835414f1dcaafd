use anyhow::{Context, Result};
use clap::Parser;
use psort_cli::{Cli, Invocation};
use psort_core::SortConfig;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Help and usage errors exit here, before logging starts.
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli.invocation()).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(invocation: Invocation) -> Result<ExitCode> {
    match invocation {
        Invocation::SingleFile { config, file } => {
            let config = SortConfig::load_or_default(&config);
            psort_core::process_single(&file, &config)
                .with_context(|| format!("Error processing file {}", file.display()))?;
            tracing::info!("Successfully sorted imports in {}", file.display());
            Ok(ExitCode::SUCCESS)
        }

        Invocation::Directory { config } => {
            let config = SortConfig::load(&config).context("Error loading config")?;
            let report = psort_core::run_directory(Path::new("."), Arc::new(config))
                .await
                .context("Error walking directory")?;

            // Per-file failures were already reported; they don't fail the run.
            tracing::info!(
                "Done: {} file(s) sorted, {} failed",
                report.succeeded(),
                report.failed()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}
