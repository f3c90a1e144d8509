//! Dagscope CLI binary.

use anyhow::Result;
use dagscope::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the dagscope CLI.
///
/// Uses tokio's current_thread runtime: the view engine is single-threaded
/// and every store operation is awaited in sequence.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=dagscope=debug,dagscope_core=trace cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dagscope=info,dagscope_core=info")),
        )
        .with_target(false)
        .init();

    tracing::debug!("Starting dagscope CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Dagscope CLI completed successfully");
    Ok(())
}
