mod cache;
mod markers;
mod sync;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "waymark")]
#[command(about = "Reconcile nominated points of interest against a remote candidate sheet")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a full synchronization pass: fetch, diff, resolve, upload
    Sync(sync::SyncArgs),
    /// Dry run: refresh the cache and list what a sync would upload
    Preview(sync::PreviewArgs),
    /// Refresh the local candidate cache from the endpoint
    Fetch(cache::FetchArgs),
    /// List visible potential markers for a viewport
    Markers(markers::MarkersArgs),
    /// Write the candidate cache as a JSON document
    Export(cache::ExportArgs),
    /// Replace the candidate cache from an exported JSON document
    Import(cache::ImportArgs),
    /// Delete the local candidate cache
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = waymark_core::load_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => sync::run_sync(&config, args).await,
        Commands::Preview(args) => sync::run_preview(&config, args).await,
        Commands::Fetch(args) => cache::run_fetch(&config, args).await,
        Commands::Markers(args) => markers::run_markers(&config, args).await,
        Commands::Export(args) => cache::run_export(&config, &args),
        Commands::Import(args) => cache::run_import(&config, &args),
        Commands::Clear => cache::run_clear(&config),
    }
}
