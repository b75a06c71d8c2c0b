//! Cache management subcommands: `fetch`, `export`, `import`, `clear`.

use std::path::PathBuf;

use clap::Args;

use waymark_client::RemoteClient;
use waymark_core::Config;
use waymark_store::CandidateStore;
use waymark_sync::SyncError;

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Override the configured endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Write the document here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Exported cache document to import
    pub file: PathBuf,
}

pub async fn run_fetch(config: &Config, args: FetchArgs) -> anyhow::Result<()> {
    let Some(url) = args.endpoint.or_else(|| config.endpoint_url.clone()) else {
        println!("{}", SyncError::NoEndpoint);
        return Ok(());
    };
    let client = RemoteClient::new(&url, config.http_timeout_secs)?;
    let store = CandidateStore::new(&config.cache_path);

    println!("Downloading latest candidates from endpoint...");
    let map = client.fetch_snapshot().await?;
    store.save(&map)?;
    println!("Downloaded {} candidates.", map.len());
    Ok(())
}

pub fn run_export(config: &Config, args: &ExportArgs) -> anyhow::Result<()> {
    let store = CandidateStore::new(&config.cache_path);
    let document = store.export_json()?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, &document)?;
            println!("Exported cache to {}.", path.display());
        }
        None => println!("{document}"),
    }
    Ok(())
}

pub fn run_import(config: &Config, args: &ImportArgs) -> anyhow::Result<()> {
    let store = CandidateStore::new(&config.cache_path);
    let document = std::fs::read_to_string(&args.file)?;
    let map = store.import_json(&document)?;
    println!("Imported {} candidates.", map.len());
    Ok(())
}

pub fn run_clear(config: &Config) -> anyhow::Result<()> {
    let store = CandidateStore::new(&config.cache_path);
    store.clear()?;
    println!("Cache cleared.");
    Ok(())
}
