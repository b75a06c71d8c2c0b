//! `sync` and `preview` subcommands.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use waymark_client::RemoteClient;
use waymark_core::Config;
use waymark_store::CandidateStore;
use waymark_sync::{
    run_preview_pass, run_sync_pass, AutoPolicy, AutoResolver, JsonFileSource, StatusSink,
    StdinResolver, SyncError, SyncOptions, SyncSession,
};

/// Sink printing operator status lines to stdout.
struct PrintSink;

impl StatusSink for PrintSink {
    fn status(&self, msg: &str) {
        println!("{msg}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AutoConfirm {
    /// Confirm the nearest-presented potential for every match
    First,
    /// Confirm nothing; upload matched nominations without supersession
    None,
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// JSON file holding the host application's current nomination list
    #[arg(long)]
    pub nominations: PathBuf,

    /// Override the configured endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Override the configured matching radius in meters
    #[arg(long)]
    pub radius: Option<f64>,

    /// Resolve matches without prompting instead of asking on stdin
    #[arg(long, value_enum)]
    pub auto_confirm: Option<AutoConfirm>,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// JSON file holding the host application's current nomination list
    #[arg(long)]
    pub nominations: PathBuf,

    /// Override the configured endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Override the configured matching radius in meters
    #[arg(long)]
    pub radius: Option<f64>,
}

fn build_client(config: &Config, endpoint: Option<&str>) -> anyhow::Result<Option<RemoteClient>> {
    let Some(url) = endpoint.map(str::to_owned).or_else(|| config.endpoint_url.clone()) else {
        return Ok(None);
    };
    Ok(Some(RemoteClient::new(&url, config.http_timeout_secs)?))
}

fn options(config: &Config, radius: Option<f64>) -> SyncOptions {
    SyncOptions {
        radius_m: radius.unwrap_or(config.match_radius_m),
        nickname: config.nickname.clone(),
    }
}

pub async fn run_sync(config: &Config, args: SyncArgs) -> anyhow::Result<()> {
    let sink = PrintSink;
    let Some(client) = build_client(config, args.endpoint.as_deref())? else {
        sink.status(&SyncError::NoEndpoint.to_string());
        return Ok(());
    };
    let store = CandidateStore::new(&config.cache_path);
    let source = JsonFileSource::new(&args.nominations);
    let opts = options(config, args.radius);

    // The resolver choice changes the concrete type, so each arm drives the
    // pass itself.
    let result = match args.auto_confirm {
        None => run_sync_pass(&client, &store, &source, &StdinResolver, &sink, &opts).await,
        Some(AutoConfirm::First) => {
            let resolver = AutoResolver {
                policy: AutoPolicy::First,
            };
            run_sync_pass(&client, &store, &source, &resolver, &sink, &opts).await
        }
        Some(AutoConfirm::None) => {
            let resolver = AutoResolver {
                policy: AutoPolicy::None,
            };
            run_sync_pass(&client, &store, &source, &resolver, &sink, &opts).await
        }
    };

    match result {
        Ok(session) => {
            print_session(&session);
            Ok(())
        }
        Err(SyncError::NoNominations) => {
            sink.status("No nominations found to upload.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn run_preview(config: &Config, args: PreviewArgs) -> anyhow::Result<()> {
    let sink = PrintSink;
    let Some(client) = build_client(config, args.endpoint.as_deref())? else {
        sink.status(&SyncError::NoEndpoint.to_string());
        return Ok(());
    };
    let store = CandidateStore::new(&config.cache_path);
    let source = JsonFileSource::new(&args.nominations);
    let opts = options(config, args.radius);

    match run_preview_pass(&client, &store, &source, &sink, &opts).await {
        Ok(session) => {
            if session.classifications.is_empty() {
                sink.status("No nominations pending upload.");
            } else {
                sink.status("Nominations to be uploaded:");
                for line in session.preview_lines() {
                    println!("{line}");
                }
                for (id, pots) in &session.matches {
                    println!(
                        "note: {id} has {} nearby potential candidate(s) pending confirmation",
                        pots.len()
                    );
                }
            }
            Ok(())
        }
        Err(SyncError::NoNominations) => {
            sink.status("No nominations found to upload.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_session(session: &SyncSession) {
    if session.attempted == 0 {
        println!("Everything already in sync; nothing uploaded.");
        return;
    }
    println!("Uploaded {}/{} nomination(s):", session.uploaded, session.attempted);
    for line in session.preview_lines() {
        println!("{line}");
    }
}
