//! Synchronization pass orchestration.
//!
//! [`run_sync_pass`] ties the pieces together: nomination check → snapshot
//! fetch → store replace → classify/match → conflict resolution → batched
//! upload → persist. It returns a [`SyncSession`] value object holding
//! everything the operator surface needs for preview, instead of stashing
//! state in ambient globals.

use std::collections::HashMap;

use thiserror::Error;

use waymark_client::{ClientError, RemoteClient};
use waymark_core::{Classification, ConfirmedPairing, MatchedPotential};
use waymark_store::{CandidateStore, StoreError};

use crate::diff::classify;
use crate::resolve::MatchResolver;
use crate::source::{NominationSource, SourceError};
use crate::upload::upload_in_batches;

#[derive(Debug, Error)]
pub enum SyncError {
    /// No endpoint URL is configured; nothing was attempted.
    #[error("no endpoint configured — set WAYMARK_ENDPOINT_URL or pass --endpoint")]
    NoEndpoint,

    /// The host view produced zero nominations; nothing was attempted.
    #[error("no nominations found to upload")]
    NoNominations,

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Receives operator-facing progress strings. Success and failure share this
/// one channel; there is no separate error-severity surface.
pub trait StatusSink: Sync {
    fn status(&self, msg: &str);
}

/// Default sink routing status lines through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn status(&self, msg: &str) {
        tracing::info!("{msg}");
    }
}

/// Tunables for one pass.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Proximity-matching threshold in meters.
    pub radius_m: f64,
    /// Submitter identity attached to every upload.
    pub nickname: String,
}

/// Everything one pass produced, for preview and reporting.
#[derive(Debug, Clone, Default)]
pub struct SyncSession {
    pub classifications: Vec<Classification>,
    pub matches: HashMap<String, Vec<MatchedPotential>>,
    pub confirmed: Vec<ConfirmedPairing>,
    pub uploaded: usize,
    pub attempted: usize,
}

impl SyncSession {
    /// Numbered preview listing, one line per pending upload:
    /// `"<i>. <title> (<reason>[, replaces potential: <id>])"`.
    #[must_use]
    pub fn preview_lines(&self) -> Vec<String> {
        self.classifications
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let replaced = self
                    .confirmed
                    .iter()
                    .find(|p| p.new_nomination_id == c.id)
                    .map(|p| format!(", replaces potential: {}", p.potential_id))
                    .unwrap_or_default();
                format!("{}. {} ({}{replaced})", i + 1, c.title, c.reason)
            })
            .collect()
    }
}

/// Runs one full synchronization pass.
///
/// Aborts before any network call when the source yields no nominations.
/// The snapshot fetch is all-or-nothing: on failure the pass stops and the
/// persisted store is left untouched. Conflict resolution runs at most once,
/// and only when the match mapping is non-empty.
///
/// # Errors
///
/// - [`SyncError::NoNominations`] when there is nothing to sync.
/// - [`SyncError::Source`] when the nomination source cannot be read.
/// - [`SyncError::Client`] when the snapshot fetch fails.
/// - [`SyncError::Store`] when the cache cannot be persisted.
pub async fn run_sync_pass<S, R>(
    client: &RemoteClient,
    store: &CandidateStore,
    source: &S,
    resolver: &R,
    sink: &dyn StatusSink,
    options: &SyncOptions,
) -> Result<SyncSession, SyncError>
where
    S: NominationSource,
    R: MatchResolver,
{
    let nominations = source.current_nominations()?;
    if nominations.is_empty() {
        return Err(SyncError::NoNominations);
    }

    sink.status("Downloading latest candidates from endpoint...");
    let mut map = client.fetch_snapshot().await?;
    store.save(&map)?;
    sink.status(&format!("Downloaded {} candidates.", map.len()));

    let plan = classify(&map, &nominations, options.radius_m);

    let confirmed = if plan.matches.is_empty() {
        Vec::new()
    } else {
        resolver.resolve(&plan.matches, &nominations).await
    };

    let outcome = upload_in_batches(
        client,
        &plan.to_upload,
        &confirmed,
        &mut map,
        &options.nickname,
        sink,
    )
    .await;
    store.save(&map)?;

    sink.status(&format!("Upload complete. {} uploaded.", outcome.uploaded));

    Ok(SyncSession {
        classifications: plan.classifications,
        matches: plan.matches,
        confirmed,
        uploaded: outcome.uploaded,
        attempted: outcome.attempted,
    })
}

/// Runs the read-only half of a pass: fetch, replace the cache, classify.
/// Nothing is uploaded and no conflict resolution happens; the returned
/// session previews what [`run_sync_pass`] would upload.
///
/// # Errors
///
/// Same as [`run_sync_pass`], minus upload-related failures.
pub async fn run_preview_pass<S>(
    client: &RemoteClient,
    store: &CandidateStore,
    source: &S,
    sink: &dyn StatusSink,
    options: &SyncOptions,
) -> Result<SyncSession, SyncError>
where
    S: NominationSource,
{
    let nominations = source.current_nominations()?;
    if nominations.is_empty() {
        return Err(SyncError::NoNominations);
    }

    sink.status("Downloading latest candidates from endpoint...");
    let map = client.fetch_snapshot().await?;
    store.save(&map)?;

    let plan = classify(&map, &nominations, options.radius_m);
    Ok(SyncSession {
        classifications: plan.classifications,
        matches: plan.matches,
        confirmed: Vec::new(),
        uploaded: 0,
        attempted: 0,
    })
}

#[cfg(test)]
mod tests {
    use waymark_core::Reason;

    use super::*;

    #[test]
    fn preview_lines_number_and_annotate() {
        let session = SyncSession {
            classifications: vec![
                Classification {
                    id: "N1".into(),
                    title: "Fountain".into(),
                    reason: Reason::New,
                },
                Classification {
                    id: "N2".into(),
                    title: "Mural".into(),
                    reason: Reason::StatusChanged {
                        old: "potential".into(),
                        new: "live".into(),
                    },
                },
            ],
            confirmed: vec![ConfirmedPairing {
                new_nomination_id: "N1".into(),
                potential_id: "P9".into(),
            }],
            ..SyncSession::default()
        };

        let lines = session.preview_lines();
        assert_eq!(lines[0], "1. Fountain (new, replaces potential: P9)");
        assert_eq!(lines[1], "2. Mural (status changed: potential \u{2192} live)");
    }
}
