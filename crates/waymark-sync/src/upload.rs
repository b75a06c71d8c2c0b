//! Batched upload controller.
//!
//! Uploads run in fixed-size batches: every upload in a batch is issued
//! concurrently and the whole batch is awaited before the next one starts,
//! which bounds outstanding requests at [`BATCH_SIZE`]. A failed item is
//! logged and skipped; it never aborts its batch or the pass.

use futures::future::join_all;

use waymark_client::RemoteClient;
use waymark_core::{ConfirmedPairing, Nomination};
use waymark_store::CandidateMap;

use crate::session::StatusSink;

/// Uploads per batch; also the concurrency bound.
pub const BATCH_SIZE: usize = 5;

/// Final tally of one upload pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Uploads that settled successfully.
    pub uploaded: usize,
    /// Everything that was tried, including failures.
    pub attempted: usize,
}

/// Uploads `to_upload` in order, five at a time, applying confirmed
/// supersessions after each successful upload.
///
/// For every success whose id appears in `confirmed`, the paired potential
/// is removed from `store_map` and a deletion marker is sent to the
/// endpoint. Deletions are fire-and-forget: failures are logged, never
/// retried, and never affect the tally. The caller persists `store_map`
/// after the pass.
pub async fn upload_in_batches(
    client: &RemoteClient,
    to_upload: &[Nomination],
    confirmed: &[ConfirmedPairing],
    store_map: &mut CandidateMap,
    nickname: &str,
    sink: &dyn StatusSink,
) -> UploadOutcome {
    let total = to_upload.len();
    let mut uploaded = 0usize;

    for (batch_index, batch) in to_upload.chunks(BATCH_SIZE).enumerate() {
        let base = batch_index * BATCH_SIZE;

        let results = join_all(batch.iter().enumerate().map(|(offset, n)| async move {
            sink.status(&format!("Uploading {}/{total}: {}", base + offset + 1, n.title));
            match client.upload_nomination(n, nickname).await {
                Ok(()) => Some(n.id.as_str()),
                Err(e) => {
                    tracing::error!(id = %n.id, title = %n.title, error = %e, "upload failed");
                    None
                }
            }
        }))
        .await;

        for id in results.into_iter().flatten() {
            uploaded += 1;
            for pairing in confirmed.iter().filter(|p| p.new_nomination_id == id) {
                store_map.remove(&pairing.potential_id);
                if let Err(e) = client.request_deletion(&pairing.potential_id).await {
                    tracing::warn!(
                        potential_id = %pairing.potential_id,
                        error = %e,
                        "deletion request failed; not retrying"
                    );
                }
            }
        }
    }

    UploadOutcome {
        uploaded,
        attempted: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_nominations_form_three_batches() {
        let sizes: Vec<usize> = (0..12)
            .collect::<Vec<u32>>()
            .chunks(BATCH_SIZE)
            .map(<[u32]>::len)
            .collect();
        assert_eq!(sizes, [5, 5, 2]);
    }
}
