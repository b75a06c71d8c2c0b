//! Wire types for the remote record-keeping endpoint.
//!
//! ## Observed snapshot shape
//!
//! `GET <endpoint>` returns a bare JSON array of records:
//!
//! ```json
//! [{"id": "abc", "title": "Fountain", "description": "",
//!   "lat": 10.0, "lng": 20.0, "status": "lightship-live"}]
//! ```
//!
//! - `lat`/`lng` may be numbers or numeric strings depending on how the
//!   backing sheet stored them; both are accepted.
//! - `status` is free-form text; anything outside the four recognized
//!   tokens (`lightship-live`, `provisional`, `retired`, `potential`) is
//!   dropped during conversion rather than erroring the whole snapshot.

use serde::Deserialize;

use waymark_core::types::lenient_f64;
use waymark_core::{Candidate, CandidateStatus};

/// One raw record from the snapshot array, before status filtering.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCandidate {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "lenient_f64")]
    pub lat: f64,
    #[serde(with = "lenient_f64")]
    pub lng: f64,
    #[serde(default)]
    pub status: String,
}

impl RemoteCandidate {
    /// Converts to the internal model, alias-mapping the status token.
    /// Returns `None` for unrecognized statuses.
    #[must_use]
    pub fn into_candidate(self) -> Option<(String, Candidate)> {
        let status = CandidateStatus::from_remote_token(&self.status)?;
        Some((
            self.id,
            Candidate {
                title: self.title,
                description: self.description,
                lat: self.lat,
                lng: self.lng,
                status,
            },
        ))
    }
}
