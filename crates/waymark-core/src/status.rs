//! Candidate status vocabulary and the remote endpoint's alias table.
//!
//! The remote endpoint speaks `lightship-live | provisional | retired |
//! potential`; internally the live state is just `live`. The mapping is a
//! single special-cased alias, so both directions live here in one place
//! rather than as scattered string comparisons.

use serde::{Deserialize, Serialize};

/// Status of a cached candidate.
///
/// `Potential` marks a not-yet-confirmed point of interest; the other three
/// mirror states from the authoritative source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Live,
    Provisional,
    Retired,
    Potential,
}

impl CandidateStatus {
    /// Internal lowercase token, as stored in the cache and compared against
    /// normalized nomination states.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Provisional => "provisional",
            Self::Retired => "retired",
            Self::Potential => "potential",
        }
    }

    /// Token used by the remote endpoint for this status.
    ///
    /// Inverse of [`CandidateStatus::from_remote_token`].
    #[must_use]
    pub const fn remote_token(self) -> &'static str {
        match self {
            Self::Live => "lightship-live",
            Self::Provisional => "provisional",
            Self::Retired => "retired",
            Self::Potential => "potential",
        }
    }

    /// Parses a remote endpoint status token.
    ///
    /// Returns `None` for anything outside the four recognized values;
    /// snapshot fetch drops such records entirely.
    #[must_use]
    pub fn from_remote_token(token: &str) -> Option<Self> {
        match token {
            "lightship-live" => Some(Self::Live),
            "provisional" => Some(Self::Provisional),
            "retired" => Some(Self::Retired),
            "potential" => Some(Self::Potential),
            _ => None,
        }
    }
}

impl std::fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes a nomination's free-form state string for comparison against
/// stored statuses.
#[must_use]
pub fn normalize_state(state: &str) -> String {
    state.to_lowercase()
}

/// Maps a normalized internal state to the remote endpoint's vocabulary for
/// upload. Only `live` is aliased; every other state passes through as-is,
/// including states outside the recognized four (the endpoint keeps them,
/// the snapshot filter drops them on the way back).
#[must_use]
pub fn remote_upload_status(normalized: &str) -> String {
    if normalized == "live" {
        "lightship-live".to_string()
    } else {
        normalized.to_string()
    }
}
