//! Domain types shared across the workspace.
//!
//! ## Observed host export shapes
//!
//! Nominations come from the host application's live session state, so field
//! quality varies:
//! - `lat`/`lng` arrive as JSON numbers **or** numeric strings depending on
//!   which host view produced them; [`lenient_f64`] accepts both.
//! - `state` is free-form (`"Live"`, `"In Queue"`, ...); it is compared and
//!   uploaded lowercased, never parsed into [`CandidateStatus`].
//! - `images` may be absent or empty; only the first entry's `url` is ever
//!   used downstream.
//! - `discoveredTimestampMs` is epoch milliseconds when present.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::status::{normalize_state, CandidateStatus};

/// A cached geospatial point of interest, keyed externally by an opaque
/// string id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub status: CandidateStatus,
}

impl Candidate {
    #[must_use]
    pub const fn point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// One attachment on a nomination. Only `url` matters downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominationImage {
    pub url: String,
}

/// A submission currently visible in the host application's session,
/// not necessarily reflected in the remote endpoint yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nomination {
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
    pub state: String,
    #[serde(default)]
    pub images: Vec<NominationImage>,
    #[serde(rename = "discoveredTimestampMs", default)]
    pub discovered_timestamp_ms: Option<i64>,
}

impl Nomination {
    /// Lowercased state, the form compared against stored statuses and sent
    /// (alias-mapped) to the remote endpoint.
    #[must_use]
    pub fn normalized_state(&self) -> String {
        normalize_state(&self.state)
    }

    /// URL of the first attached image, or `""` when there is none.
    #[must_use]
    pub fn first_image_url(&self) -> &str {
        self.images.first().map_or("", |img| img.url.as_str())
    }

    /// Discovery timestamp as a `YYYY-MM-DD` calendar date, or `""` when
    /// absent or out of chrono's representable range.
    #[must_use]
    pub fn submitted_date(&self) -> String {
        self.discovered_timestamp_ms
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Why a nomination needs uploading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Reason {
    New,
    StatusChanged { old: String, new: String },
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => f.write_str("new"),
            Self::StatusChanged { old, new } => write!(f, "status changed: {old} \u{2192} {new}"),
        }
    }
}

/// Classification outcome for one nomination, kept for operator preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub reason: Reason,
}

/// A `potential` candidate found near a new nomination, annotated with its
/// store id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedPotential {
    pub id: String,
    #[serde(flatten)]
    pub candidate: Candidate,
}

/// Operator-confirmed link between a new nomination and the `potential`
/// candidate it supersedes. At most one per nomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedPairing {
    pub new_nomination_id: String,
    pub potential_id: String,
}

/// (De)serializes an `f64` from a JSON number or a numeric string. Shared
/// with the wire types in `waymark-client`, which face the same looseness.
pub mod lenient_f64 {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| D::Error::custom("number out of f64 range")),
            serde_json::Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| D::Error::custom(format!("invalid coordinate '{s}': {e}"))),
            other => Err(D::Error::custom(format!(
                "expected number or numeric string, got {other}"
            ))),
        }
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*value)
    }
}
