//! Diff & match engine.
//!
//! Compares the live nomination list against the cached store and decides
//! what needs uploading, and which new nominations sit close enough to a
//! cached `potential` to be the same place.

use std::collections::HashMap;

use waymark_core::geo::distance_meters;
use waymark_core::{CandidateStatus, Classification, MatchedPotential, Nomination, Reason};
use waymark_store::CandidateMap;

/// Result of classifying one nomination list against the store.
#[derive(Debug, Clone, Default)]
pub struct SyncPlan {
    /// Nominations that need uploading, in input order.
    pub to_upload: Vec<Nomination>,
    /// One preview record per entry in `to_upload`.
    pub classifications: Vec<Classification>,
    /// New-nomination id → nearby `potential` candidates within the radius,
    /// nearest first. A nomination with no nearby potentials has no entry here.
    pub matches: HashMap<String, Vec<MatchedPotential>>,
}

impl SyncPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_upload.is_empty()
    }
}

/// Classifies `nominations` against `store`.
///
/// - No prior entry → [`Reason::New`].
/// - Prior entry with a different stored status than the nomination's
///   normalized state → [`Reason::StatusChanged`].
/// - Otherwise the nomination is unchanged and skipped, which is what makes
///   repeated passes idempotent.
///
/// Proximity matching runs only for genuinely new nominations, scanning
/// every `potential` entry linearly (the store stays in the low thousands).
/// The `radius_m` boundary is inclusive. Matches are ordered nearest first,
/// which makes the first entry the default selection; exact-distance ties
/// are not broken further.
#[must_use]
pub fn classify(store: &CandidateMap, nominations: &[Nomination], radius_m: f64) -> SyncPlan {
    let mut plan = SyncPlan::default();

    for n in nominations {
        let prev = store.get(&n.id);
        let current = n.normalized_state();

        let reason = match prev {
            None => Some(Reason::New),
            Some(prev) if prev.status.as_str() != current => Some(Reason::StatusChanged {
                old: prev.status.as_str().to_string(),
                new: current.clone(),
            }),
            Some(_) => None,
        };

        if let Some(reason) = reason {
            plan.classifications.push(Classification {
                id: n.id.clone(),
                title: n.title.clone(),
                reason,
            });
            plan.to_upload.push(n.clone());
        }

        if prev.is_none() {
            let mut nearby: Vec<(f64, MatchedPotential)> = store
                .iter()
                .filter(|(_, c)| c.status == CandidateStatus::Potential)
                .filter_map(|(id, c)| {
                    let d = distance_meters(c.point(), n.point());
                    (d <= radius_m).then(|| {
                        (
                            d,
                            MatchedPotential {
                                id: id.clone(),
                                candidate: c.clone(),
                            },
                        )
                    })
                })
                .collect();
            nearby.sort_by(|a, b| a.0.total_cmp(&b.0));
            if !nearby.is_empty() {
                plan.matches
                    .insert(n.id.clone(), nearby.into_iter().map(|(_, m)| m).collect());
            }
        }
    }

    plan
}
