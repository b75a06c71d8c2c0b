//! Conflict resolution: turning ambiguous proximity matches into
//! operator-confirmed pairings.
//!
//! The protocol runs at most once per synchronization pass and suspends the
//! upload controller until it returns. A resolver that confirms nothing is a
//! valid outcome — the affected nominations are still uploaded as new
//! records, just without superseding any cached `potential`.

use std::collections::HashMap;

use waymark_core::{ConfirmedPairing, MatchedPotential, Nomination};

/// Decides which matched potentials the operator confirms.
///
/// `matches` maps new-nomination ids to candidates ordered as they should be
/// presented; the first entry is the default selection. Implementations
/// return at most one pairing per nomination.
pub trait MatchResolver {
    fn resolve(
        &self,
        matches: &HashMap<String, Vec<MatchedPotential>>,
        nominations: &[Nomination],
    ) -> impl std::future::Future<Output = Vec<ConfirmedPairing>> + Send;
}

/// Non-interactive resolution policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoPolicy {
    /// Confirm the default (first-presented) candidate for every nomination.
    First,
    /// Confirm nothing; equivalent to the operator dismissing the prompt.
    None,
}

/// Resolver applying a fixed [`AutoPolicy`] without operator input.
#[derive(Debug, Clone, Copy)]
pub struct AutoResolver {
    pub policy: AutoPolicy,
}

impl MatchResolver for AutoResolver {
    async fn resolve(
        &self,
        matches: &HashMap<String, Vec<MatchedPotential>>,
        _nominations: &[Nomination],
    ) -> Vec<ConfirmedPairing> {
        match self.policy {
            AutoPolicy::None => Vec::new(),
            AutoPolicy::First => matches
                .iter()
                .filter_map(|(new_id, pots)| {
                    pots.first().map(|pot| ConfirmedPairing {
                        new_nomination_id: new_id.clone(),
                        potential_id: pot.id.clone(),
                    })
                })
                .collect(),
        }
    }
}

/// Interactive resolver prompting on stdin, one nomination at a time.
///
/// Presents each matched potential with coordinates to 5 decimal places
/// (`N/A` for non-finite values). Empty input takes the default (first)
/// candidate; `s`, unparseable text, and out-of-range numbers all skip the
/// nomination. Confirming a pairing deletes the matched potential from the
/// remote endpoint, so garbage input must never count as a confirmation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinResolver;

/// Maps one line of operator input to an index into the presented options.
///
/// `None` means skip: `s`, anything unparseable, `0`, and numbers past
/// `option_count` all land here. Empty input selects the default (index 0).
fn parse_selection(input: &str, option_count: usize) -> Option<usize> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("s") {
        return None;
    }
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .filter(|idx| *idx < option_count)
}

impl MatchResolver for StdinResolver {
    async fn resolve(
        &self,
        matches: &HashMap<String, Vec<MatchedPotential>>,
        nominations: &[Nomination],
    ) -> Vec<ConfirmedPairing> {
        let mut confirmed = Vec::new();

        for (new_id, pots) in matches {
            let title = nominations
                .iter()
                .find(|n| &n.id == new_id)
                .map_or(new_id.as_str(), |n| n.title.as_str());

            println!("\nNew nomination: {title}");
            for (idx, pot) in pots.iter().enumerate() {
                let marker = if idx == 0 { "*" } else { " " };
                println!("  {marker}[{}] {}", idx + 1, describe_potential(pot));
            }
            println!("Select a match [1-{}], or 's' to skip (default 1):", pots.len());

            // Reading stdin is blocking, so keep it off the async workers.
            let line = match tokio::task::spawn_blocking(|| {
                let mut line = String::new();
                std::io::stdin().read_line(&mut line).map(|read| (read, line))
            })
            .await
            {
                Ok(Ok((read, line))) if read > 0 => line,
                // EOF or a read error counts as a dismissal, not a default.
                _ => continue,
            };
            let Some(choice) = parse_selection(&line, pots.len()) else {
                continue;
            };
            if let Some(pot) = pots.get(choice) {
                confirmed.push(ConfirmedPairing {
                    new_nomination_id: new_id.clone(),
                    potential_id: pot.id.clone(),
                });
            }
        }

        confirmed
    }
}

/// `"<title> (<lat>, <lng>)"` with coordinates to 5 decimal places.
#[must_use]
pub fn describe_potential(pot: &MatchedPotential) -> String {
    format!(
        "Potential: {} ({}, {})",
        pot.candidate.title,
        format_coord(pot.candidate.lat),
        format_coord(pot.candidate.lng)
    )
}

/// Formats a coordinate to 5 decimal places; non-finite values render as
/// `N/A` instead of failing.
#[must_use]
pub fn format_coord(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.5}")
    } else {
        "N/A".to_string()
    }
}

#[cfg(test)]
mod tests {
    use waymark_core::{Candidate, CandidateStatus};

    use super::*;

    fn matched(id: &str, title: &str, lat: f64, lng: f64) -> MatchedPotential {
        MatchedPotential {
            id: id.into(),
            candidate: Candidate {
                title: title.into(),
                description: String::new(),
                lat,
                lng,
                status: CandidateStatus::Potential,
            },
        }
    }

    #[test]
    fn empty_input_selects_the_default() {
        assert_eq!(parse_selection("\n", 3), Some(0));
        assert_eq!(parse_selection("  \n", 3), Some(0));
    }

    #[test]
    fn numeric_input_is_one_based() {
        assert_eq!(parse_selection("1\n", 3), Some(0));
        assert_eq!(parse_selection(" 3 \n", 3), Some(2));
    }

    #[test]
    fn invalid_input_skips_instead_of_confirming() {
        // A pairing deletes the matched potential remotely, so nothing
        // ambiguous may fall through to the default.
        assert_eq!(parse_selection("x\n", 2), None);
        assert_eq!(parse_selection("9\n", 2), None);
        assert_eq!(parse_selection("0\n", 2), None);
        assert_eq!(parse_selection("1.5\n", 2), None);
        assert_eq!(parse_selection("-1\n", 2), None);
    }

    #[test]
    fn s_skips_case_insensitively() {
        assert_eq!(parse_selection("s\n", 2), None);
        assert_eq!(parse_selection("S\n", 2), None);
    }

    #[test]
    fn format_coord_rounds_to_five_places() {
        assert_eq!(format_coord(10.123_456_789), "10.12346");
        assert_eq!(format_coord(-20.0), "-20.00000");
    }

    #[test]
    fn format_coord_handles_non_finite() {
        assert_eq!(format_coord(f64::NAN), "N/A");
        assert_eq!(format_coord(f64::INFINITY), "N/A");
    }

    #[test]
    fn describe_potential_formats_title_and_coords() {
        let pot = matched("P1", "Old Fountain", 10.000_05, 20.0);
        assert_eq!(
            describe_potential(&pot),
            "Potential: Old Fountain (10.00005, 20.00000)"
        );
    }

    #[tokio::test]
    async fn auto_first_confirms_default_candidate() {
        let mut matches = HashMap::new();
        matches.insert(
            "N1".to_string(),
            vec![matched("P1", "Nearest", 0.0, 0.0), matched("P2", "Other", 0.0, 0.0)],
        );
        let resolver = AutoResolver {
            policy: AutoPolicy::First,
        };
        let confirmed = resolver.resolve(&matches, &[]).await;
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].new_nomination_id, "N1");
        assert_eq!(confirmed[0].potential_id, "P1");
    }

    #[tokio::test]
    async fn auto_none_confirms_nothing() {
        let mut matches = HashMap::new();
        matches.insert("N1".to_string(), vec![matched("P1", "Nearest", 0.0, 0.0)]);
        let resolver = AutoResolver {
            policy: AutoPolicy::None,
        };
        assert!(resolver.resolve(&matches, &[]).await.is_empty());
    }
}
