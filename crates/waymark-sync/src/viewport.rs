//! Viewport visibility filter.
//!
//! Selects the `potential` candidates inside a viewport's geographic bounds,
//! projects them to screen coordinates, and orders them for painting. A
//! polling loop re-renders only when the rounded viewport key changes, so a
//! static map costs nothing beyond the key comparison.

use std::time::Duration;

use waymark_core::geo::{ScreenPoint, Viewport};
use waymark_core::CandidateStatus;
use waymark_store::CandidateMap;

/// Polling cadence for viewport changes.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A candidate positioned for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    pub screen: ScreenPoint,
}

/// Returns the `potential` candidates visible in `viewport`, projected to
/// screen coordinates and sorted ascending by screen y (painter's order:
/// markers nearer the top are drawn first so lower ones layer on top).
///
/// Bounds are inclusive on all edges.
#[must_use]
pub fn visible_markers(store: &CandidateMap, viewport: &Viewport) -> Vec<Marker> {
    let bounds = viewport.bounds();
    let mut markers: Vec<Marker> = store
        .iter()
        .filter(|(_, c)| c.status == CandidateStatus::Potential)
        .filter(|(_, c)| bounds.contains(c.lat, c.lng))
        .map(|(id, c)| Marker {
            id: id.clone(),
            title: c.title.clone(),
            lat: c.lat,
            lng: c.lng,
            screen: viewport.project(c.lng, c.lat),
        })
        .collect();
    markers.sort_by(|a, b| a.screen.y.total_cmp(&b.screen.y));
    markers
}

/// Rounded fingerprint of a viewport: center to 5 decimal places, zoom to 2,
/// dimensions as-is. Two viewports with equal keys render identically.
#[must_use]
pub fn viewport_key(viewport: &Viewport) -> String {
    format!(
        "{:.5}|{:.5}|{:.2}|{}|{}",
        viewport.center.lat, viewport.center.lng, viewport.zoom, viewport.width, viewport.height
    )
}

/// Debounce state for the render loop: remembers the last rendered key and
/// only approves a redraw when it changes. A resize shows up as a key change
/// like any other viewport movement.
#[derive(Debug, Clone, Default)]
pub struct RedrawGate {
    last_key: String,
}

impl RedrawGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `viewport` differs from the last rendered one,
    /// recording it as rendered.
    pub fn should_redraw(&mut self, viewport: &Viewport) -> bool {
        let key = viewport_key(viewport);
        if key == self.last_key {
            false
        } else {
            self.last_key = key;
            true
        }
    }
}

/// Polls `provider` every [`POLL_INTERVAL`] and calls `render` with the
/// visible markers whenever the viewport key changes. A `None` viewport
/// (map not visible) is skipped without clearing the gate. Runs until the
/// caller drops or cancels the future.
pub async fn run_marker_loop<P, L, R>(mut provider: P, load: L, mut render: R)
where
    P: FnMut() -> Option<Viewport>,
    L: Fn() -> CandidateMap,
    R: FnMut(&Viewport, Vec<Marker>),
{
    let mut gate = RedrawGate::new();
    let mut interval = tokio::time::interval(POLL_INTERVAL);
    loop {
        interval.tick().await;
        let Some(viewport) = provider() else { continue };
        if gate.should_redraw(&viewport) {
            let markers = visible_markers(&load(), &viewport);
            render(&viewport, markers);
        }
    }
}
