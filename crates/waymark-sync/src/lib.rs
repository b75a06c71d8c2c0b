//! Candidate synchronization engine: diffing, proximity matching, conflict
//! resolution, batched upload, and viewport visibility.
//!
//! One synchronization pass is fetch → diff/match → (optional) conflict
//! resolution → batched upload, orchestrated by [`session::run_sync_pass`].
//! The viewport filter in [`viewport`] is independent of the pass and only
//! reads the store.

pub mod diff;
pub mod resolve;
pub mod session;
pub mod source;
pub mod upload;
pub mod viewport;

pub use diff::{classify, SyncPlan};
pub use resolve::{AutoPolicy, AutoResolver, MatchResolver, StdinResolver};
pub use session::{run_preview_pass, run_sync_pass, StatusSink, SyncError, SyncOptions, SyncSession, TracingSink};
pub use source::{JsonFileSource, NominationSource, SourceError, StaticSource};
pub use upload::{upload_in_batches, UploadOutcome, BATCH_SIZE};
pub use viewport::{run_marker_loop, visible_markers, viewport_key, Marker, RedrawGate};
