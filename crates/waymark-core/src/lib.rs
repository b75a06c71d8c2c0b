pub mod config;
pub mod geo;
pub mod status;
pub mod types;

pub use config::{load_config, load_config_from_env, Config, ConfigError};
pub use geo::{GeoBounds, GeoPoint, ScreenPoint, Viewport, WorldPoint};
pub use status::CandidateStatus;
pub use types::{
    Candidate, Classification, ConfirmedPairing, MatchedPotential, Nomination, NominationImage,
    Reason,
};
