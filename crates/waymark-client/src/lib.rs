pub mod client;
pub mod error;
pub mod types;

pub use client::RemoteClient;
pub use error::ClientError;
pub use types::RemoteCandidate;
