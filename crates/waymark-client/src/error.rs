use thiserror::Error;

/// Errors returned by the remote endpoint client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network/TLS failure, timeout, or non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint URL could not be parsed.
    #[error("invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
