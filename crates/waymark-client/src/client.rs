//! HTTP client for the remote record-keeping endpoint.
//!
//! The endpoint is a single URL (treated as a shared secret) speaking two
//! operations: `GET` for the full candidate snapshot and form-encoded `POST`
//! for upserts and deletion markers. Wraps `reqwest` with explicit timeouts
//! — the upstream the operator talks to is a spreadsheet script and can hang
//! indefinitely without one.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Url};

use waymark_core::status::remote_upload_status;
use waymark_core::{Candidate, Nomination};

use crate::error::ClientError;
use crate::types::RemoteCandidate;

/// Client for one remote endpoint.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    endpoint: Url,
}

impl RemoteClient {
    /// Creates a client for `endpoint` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if the URL does not parse,
    /// or [`ClientError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("waymark/0.1 (candidate-sync)")
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| ClientError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches the authoritative candidate snapshot.
    ///
    /// Filters the returned array to the four recognized statuses, maps the
    /// remote live token to the internal `live`, and coerces coordinates.
    /// All-or-nothing: on any failure the caller's store must stay as-is.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure, timeout, or non-2xx.
    /// - [`ClientError::Deserialize`] if the body is not a JSON array of
    ///   records.
    pub async fn fetch_snapshot(&self) -> Result<HashMap<String, Candidate>, ClientError> {
        let response = self.client.get(self.endpoint.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let raw: Vec<RemoteCandidate> =
            serde_json::from_str(&body).map_err(|source| ClientError::Deserialize {
                context: "candidate snapshot".to_string(),
                source,
            })?;

        let total = raw.len();
        let mapped: HashMap<String, Candidate> = raw
            .into_iter()
            .filter_map(RemoteCandidate::into_candidate)
            .collect();

        tracing::debug!(
            total,
            kept = mapped.len(),
            "fetched candidate snapshot from endpoint"
        );
        Ok(mapped)
    }

    /// Uploads one nomination as a form-encoded upsert.
    ///
    /// The status field is the inverse of the fetch mapping: a normalized
    /// `live` state goes out as the remote live token. Failure is per-item;
    /// the caller decides whether sibling uploads continue.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on network failure, timeout, or non-2xx.
    pub async fn upload_nomination(
        &self,
        nomination: &Nomination,
        nickname: &str,
    ) -> Result<(), ClientError> {
        let status = remote_upload_status(&nomination.normalized_state());
        let lat = nomination.lat.to_string();
        let lng = nomination.lng.to_string();
        let submitted_date = nomination.submitted_date();
        let form = [
            ("id", nomination.id.as_str()),
            ("title", nomination.title.as_str()),
            ("description", nomination.description.as_str()),
            ("lat", lat.as_str()),
            ("lng", lng.as_str()),
            ("status", status.as_str()),
            ("candidateimageurl", nomination.first_image_url()),
            ("nickname", nickname),
            ("submitteddate", submitted_date.as_str()),
        ];

        self.client
            .post(self.endpoint.clone())
            .form(&form)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Issues a deletion marker for one id.
    ///
    /// Callers treat this as fire-and-forget: spawn it, log on failure,
    /// never retry.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on network failure, timeout, or non-2xx.
    pub async fn request_deletion(&self, id: &str) -> Result<(), ClientError> {
        let form = [("status", "delete"), ("id", id)];
        self.client
            .post(self.endpoint.clone())
            .form(&form)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
