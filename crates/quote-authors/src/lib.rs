//! quote-authors — HTTP client for the remote author service.
//!
//! The author service owns author identity records. This client exposes
//! the two calls the quote service consumes:
//!
//! - `GET {base}/api/version` → the remote version string
//! - `GET {base}/api/authors/by-id?id=<comma-separated ids>` → author records
//!
//! Failures propagate to the caller without retry; the service does not
//! cache author lookups.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Request timeout applied to every call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// An author identity record owned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct VersionResponse {
    version: String,
}

#[derive(Debug, Deserialize)]
struct AuthorsResponse {
    items: Vec<Author>,
}

/// Errors from the author service boundary.
#[derive(Debug, Error)]
pub enum AuthorError {
    #[error("author service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("author service returned status {0}")]
    Status(u16),
}

/// Client for the remote author service.
#[derive(Clone)]
pub struct AuthorClient {
    base_url: String,
    http: reqwest::Client,
}

impl AuthorClient {
    /// Build a client for the service at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self, AuthorError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    /// Fetch the author service version string.
    pub async fn version(&self) -> Result<String, AuthorError> {
        let url = format!("{}/api/version", self.base_url);

        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(AuthorError::Status(resp.status().as_u16()));
        }

        let body: VersionResponse = resp.json().await?;
        Ok(body.version)
    }

    /// Fetch author records for the given ids.
    ///
    /// An empty id list short-circuits without a network call.
    pub async fn authors_by_ids(&self, ids: &[i64]) -> Result<Vec<Author>, AuthorError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let id_param = ids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/api/authors/by-id", self.base_url);
        debug!(ids = %id_param, "fetching authors");

        let resp = self
            .http
            .get(&url)
            .query(&[("id", id_param.as_str())])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(AuthorError::Status(resp.status().as_u16()));
        }

        let body: AuthorsResponse = resp.json().await?;
        Ok(body.items)
    }
}
