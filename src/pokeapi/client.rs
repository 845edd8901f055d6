//! Upstream PokéAPI client.
//!
//! Read-only access to the remote data source. List queries carry a
//! degrading-limit retry strategy; everything else is a single call whose
//! response passes through unmodified.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::info;

/// Candidate limits tried in order when the upstream rejects a list query
/// with a validation status.
const LIST_LIMIT_CANDIDATES: [i64; 7] = [1000, 500, 200, 100, 50, 20, 10];

/// Timeout for list pages and type detail requests.
const LONG_TIMEOUT: Duration = Duration::from_secs(20);
/// Timeout for Pokémon detail and type list requests.
const SHORT_TIMEOUT: Duration = Duration::from_secs(15);

// == Upstream Error ==
/// Failure modes of the remote data source.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-success status; body preserved for
    /// verbatim passthrough.
    #[error("upstream returned status {status}")]
    Status { status: u16, body: Value },

    /// The upstream could not be reached or timed out.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

// == Client ==
/// HTTP client for the upstream Pokémon API.
#[derive(Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    /// Creates a client rooted at the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch a page of the Pokémon list.
    ///
    /// If the upstream rejects a limit with 400/422, the request is retried
    /// with progressively smaller limits from a fixed descending sequence.
    /// Any other failure status is returned immediately, unmodified. When
    /// every candidate is rejected the call degrades to an empty page
    /// rather than an error.
    pub async fn list_page(&self, limit: i64, offset: i64) -> Result<Value, UpstreamError> {
        let candidates = std::iter::once(limit).chain(LIST_LIMIT_CANDIDATES);

        for candidate in candidates {
            let response = self
                .http
                .get(format!("{}/pokemon", self.base_url))
                .query(&[("limit", candidate), ("offset", offset)])
                .timeout(LONG_TIMEOUT)
                .send()
                .await?;

            let status = response.status();
            info!(limit = candidate, offset, status = %status, "GET /pokemon");

            if status.is_success() {
                return Ok(response.json().await?);
            }
            if status != StatusCode::UNPROCESSABLE_ENTITY && status != StatusCode::BAD_REQUEST {
                return Err(Self::status_error(response).await);
            }
            // 400/422: fall through to the next candidate limit
        }

        // Every candidate was rejected as invalid; degrade to an empty page.
        Ok(json!({
            "count": 0,
            "next": null,
            "previous": null,
            "results": []
        }))
    }

    /// Fetch a single Pokémon's detail payload.
    pub async fn detail(&self, name: &str) -> Result<Value, UpstreamError> {
        self.get_json(&format!("{}/pokemon/{}", self.base_url, name), SHORT_TIMEOUT)
            .await
    }

    /// Fetch the full type list.
    pub async fn list_types(&self) -> Result<Value, UpstreamError> {
        self.get_json(&format!("{}/type", self.base_url), SHORT_TIMEOUT)
            .await
    }

    /// Fetch a type's raw detail payload, including its Pokémon entries.
    pub async fn type_detail(&self, name: &str) -> Result<Value, UpstreamError> {
        self.get_json(&format!("{}/type/{}", self.base_url, name), LONG_TIMEOUT)
            .await
    }

    /// One GET, success body or status error passed through.
    async fn get_json(&self, url: &str, timeout: Duration) -> Result<Value, UpstreamError> {
        let response = self.http.get(url).timeout(timeout).send().await?;

        let status = response.status();
        info!(url, status = %status, "GET upstream");

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::status_error(response).await)
        }
    }

    /// Builds a status error preserving the upstream body where possible.
    async fn status_error(response: reqwest::Response) -> UpstreamError {
        let status = response.status().as_u16();
        let body = response.json().await.unwrap_or(Value::Null);
        UpstreamError::Status { status, body }
    }
}
