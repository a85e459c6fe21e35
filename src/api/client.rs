use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;

use crate::types::RepositoryBundle;

/// Default address of the LibQuality backend.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";

/// User-facing search failures. Every backend problem (network error,
/// unknown repository, malformed response) collapses into [`NotFound`];
/// the display strings are what the dashboard shows.
///
/// [`NotFound`]: SearchError::NotFound
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Type a OWNER/REPOSITORY")]
    EmptyInput,
    #[error("Sorry... We can't find this repository.")]
    NotFound,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    repo_name: &'a str,
}

/// HTTP client for the LibQuality backend.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Look up a repository and its issue history on the backend.
    ///
    /// Issues a single `POST /repositories` request; there are no retries.
    /// The same endpoint serves both the dashboard search and the detail
    /// view, so the caller decides what to do with the returned bundle.
    pub async fn lookup_repository(&self, repo_name: &str) -> Result<RepositoryBundle> {
        let url = format!("{}/repositories", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&LookupRequest { repo_name })
            .send()
            .await
            .context("failed to reach the LibQuality backend")?;

        let response = response
            .error_for_status()
            .context("repository lookup was rejected")?;

        response
            .json::<RepositoryBundle>()
            .await
            .context("malformed repository lookup response")
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
