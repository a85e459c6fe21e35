use crate::store::RepositoryStore;
use crate::types::RepositorySummary;

use super::{ApiClient, SearchError};

/// Validate and submit a dashboard search.
///
/// An empty or whitespace-only query fails immediately with
/// [`SearchError::EmptyInput`] and performs no network call. Otherwise a
/// single lookup is issued with the raw query as the repository identifier;
/// on success the returned summary is appended to the store and handed back
/// to the caller. On failure the store is left untouched.
pub async fn submit(
    client: &ApiClient,
    store: &RepositoryStore,
    query: &str,
) -> Result<RepositorySummary, SearchError> {
    if query.trim().is_empty() {
        return Err(SearchError::EmptyInput);
    }

    let bundle = client.lookup_repository(query).await.map_err(|e| {
        log::error!("repository lookup failed: {e:#}");
        SearchError::NotFound
    })?;

    let summary = bundle.repository.summary();
    store.append(summary.clone());
    Ok(summary)
}
