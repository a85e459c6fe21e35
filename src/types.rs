//! # Common Types
//!
//! This module contains the serde-mapped records exchanged with the
//! LibQuality backend API and persisted in the local repository store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lightweight identity/display record for a searched repository.
///
/// This is the shape that the dashboard list renders and the local store
/// persists. The backend serves camelCase field names, with the legacy
/// `htmlURL` casing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    /// Repository identifier in "owner/repo" form
    pub full_name: String,
    /// Avatar URL of the repository owner
    pub owner_avatar_url: String,
    /// Primary language of the repository
    pub language: String,
    /// Link to the repository on GitHub
    #[serde(rename = "htmlURL")]
    pub html_url: String,
}

/// Full per-repository record served by the backend.
///
/// Fetched fresh on every detail-view visit and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDetail {
    pub full_name: String,
    pub id: String,
    pub owner_avatar_url: String,
    pub language: String,
    #[serde(rename = "htmlURL")]
    pub html_url: String,
    pub open_issues_count: u64,
    pub size: u64,
    pub stargazers_count: u64,
    pub forks_count: u64,
}

impl RepositoryDetail {
    /// Project the detail record down to the summary shape stored in the
    /// dashboard list.
    pub fn summary(&self) -> RepositorySummary {
        RepositorySummary {
            full_name: self.full_name.clone(),
            owner_avatar_url: self.owner_avatar_url.clone(),
            language: self.language.clone(),
            html_url: self.html_url.clone(),
        }
    }
}

/// One day's point-in-time measurement of a repository's open-issue
/// statistics. The set of snapshots is read-only history from the client's
/// perspective; mean and deviation are consumed as computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSnapshot {
    pub id: String,
    pub repository_id: String,
    /// Calendar day the snapshot was observed
    pub searched_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    /// Total open issues on the observed day
    pub issues_total: u64,
    /// Creation time of the oldest open issue
    pub oldest_issue: DateTime<Utc>,
    /// Creation time of the newest open issue
    pub newest_issue: DateTime<Utc>,
    /// Mean age in days of open issues
    pub mean_of_issue: f64,
    /// Standard deviation of open-issue age in days
    pub deviation_of_issue: f64,
}

/// Combined response of the backend's `POST /repositories` endpoint.
///
/// The same endpoint serves both the dashboard search and the detail view;
/// only the caller decides whether the summary gets persisted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryBundle {
    pub repository: RepositoryDetail,
    pub issue_data: Vec<IssueSnapshot>,
}
