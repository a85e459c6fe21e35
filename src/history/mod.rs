//! Derivations over a repository's daily issue-snapshot history: the
//! "today" headline stats and the chart data table. Everything here is a
//! linear scan; snapshots arrive from the backend already in chronological
//! order and are not re-sorted.

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::IssueSnapshot;

/// Date label format used in the chart table.
pub const SERIES_DATE_FORMAT: &str = "%Y/%m/%d";

/// One cell of the chart data table. The chart consumer takes a table of
/// string-or-number cells, with the first row carrying the column labels.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartCell {
    Text(String),
    Number(u64),
}

/// Find the snapshot observed on `today`.
///
/// Comparison is at day granularity. When duplicates exist for the same day
/// (clock or timezone edge case), the last one in iteration order wins.
pub fn find_today(snapshots: &[IssueSnapshot], today: NaiveDate) -> Option<&IssueSnapshot> {
    snapshots
        .iter()
        .filter(|snapshot| snapshot.searched_date == today)
        .last()
}

/// Presentation view of the "today" snapshot for the headline stat tiles.
///
/// Mean and deviation are rounded to whole days for display only; the
/// underlying snapshot keeps its real-valued fields.
#[derive(Debug, Clone, PartialEq)]
pub struct TodayStats {
    pub issues_total: u64,
    pub mean_of_issue: i64,
    pub deviation_of_issue: i64,
    pub oldest_issue: DateTime<Utc>,
}

impl TodayStats {
    pub fn from_snapshot(snapshot: &IssueSnapshot) -> Self {
        Self {
            issues_total: snapshot.issues_total,
            mean_of_issue: snapshot.mean_of_issue.round() as i64,
            deviation_of_issue: snapshot.deviation_of_issue.round() as i64,
            oldest_issue: snapshot.oldest_issue,
        }
    }
}

/// Build the chart data table: a fixed `["Date", "Issues"]` header row
/// followed by one `[date, count]` row per snapshot, in input order.
pub fn build_series(snapshots: &[IssueSnapshot]) -> Vec<[ChartCell; 2]> {
    let mut table = Vec::with_capacity(snapshots.len() + 1);
    table.push([
        ChartCell::Text("Date".to_string()),
        ChartCell::Text("Issues".to_string()),
    ]);
    for snapshot in snapshots {
        table.push([
            ChartCell::Text(snapshot.searched_date.format(SERIES_DATE_FORMAT).to_string()),
            ChartCell::Number(snapshot.issues_total),
        ]);
    }
    table
}

/// Numeric `(date, count)` pairs of a chart table, header row skipped.
pub fn data_points(table: &[[ChartCell; 2]]) -> Vec<(String, u64)> {
    table
        .iter()
        .filter_map(|row| match row {
            [ChartCell::Text(date), ChartCell::Number(count)] => Some((date.clone(), *count)),
            _ => None,
        })
        .collect()
}

/// Whole-day age of the oldest open issue, truncated toward zero.
pub fn age_in_days(reference: DateTime<Utc>, oldest_issue: DateTime<Utc>) -> i64 {
    reference.signed_duration_since(oldest_issue).num_days()
}
