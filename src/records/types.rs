use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issue lifecycle state. Missing or unrecognized states default to `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    /// Case-insensitive parse with `Open` as the fallback.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("closed") {
            IssueState::Closed
        } else {
            IssueState::Open
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "OPEN",
            IssueState::Closed => "CLOSED",
        }
    }
}

/// A normalized issue, one Gantt row.
#[derive(Debug, Clone, Serialize)]
pub struct IssueRecord {
    pub id: String,
    pub number: i64,
    pub title: String,
    pub state: IssueState,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Distinct contributor names in first-occurrence order.
    pub contributors: Vec<String>,
    pub duration_days: i64,
    pub repo_owner: String,
    pub repo_name: String,
}

/// A normalized commit, one scatter point.
#[derive(Debug, Clone, Serialize)]
pub struct CommitRecord {
    pub sha: String,
    pub message: String,
    pub date: DateTime<Utc>,
    pub files_changed: i64,
    /// Signed line delta for the commit.
    pub diff: i64,
    pub author: String,
    /// 0 = Sunday through 6 = Saturday.
    pub weekday: u8,
    /// 0 through 23.
    pub hour: u8,
    /// Zero-indexed month, 0 = January.
    pub month0: u8,
    pub year: i32,
    pub repo_owner: String,
    pub repo_name: String,
}

/// A normalized pull request. Only the funnel timing columns are consumed;
/// identifying columns in the source file are ignored.
#[derive(Debug, Clone, Serialize)]
pub struct PrRecord {
    pub time_to_first_review_sec: Option<f64>,
    pub time_to_approval_sec: Option<f64>,
    pub time_to_merge_sec: Option<f64>,
    pub was_merged: bool,
}

// ── Raw rows, deserialized straight from the CSV headers ───────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIssueRow {
    #[serde(default)]
    pub issue_id: String,
    #[serde(default)]
    pub issue_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub closed_date: String,
    #[serde(default)]
    pub contributors: String,
    #[serde(default)]
    pub repo_owner: String,
    #[serde(default)]
    pub repo_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCommitRow {
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub number_of_files_updated: String,
    #[serde(default)]
    pub diff: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub repo_owner: String,
    #[serde(default)]
    pub repo_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPrRow {
    #[serde(default)]
    pub time_to_first_review_sec: String,
    #[serde(default)]
    pub time_to_approval_sec: String,
    #[serde(default)]
    pub time_to_merge_sec: String,
    #[serde(default)]
    pub was_merged: String,
}
