//! Dataset loading. The three CSV files are read concurrently and the
//! pipeline proceeds only once all three resolve: a failure in any one fails
//! the whole load (the caller surfaces a single error state for every chart
//! region). Zero-row datasets load successfully; emptiness is handled per
//! affected view downstream.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::records::{
    normalize_commits, normalize_issues, normalize_prs, CommitRecord, DropReport, IssueRecord,
    PrRecord, RawCommitRow, RawIssueRow, RawPrRow,
};

/// The immutable normalized base all filtering and aggregation reads from.
/// Built once at load time; never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub issues: Vec<IssueRecord>,
    pub commits: Vec<CommitRecord>,
    pub prs: Vec<PrRecord>,
    pub issue_report: DropReport,
    pub commit_report: DropReport,
}

/// Load and normalize all three datasets concurrently, all-or-fail-fast.
pub async fn load_datasets(
    issues_path: &Path,
    commits_path: &Path,
    prs_path: &Path,
    now: DateTime<Utc>,
) -> Result<Datasets> {
    let (issue_rows, commit_rows, pr_rows) = tokio::try_join!(
        read_rows::<RawIssueRow>(issues_path),
        read_rows::<RawCommitRow>(commits_path),
        read_rows::<RawPrRow>(prs_path),
    )?;

    let (issues, issue_report) = normalize_issues(&issue_rows, now);
    let (commits, commit_report) = normalize_commits(&commit_rows);
    let prs = normalize_prs(&pr_rows);

    log::info!(
        "loaded {} issues ({} dropped), {} commits ({} dropped), {} PRs",
        issue_report.kept,
        issue_report.dropped,
        commit_report.kept,
        commit_report.dropped,
        prs.len()
    );

    Ok(Datasets {
        issues,
        commits,
        prs,
        issue_report,
        commit_report,
    })
}

/// Load just the issue dataset.
pub async fn load_issues(path: &Path, now: DateTime<Utc>) -> Result<(Vec<IssueRecord>, DropReport)> {
    let rows = read_rows::<RawIssueRow>(path).await?;
    Ok(normalize_issues(&rows, now))
}

/// Load just the commit dataset.
pub async fn load_commits(path: &Path) -> Result<(Vec<CommitRecord>, DropReport)> {
    let rows = read_rows::<RawCommitRow>(path).await?;
    Ok(normalize_commits(&rows))
}

/// Load just the PR dataset.
pub async fn load_prs(path: &Path) -> Result<Vec<PrRecord>> {
    let rows = read_rows::<RawPrRow>(path).await?;
    Ok(normalize_prs(&rows))
}

/// Read one CSV file into raw rows. Headers map to struct fields; ragged
/// rows are tolerated (missing cells default to empty, row-level policy is
/// the normalizer's job). A structural CSV failure fails the dataset.
async fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let display = path.display().to_string();
    let contents = tokio::fs::read_to_string(path).await.map_err(|source| Error::Io {
        path: display.clone(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(contents.as_bytes());

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let row: T = row.map_err(|e| Error::Csv {
            path: display.clone(),
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}
