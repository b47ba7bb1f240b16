pub mod types;

pub use types::*;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::date_util::{parse_timestamp, whole_days_between};

/// Diagnostic count of rows dropped during normalization.
/// Dropped rows are expected (malformed exports), so this is returned to the
/// caller rather than raised as an error.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DropReport {
    pub kept: usize,
    pub dropped: usize,
}

impl DropReport {
    pub fn total(&self) -> usize {
        self.kept + self.dropped
    }
}

/// Normalize raw issue rows into typed records.
///
/// Rows without a parseable `created_date` are dropped. A missing
/// `closed_date` means the issue is still open and ends at `now`. When the
/// parsed end precedes the start, a CLOSED issue is corrected to end one day
/// after it started and an open issue is corrected to end at `now`, so
/// `end_date >= start_date` holds for every record returned.
///
/// `now` is passed explicitly so the transform stays pure.
pub fn normalize_issues(
    rows: &[RawIssueRow],
    now: DateTime<Utc>,
) -> (Vec<IssueRecord>, DropReport) {
    let mut records = Vec::with_capacity(rows.len());
    let mut report = DropReport::default();

    for row in rows {
        let Some(start) = parse_timestamp(&row.created_date) else {
            log::debug!("dropping issue row without created_date: {:?}", row.issue_id);
            report.dropped += 1;
            continue;
        };

        let state = IssueState::from_raw(&row.state);
        let mut end = parse_timestamp(&row.closed_date).unwrap_or(now);
        if end < start {
            end = match state {
                IssueState::Closed => start + Duration::days(1),
                IssueState::Open => now,
            };
        }

        records.push(IssueRecord {
            id: row.issue_id.clone(),
            number: lenient_int(&row.issue_number),
            title: row.title.clone(),
            state,
            start_date: start,
            end_date: end,
            contributors: split_contributors(&row.contributors),
            duration_days: whole_days_between(start, end),
            repo_owner: row.repo_owner.clone(),
            repo_name: row.repo_name.clone(),
        });
        report.kept += 1;
    }

    (records, report)
}

/// Normalize raw commit rows into typed records.
///
/// Rows with an unparseable `created_date` are excluded entirely rather than
/// retained with sentinel weekday/hour values.
pub fn normalize_commits(rows: &[RawCommitRow]) -> (Vec<CommitRecord>, DropReport) {
    use chrono::{Datelike, Timelike};

    let mut records = Vec::with_capacity(rows.len());
    let mut report = DropReport::default();

    for row in rows {
        let Some(date) = parse_timestamp(&row.created_date) else {
            log::debug!("dropping commit row without created_date: {:?}", row.sha);
            report.dropped += 1;
            continue;
        };

        records.push(CommitRecord {
            sha: row.sha.clone(),
            message: row.message.clone(),
            date,
            files_changed: lenient_int(&row.number_of_files_updated),
            diff: lenient_int(&row.diff),
            author: row.author.clone(),
            weekday: date.weekday().num_days_from_sunday() as u8,
            hour: date.hour() as u8,
            month0: (date.month0()) as u8,
            year: date.year(),
            repo_owner: row.repo_owner.clone(),
            repo_name: row.repo_name.clone(),
        });
        report.kept += 1;
    }

    (records, report)
}

/// Normalize raw PR rows. Empty timing cells become `None`; the merged flag
/// accepts `"1"` or `"true"`.
pub fn normalize_prs(rows: &[RawPrRow]) -> Vec<PrRecord> {
    rows.iter()
        .map(|row| PrRecord {
            time_to_first_review_sec: lenient_float(&row.time_to_first_review_sec),
            time_to_approval_sec: lenient_float(&row.time_to_approval_sec),
            time_to_merge_sec: lenient_float(&row.time_to_merge_sec),
            was_merged: is_truthy_flag(&row.was_merged),
        })
        .collect()
}

/// Split a `;`-delimited contributors field into distinct trimmed names,
/// preserving first-occurrence order.
fn split_contributors(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for part in raw.split(';') {
        let name = part.trim();
        if name.is_empty() {
            continue;
        }
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Integer cells parse leniently: empty or garbage becomes 0. Only missing
/// dates drop a row.
fn lenient_int(s: &str) -> i64 {
    s.trim().parse::<i64>().unwrap_or(0)
}

/// Timing cells are nullable: empty means the stage was never reached.
fn lenient_float(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

fn is_truthy_flag(s: &str) -> bool {
    let s = s.trim();
    s == "1" || s == "true"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_util::parse_timestamp;

    fn issue_row(created: &str, closed: &str, state: &str) -> RawIssueRow {
        RawIssueRow {
            issue_id: "i1".into(),
            issue_number: "42".into(),
            title: "Fix the widget".into(),
            state: state.into(),
            created_date: created.into(),
            closed_date: closed.into(),
            contributors: "alice; bob ;;alice".into(),
            repo_owner: "octo".into(),
            repo_name: "widgets".into(),
        }
    }

    fn now() -> chrono::DateTime<Utc> {
        parse_timestamp("2024-06-01T12:00:00Z").unwrap()
    }

    #[test]
    fn test_issue_basic_normalization() {
        let rows = vec![issue_row("2024-01-01T00:00:00Z", "2024-01-05T00:00:00Z", "closed")];
        let (records, report) = normalize_issues(&rows, now());
        assert_eq!(report.kept, 1);
        assert_eq!(report.dropped, 0);
        let rec = &records[0];
        assert_eq!(rec.number, 42);
        assert_eq!(rec.state, IssueState::Closed);
        assert_eq!(rec.duration_days, 4);
        assert_eq!(rec.contributors, vec!["alice", "bob"]);
    }

    #[test]
    fn test_issue_missing_start_date_dropped() {
        let rows = vec![
            issue_row("", "2024-01-05T00:00:00Z", "open"),
            issue_row("garbage", "", "open"),
            issue_row("2024-01-01T00:00:00Z", "", "open"),
        ];
        let (records, report) = normalize_issues(&rows, now());
        assert_eq!(records.len(), 1);
        assert_eq!(report.dropped, 2);
    }

    #[test]
    fn test_issue_open_without_close_ends_now() {
        let rows = vec![issue_row("2024-05-01T00:00:00Z", "", "")];
        let (records, _) = normalize_issues(&rows, now());
        assert_eq!(records[0].state, IssueState::Open);
        assert_eq!(records[0].end_date, now());
    }

    #[test]
    fn test_closed_issue_with_inverted_dates_corrected_to_one_day() {
        // end-before-start with state CLOSED becomes start + 1 day
        let rows = vec![issue_row("2024-01-01T00:00:00Z", "2023-12-30T00:00:00Z", "CLOSED")];
        let (records, _) = normalize_issues(&rows, now());
        let rec = &records[0];
        assert_eq!(
            rec.end_date,
            parse_timestamp("2024-01-02T00:00:00Z").unwrap()
        );
        assert_eq!(rec.duration_days, 1);
    }

    #[test]
    fn test_open_issue_with_inverted_dates_corrected_to_now() {
        let rows = vec![issue_row("2024-01-01T00:00:00Z", "2023-12-30T00:00:00Z", "open")];
        let (records, _) = normalize_issues(&rows, now());
        assert_eq!(records[0].end_date, now());
    }

    #[test]
    fn test_end_date_never_precedes_start_date() {
        let cases = [
            ("2024-01-01T00:00:00Z", "2023-12-30T00:00:00Z", "CLOSED"),
            ("2024-01-01T00:00:00Z", "2023-12-30T00:00:00Z", "open"),
            ("2024-01-01T00:00:00Z", "", "open"),
            ("2024-01-01T00:00:00Z", "2024-01-01T00:00:00Z", "CLOSED"),
        ];
        for (created, closed, state) in cases {
            let (records, _) = normalize_issues(&[issue_row(created, closed, state)], now());
            let rec = &records[0];
            assert!(rec.end_date >= rec.start_date, "case {created}/{closed}/{state}");
            assert!(rec.duration_days >= 0);
        }
    }

    #[test]
    fn test_state_defaults_open_and_case_normalizes() {
        assert_eq!(IssueState::from_raw(""), IssueState::Open);
        assert_eq!(IssueState::from_raw("Closed"), IssueState::Closed);
        assert_eq!(IssueState::from_raw("cLoSeD"), IssueState::Closed);
        assert_eq!(IssueState::from_raw("weird"), IssueState::Open);
    }

    #[test]
    fn test_split_contributors() {
        assert_eq!(split_contributors(""), Vec::<String>::new());
        assert_eq!(split_contributors(";;;"), Vec::<String>::new());
        assert_eq!(split_contributors("a;b;a;c"), vec!["a", "b", "c"]);
        assert_eq!(split_contributors("  spaced  ; names "), vec!["spaced", "names"]);
    }

    fn commit_row(created: &str, diff: &str) -> RawCommitRow {
        RawCommitRow {
            sha: "abc123".into(),
            message: "tweak".into(),
            created_date: created.into(),
            number_of_files_updated: "3".into(),
            diff: diff.into(),
            author: "alice".into(),
            repo_owner: "octo".into(),
            repo_name: "widgets".into(),
        }
    }

    #[test]
    fn test_commit_normalization_fields() {
        // 2024-01-15 is a Monday; weekday 0 = Sunday
        let rows = vec![commit_row("2024-01-15T09:30:00Z", "-50")];
        let (records, report) = normalize_commits(&rows);
        assert_eq!(report.kept, 1);
        let rec = &records[0];
        assert_eq!(rec.weekday, 1);
        assert_eq!(rec.hour, 9);
        assert_eq!(rec.month0, 0);
        assert_eq!(rec.year, 2024);
        assert_eq!(rec.diff, -50);
        assert_eq!(rec.files_changed, 3);
    }

    #[test]
    fn test_commit_invalid_date_excluded_entirely() {
        let rows = vec![
            commit_row("", "1"),
            commit_row("nope", "2"),
            commit_row("2024-01-15T09:30:00Z", "3"),
        ];
        let (records, report) = normalize_commits(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(report.dropped, 2);
        for rec in &records {
            assert!(rec.weekday <= 6);
            assert!(rec.hour <= 23);
        }
    }

    #[test]
    fn test_commit_lenient_numeric_cells() {
        let mut row = commit_row("2024-01-15T09:30:00Z", "");
        row.number_of_files_updated = "many".into();
        let (records, _) = normalize_commits(&[row]);
        assert_eq!(records[0].diff, 0);
        assert_eq!(records[0].files_changed, 0);
    }

    #[test]
    fn test_pr_normalization() {
        let rows = vec![
            RawPrRow {
                time_to_first_review_sec: "3600".into(),
                time_to_approval_sec: "".into(),
                time_to_merge_sec: "7200".into(),
                was_merged: "1".into(),
            },
            RawPrRow {
                time_to_first_review_sec: " ".into(),
                time_to_approval_sec: "120.5".into(),
                time_to_merge_sec: "".into(),
                was_merged: "true".into(),
            },
            RawPrRow {
                was_merged: "0".into(),
                ..Default::default()
            },
        ];
        let prs = normalize_prs(&rows);
        assert_eq!(prs[0].time_to_first_review_sec, Some(3600.0));
        assert_eq!(prs[0].time_to_approval_sec, None);
        assert!(prs[0].was_merged);
        assert_eq!(prs[1].time_to_approval_sec, Some(120.5));
        assert!(prs[1].was_merged);
        assert!(!prs[2].was_merged);
    }
}
