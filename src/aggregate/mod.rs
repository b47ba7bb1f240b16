pub mod types;

pub use types::*;

use std::collections::HashMap;

use crate::records::{CommitRecord, PrRecord};

/// Group commits by author and total the selected metric per group.
///
/// The result is sorted descending by value; ties keep the order in which
/// authors were first seen in the input (stable sort over insertion-ordered
/// groups).
pub fn by_author(commits: &[CommitRecord], metric: Metric) -> Vec<AuthorTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<AuthorTotal> = Vec::new();

    for commit in commits {
        let slot = match index.get(commit.author.as_str()) {
            Some(&i) => i,
            None => {
                index.insert(commit.author.as_str(), totals.len());
                totals.push(AuthorTotal {
                    author: commit.author.clone(),
                    value: 0,
                });
                totals.len() - 1
            }
        };
        totals[slot].value += match metric {
            Metric::Commits => 1,
            Metric::Lines => commit.diff,
        };
    }

    totals.sort_by(|a, b| b.value.cmp(&a.value));
    totals
}

/// Derive the four-stage pull-request funnel.
///
/// Stage counts: Created = all records; Reviewed / Approved = records whose
/// respective timing field is present; Merged = records with a truthy merged
/// flag. Each stage's average covers the members of that stage that carry
/// the relevant duration, or `None` when there are none. (The merged stage
/// averages only members with a parseable merge duration rather than letting
/// absent values poison the mean.)
pub fn funnel(prs: &[PrRecord]) -> [FunnelStage; 4] {
    let review_durations: Vec<f64> = prs
        .iter()
        .filter_map(|p| p.time_to_first_review_sec)
        .collect();
    let approval_durations: Vec<f64> = prs
        .iter()
        .filter_map(|p| p.time_to_approval_sec)
        .collect();
    let merged: Vec<&PrRecord> = prs.iter().filter(|p| p.was_merged).collect();
    let merge_durations: Vec<f64> = merged
        .iter()
        .filter_map(|p| p.time_to_merge_sec)
        .collect();

    [
        FunnelStage {
            stage: StageName::Created,
            count: prs.len(),
            avg_duration_sec: None,
        },
        FunnelStage {
            stage: StageName::Reviewed,
            count: review_durations.len(),
            avg_duration_sec: mean(&review_durations),
        },
        FunnelStage {
            stage: StageName::Approved,
            count: approval_durations.len(),
            avg_duration_sec: mean(&approval_durations),
        },
        FunnelStage {
            stage: StageName::Merged,
            count: merged.len(),
            avg_duration_sec: mean(&merge_durations),
        },
    ]
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Human-readable duration: seconds below a minute, then minutes, hours and
/// days with one decimal. `None` renders as `"N/A"`.
pub fn format_duration(sec: Option<f64>) -> String {
    let Some(sec) = sec else {
        return "N/A".to_string();
    };
    if sec < 60.0 {
        format!("{sec}s")
    } else if sec < 3600.0 {
        format!("{:.1} min", sec / 60.0)
    } else if sec < 86400.0 {
        format!("{:.1} hr", sec / 3600.0)
    } else {
        format!("{:.1} d", sec / 86400.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{normalize_commits, RawCommitRow};

    fn commits(specs: &[(&str, &str)]) -> Vec<CommitRecord> {
        let rows: Vec<RawCommitRow> = specs
            .iter()
            .map(|(author, diff)| RawCommitRow {
                sha: "s".into(),
                created_date: "2024-01-15T09:30:00Z".into(),
                diff: (*diff).into(),
                author: (*author).into(),
                ..Default::default()
            })
            .collect();
        normalize_commits(&rows).0
    }

    #[test]
    fn test_by_author_commit_counts() {
        let all = commits(&[("alice", "1"), ("bob", "1"), ("alice", "1")]);
        let totals = by_author(&all, Metric::Commits);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].author, "alice");
        assert_eq!(totals[0].value, 2);
        assert_eq!(totals[1].value, 1);
        // Sum of counts equals the input size
        let sum: i64 = totals.iter().map(|t| t.value).sum();
        assert_eq!(sum as usize, all.len());
    }

    #[test]
    fn test_by_author_line_delta_sums_signed() {
        // Three commits from alice with diffs -50, 20, 30 sum to zero
        let all = commits(&[("alice", "-50"), ("alice", "20"), ("alice", "30")]);
        let totals = by_author(&all, Metric::Lines);
        assert_eq!(totals, vec![AuthorTotal { author: "alice".into(), value: 0 }]);
    }

    #[test]
    fn test_by_author_sorted_descending_ties_stable() {
        let all = commits(&[("carol", "5"), ("dave", "5"), ("erin", "9")]);
        let totals = by_author(&all, Metric::Lines);
        assert_eq!(totals[0].author, "erin");
        // carol was discovered before dave; the tie keeps that order
        assert_eq!(totals[1].author, "carol");
        assert_eq!(totals[2].author, "dave");
    }

    #[test]
    fn test_by_author_empty() {
        assert!(by_author(&[], Metric::Commits).is_empty());
    }

    fn pr(review: Option<f64>, approval: Option<f64>, merge: Option<f64>, merged: bool) -> PrRecord {
        PrRecord {
            time_to_first_review_sec: review,
            time_to_approval_sec: approval,
            time_to_merge_sec: merge,
            was_merged: merged,
        }
    }

    #[test]
    fn test_funnel_counts_and_averages() {
        // 10 total, 6 reviewed averaging 3600s
        let mut prs: Vec<PrRecord> = (0..6)
            .map(|_| pr(Some(3600.0), None, None, false))
            .collect();
        prs.extend((0..4).map(|_| pr(None, None, None, false)));
        let stages = funnel(&prs);
        assert_eq!(stages[0].count, 10);
        assert_eq!(stages[0].stage, StageName::Created);
        assert_eq!(stages[1].count, 6);
        assert_eq!(stages[1].avg_duration_sec, Some(3600.0));
        assert_eq!(format_duration(stages[1].avg_duration_sec), "1.0 hr");
        assert_eq!(stages[2].count, 0);
        assert_eq!(stages[2].avg_duration_sec, None);
        assert_eq!(stages[3].count, 0);
    }

    #[test]
    fn test_funnel_stage_zero_is_total() {
        let prs = vec![pr(None, None, None, false); 7];
        assert_eq!(funnel(&prs)[0].count, 7);
    }

    #[test]
    fn test_funnel_merged_average_skips_missing_durations() {
        // Two merged PRs, only one carries a merge duration. The average is
        // taken over the single present value instead of being undefined.
        let prs = vec![
            pr(None, None, Some(120.0), true),
            pr(None, None, None, true),
            pr(None, None, Some(999.0), false),
        ];
        let stages = funnel(&prs);
        assert_eq!(stages[3].count, 2);
        assert_eq!(stages[3].avg_duration_sec, Some(120.0));
    }

    #[test]
    fn test_funnel_merged_all_durations_missing_is_null() {
        let prs = vec![pr(None, None, None, true), pr(None, None, None, true)];
        let stages = funnel(&prs);
        assert_eq!(stages[3].count, 2);
        assert_eq!(stages[3].avg_duration_sec, None);
    }

    #[test]
    fn test_funnel_empty_input() {
        let stages = funnel(&[]);
        assert_eq!(stages[0].count, 0);
        for stage in &stages {
            assert!(stage.avg_duration_sec.is_none());
        }
    }

    #[test]
    fn test_format_duration_brackets() {
        assert_eq!(format_duration(None), "N/A");
        assert_eq!(format_duration(Some(45.0)), "45s");
        assert_eq!(format_duration(Some(45.5)), "45.5s");
        assert_eq!(format_duration(Some(90.0)), "1.5 min");
        assert_eq!(format_duration(Some(3600.0)), "1.0 hr");
        assert_eq!(format_duration(Some(5400.0)), "1.5 hr");
        assert_eq!(format_duration(Some(172800.0)), "2.0 d");
    }
}
