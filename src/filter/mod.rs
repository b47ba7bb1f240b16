pub mod month;

pub use month::{MonthFilter, MonthOption};

use chrono::{DateTime, Utc};

use crate::date_util::month_name;
use crate::records::{CommitRecord, IssueRecord};

/// Builder for issue filters. All predicates are optional; an empty builder
/// passes every record through. Applying never mutates the base record set
/// and preserves its order.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    developer: Option<String>,
    task: Option<String>,
    start_after: Option<DateTime<Utc>>,
    start_before: Option<DateTime<Utc>>,
}

impl IssueFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match against any contributor name.
    pub fn developer(mut self, text: &str) -> Self {
        let text = text.trim();
        if !text.is_empty() {
            self.developer = Some(text.to_lowercase());
        }
        self
    }

    /// Case-insensitive substring match against the issue title.
    pub fn task(mut self, text: &str) -> Self {
        let text = text.trim();
        if !text.is_empty() {
            self.task = Some(text.to_lowercase());
        }
        self
    }

    /// Inclusive lower bound on the issue start date.
    pub fn start_after(mut self, bound: DateTime<Utc>) -> Self {
        self.start_after = Some(bound);
        self
    }

    /// Inclusive upper bound on the issue start date. Both date bounds apply
    /// to the start date: the range selects issues that *began* inside it.
    pub fn start_before(mut self, bound: DateTime<Utc>) -> Self {
        self.start_before = Some(bound);
        self
    }

    pub fn matches(&self, issue: &IssueRecord) -> bool {
        if let Some(ref dev) = self.developer {
            let any = issue
                .contributors
                .iter()
                .any(|c| c.to_lowercase().contains(dev));
            if !any {
                return false;
            }
        }
        if let Some(ref task) = self.task {
            if !issue.title.to_lowercase().contains(task) {
                return false;
            }
        }
        if let Some(bound) = self.start_after {
            if issue.start_date < bound {
                return false;
            }
        }
        if let Some(bound) = self.start_before {
            if issue.start_date > bound {
                return false;
            }
        }
        true
    }

    /// Order-preserving filtered subset. An empty result is a valid outcome.
    pub fn apply(&self, issues: &[IssueRecord]) -> Vec<IssueRecord> {
        issues.iter().filter(|i| self.matches(i)).cloned().collect()
    }
}

/// Builder for commit filters.
#[derive(Debug, Clone, Default)]
pub struct CommitFilter {
    month: MonthFilter,
}

impl CommitFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn month(mut self, month: MonthFilter) -> Self {
        self.month = month;
        self
    }

    pub fn matches(&self, commit: &CommitRecord) -> bool {
        self.month.matches(commit)
    }

    /// Order-preserving filtered subset.
    pub fn apply(&self, commits: &[CommitRecord]) -> Vec<CommitRecord> {
        commits.iter().filter(|c| self.matches(c)).cloned().collect()
    }
}

/// Collect the distinct calendar months present in the commits, ascending by
/// key, for month-selector population.
pub fn derive_available_months(commits: &[CommitRecord]) -> Vec<MonthOption> {
    let mut pairs: Vec<(i32, u8)> = Vec::new();
    for commit in commits {
        let pair = (commit.year, commit.month0);
        if !pairs.contains(&pair) {
            pairs.push(pair);
        }
    }
    pairs.sort_unstable();
    pairs
        .into_iter()
        .map(|(year, month0)| MonthOption {
            key: format!("{year}-{:02}", month0 as u32 + 1),
            label: format!("{} {year}", month_name(month0)),
        })
        .collect()
}
