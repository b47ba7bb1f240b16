//! Hover-tooltip content, decoupled from chart geometry. A tooltip is an
//! ordered list of key/value pairs; the paint step decides how to display it
//! (the SVG output embeds it as a `<title>` payload).

use serde::Serialize;

use crate::aggregate::{AuthorTotal, Metric};
use crate::records::{CommitRecord, IssueRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub fields: Vec<(String, String)>,
}

impl Tooltip {
    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.fields.push((key.to_string(), value.into()));
    }

    /// Single-string form, one `key: value` per line.
    pub fn to_text(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Tooltip for a Gantt bar.
pub fn issue_tooltip(issue: &IssueRecord) -> Tooltip {
    let mut tip = Tooltip::default();
    tip.push("Task", &issue.title);
    tip.push("Issue #", issue.number.to_string());
    tip.push("State", issue.state.as_str());
    tip.push("Start", issue.start_date.format("%Y-%m-%d").to_string());
    tip.push("End", issue.end_date.format("%Y-%m-%d").to_string());
    let contributors = if issue.contributors.is_empty() {
        "N/A".to_string()
    } else {
        issue.contributors.join(", ")
    };
    tip.push("Contributors", contributors);
    tip
}

/// Tooltip for a scatter point.
pub fn commit_tooltip(commit: &CommitRecord) -> Tooltip {
    let mut tip = Tooltip::default();
    tip.push("Author", &commit.author);
    tip.push("Date", commit.date.format("%Y-%m-%d %H:%M").to_string());
    tip.push("Message", &commit.message);
    tip
}

/// Tooltip for an author bar.
pub fn author_tooltip(total: &AuthorTotal, metric: Metric) -> Tooltip {
    let mut tip = Tooltip::default();
    tip.push("Author", &total.author);
    tip.push(metric.tooltip_label(), total.value.to_string());
    tip
}
