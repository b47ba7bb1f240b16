use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// The quantity charted per author in the bar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Metric {
    #[default]
    Commits,
    Lines,
}

impl Metric {
    /// Y-axis label for the bar chart.
    pub fn axis_label(&self) -> &'static str {
        match self {
            Metric::Commits => "Number of Commits",
            Metric::Lines => "Lines Changed",
        }
    }

    /// Tooltip key for the value row.
    pub fn tooltip_label(&self) -> &'static str {
        match self {
            Metric::Commits => "Commits",
            Metric::Lines => "Lines Changed",
        }
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "commits" => Ok(Metric::Commits),
            "lines" => Ok(Metric::Lines),
            other => Err(Error::MetricParse(format!(
                "expected 'commits' or 'lines', got: {other}"
            ))),
        }
    }
}

/// One bar in the per-author chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorTotal {
    pub author: String,
    /// Commit count or summed line delta, per the selected metric. Line
    /// deltas are signed, so this can be negative.
    pub value: i64,
}

/// The four ordered funnel stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StageName {
    Created,
    Reviewed,
    Approved,
    Merged,
}

impl StageName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageName::Created => "Created",
            StageName::Reviewed => "Reviewed",
            StageName::Approved => "Approved",
            StageName::Merged => "Merged",
        }
    }
}

/// One stage of the pull-request funnel.
#[derive(Debug, Clone, Serialize)]
pub struct FunnelStage {
    pub stage: StageName,
    pub count: usize,
    /// Mean duration in seconds for records that reached this stage, or
    /// `None` when the stage is empty or no member carries a duration.
    pub avg_duration_sec: Option<f64>,
}
