use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::records::CommitRecord;

static RE_MONTH_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})$").unwrap());

/// A month selection for the commit views.
///
/// Parsed from the month selector value: `"all"` selects everything,
/// otherwise a `"YYYY-MM"` key (month 1-indexed, zero-padded) selects one
/// calendar month. Stored zero-indexed to match `CommitRecord::month0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month {
        year: i32,
        month0: u8,
    },
}

impl MonthFilter {
    /// Parse a month selector value.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        let caps = RE_MONTH_KEY
            .captures(s)
            .ok_or_else(|| Error::MonthParse(format!("expected 'all' or YYYY-MM, got: {s}")))?;
        let year: i32 = caps[1].parse().unwrap();
        let month: u8 = caps[2].parse().unwrap();
        if !(1..=12).contains(&month) {
            return Err(Error::MonthParse(format!("month out of range: {s}")));
        }
        Ok(MonthFilter::Month {
            year,
            month0: month - 1,
        })
    }

    /// Whether a commit falls inside this selection. `All` short-circuits.
    pub fn matches(&self, commit: &CommitRecord) -> bool {
        match *self {
            MonthFilter::All => true,
            MonthFilter::Month { year, month0 } => {
                commit.year == year && commit.month0 == month0
            }
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MonthFilter::All => write!(f, "all"),
            MonthFilter::Month { year, month0 } => {
                write!(f, "{year}-{:02}", month0 as u32 + 1)
            }
        }
    }
}

/// One entry for a month selector, derived from the loaded commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthOption {
    /// `"YYYY-MM"`, month 1-indexed and zero-padded.
    pub key: String,
    /// `"<MonthName> <Year>"`, e.g. `"January 2024"`.
    pub label: String,
}
