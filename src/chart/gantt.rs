//! Gantt-style issue timeline: one horizontal band per issue over a niced
//! time axis, bars colored by state and linked to the external issue page.

use crate::chart::scale::{BandScale, TimeScale};
use crate::chart::{Axis, BarMark, ChartModel, Frame, GanttModel, Margin, Tick, Viewport};
use crate::interact::issue_tooltip;
use crate::links::issue_link;
use crate::records::{IssueRecord, IssueState};

const MARGIN: Margin = Margin { top: 30.0, right: 30.0, bottom: 70.0, left: 150.0 };
const MIN_HEIGHT: f64 = 400.0;
const ROW_HEIGHT: f64 = 25.0;
const BAND_PADDING: f64 = 0.2;
/// Bars never collapse below one pixel, so zero-duration issues stay visible.
const MIN_BAR_WIDTH: f64 = 1.0;

pub fn render(issues: &[IssueRecord], viewport: &Viewport) -> ChartModel {
    if issues.is_empty() {
        return ChartModel::empty("No matching issues found for the selected filters.");
    }

    let mut rows: Vec<&IssueRecord> = issues.iter().collect();
    // Stable sort keeps the input order for issues starting at the same time.
    rows.sort_by_key(|i| i.start_date);

    let inner_width = (viewport.width - MARGIN.left - MARGIN.right).max(100.0);
    let inner_height = MIN_HEIGHT.max(rows.len() as f64 * ROW_HEIGHT);

    let min_start = rows.iter().map(|i| i.start_date).min().unwrap_or_default();
    let max_end = rows.iter().map(|i| i.end_date).max().unwrap_or_default();
    let time = TimeScale::new((min_start, max_end), (0.0, inner_width)).nice();

    let keys: Vec<String> = rows.iter().map(|i| format!("Issue {}", i.number)).collect();
    let bands = BandScale::new(keys.clone(), (0.0, inner_height), BAND_PADDING);

    let bars: Vec<BarMark> = rows
        .iter()
        .zip(&keys)
        .filter_map(|(issue, key)| {
            let x = time.scale(issue.start_date);
            let width = (time.scale(issue.end_date) - x).max(MIN_BAR_WIDTH);
            let y = bands.position(key)?;
            let class = match issue.state {
                IssueState::Open => "gantt-rect state-open",
                IssueState::Closed => "gantt-rect state-closed",
            };
            Some(BarMark {
                x,
                y,
                width,
                height: bands.bandwidth(),
                class: class.to_string(),
                tooltip: issue_tooltip(issue),
                href: issue_link(issue),
            })
        })
        .collect();

    let x_axis = Axis {
        ticks: time
            .month_ticks()
            .into_iter()
            .map(|t| Tick {
                offset: time.scale(t),
                label: t.format("%Y-%m-%d").to_string(),
            })
            .collect(),
        label: None,
        rotated_ticks: true,
    };
    let y_axis = Axis {
        ticks: keys
            .iter()
            .filter_map(|key| {
                bands.center(key).map(|offset| Tick { offset, label: key.clone() })
            })
            .collect(),
        label: None,
        rotated_ticks: false,
    };

    ChartModel::Gantt(GanttModel {
        frame: Frame {
            margin: MARGIN,
            inner_width,
            inner_height,
            x_axis,
            y_axis,
        },
        bars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_util::parse_timestamp;
    use crate::records::{normalize_issues, RawIssueRow};

    fn issue(number: &str, created: &str, closed: &str) -> RawIssueRow {
        RawIssueRow {
            issue_id: number.into(),
            issue_number: number.into(),
            title: format!("Task {number}"),
            state: "closed".into(),
            created_date: created.into(),
            closed_date: closed.into(),
            contributors: "alice".into(),
            repo_owner: "octo".into(),
            repo_name: "widgets".into(),
        }
    }

    fn records(rows: Vec<RawIssueRow>) -> Vec<IssueRecord> {
        let now = parse_timestamp("2024-06-01T00:00:00Z").unwrap();
        normalize_issues(&rows, now).0
    }

    #[test]
    fn test_empty_input_yields_empty_state() {
        let model = render(&[], &Viewport::default());
        assert!(model.is_empty());
    }

    #[test]
    fn test_rows_ordered_by_start_date() {
        let data = records(vec![
            issue("2", "2024-02-01T00:00:00Z", "2024-02-10T00:00:00Z"),
            issue("1", "2024-01-01T00:00:00Z", "2024-01-10T00:00:00Z"),
        ]);
        let ChartModel::Gantt(model) = render(&data, &Viewport::default()) else {
            panic!("expected gantt model");
        };
        let labels: Vec<&str> = model.frame.y_axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Issue 1", "Issue 2"]);
        // Bars follow the same ordering top to bottom
        assert!(model.bars[0].y < model.bars[1].y);
    }

    #[test]
    fn test_zero_duration_bar_keeps_minimum_width() {
        let data = records(vec![issue(
            "1",
            "2024-01-05T12:00:00Z",
            "2024-01-05T12:00:00Z",
        )]);
        let ChartModel::Gantt(model) = render(&data, &Viewport::default()) else {
            panic!("expected gantt model");
        };
        assert!(model.bars[0].width >= 1.0);
    }

    #[test]
    fn test_height_grows_with_row_count() {
        let few = records(vec![issue("1", "2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z")]);
        let many: Vec<IssueRecord> = (0..30)
            .map(|n| {
                records(vec![issue(
                    &n.to_string(),
                    "2024-01-01T00:00:00Z",
                    "2024-01-02T00:00:00Z",
                )])
                .remove(0)
            })
            .collect();
        let ChartModel::Gantt(small) = render(&few, &Viewport::default()) else {
            panic!()
        };
        let ChartModel::Gantt(large) = render(&many, &Viewport::default()) else {
            panic!()
        };
        assert_eq!(small.frame.inner_height, 400.0);
        assert_eq!(large.frame.inner_height, 750.0);
    }

    #[test]
    fn test_bars_carry_links_and_tooltips() {
        let data = records(vec![issue("7", "2024-01-01T00:00:00Z", "2024-01-05T00:00:00Z")]);
        let ChartModel::Gantt(model) = render(&data, &Viewport::default()) else {
            panic!()
        };
        let bar = &model.bars[0];
        assert_eq!(
            bar.href.as_deref(),
            Some("https://github.com/octo/widgets/issues/7")
        );
        assert!(bar.tooltip.to_text().contains("Issue #: 7"));
        assert_eq!(bar.class, "gantt-rect state-closed");
    }

    #[test]
    fn test_time_axis_is_niced_and_bars_fit() {
        let data = records(vec![
            issue("1", "2024-01-10T13:30:00Z", "2024-03-20T07:00:00Z"),
            issue("2", "2024-02-01T00:00:00Z", "2024-02-15T00:00:00Z"),
        ]);
        let ChartModel::Gantt(model) = render(&data, &Viewport::default()) else {
            panic!()
        };
        for bar in &model.bars {
            assert!(bar.x >= 0.0);
            assert!(bar.x + bar.width <= model.frame.inner_width + 1e-6);
        }
        assert!(!model.frame.x_axis.ticks.is_empty());
        assert!(model.frame.x_axis.rotated_ticks);
    }
}
