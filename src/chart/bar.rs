//! Per-author bar chart over the aggregator's descending totals.

use crate::aggregate::{AuthorTotal, Metric};
use crate::chart::scale::{BandScale, LinearScale};
use crate::chart::{Axis, BarMark, BarModel, ChartModel, Frame, Margin, Tick, Viewport};
use crate::interact::author_tooltip;

const MARGIN: Margin = Margin { top: 30.0, right: 30.0, bottom: 100.0, left: 60.0 };
const HEIGHT: f64 = 400.0;
const BAND_PADDING: f64 = 0.2;

pub fn render(totals: &[AuthorTotal], viewport: &Viewport, metric: Metric) -> ChartModel {
    if totals.is_empty() {
        return ChartModel::empty("No matching commits found for the selected filters.");
    }

    let inner_width = (viewport.width - MARGIN.left - MARGIN.right).max(100.0);
    let authors: Vec<String> = totals.iter().map(|t| t.author.clone()).collect();
    let bands = BandScale::new(authors, (0.0, inner_width), BAND_PADDING);

    let max_value = totals.iter().map(|t| t.value).max().unwrap_or(0).max(0) as f64;
    let values = LinearScale::new((0.0, max_value), (HEIGHT, 0.0)).nice(10);

    let bars: Vec<BarMark> = totals
        .iter()
        .filter_map(|total| {
            let x = bands.position(&total.author)?;
            let y = values.scale(total.value.max(0) as f64);
            Some(BarMark {
                x,
                y,
                width: bands.bandwidth(),
                height: (HEIGHT - y).max(0.0),
                class: "bar-rect".to_string(),
                tooltip: author_tooltip(total, metric),
                href: None,
            })
        })
        .collect();

    let x_axis = Axis {
        ticks: totals
            .iter()
            .filter_map(|t| {
                bands
                    .center(&t.author)
                    .map(|offset| Tick { offset, label: t.author.clone() })
            })
            .collect(),
        label: Some("Author".to_string()),
        rotated_ticks: true,
    };
    let y_axis = Axis {
        ticks: values
            .ticks(10)
            .into_iter()
            .map(|v| Tick {
                offset: values.scale(v),
                label: format!("{v}"),
            })
            .collect(),
        label: Some(metric.axis_label().to_string()),
        rotated_ticks: false,
    };

    ChartModel::Bar(BarModel {
        frame: Frame {
            margin: MARGIN,
            inner_width,
            inner_height: HEIGHT,
            x_axis,
            y_axis,
        },
        bars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(pairs: &[(&str, i64)]) -> Vec<AuthorTotal> {
        pairs
            .iter()
            .map(|(author, value)| AuthorTotal {
                author: (*author).to_string(),
                value: *value,
            })
            .collect()
    }

    #[test]
    fn test_empty_input_yields_empty_state() {
        assert!(render(&[], &Viewport::default(), Metric::Commits).is_empty());
    }

    #[test]
    fn test_bars_follow_aggregator_order() {
        let data = totals(&[("erin", 9), ("alice", 5), ("bob", 2)]);
        let ChartModel::Bar(model) = render(&data, &Viewport::default(), Metric::Commits) else {
            panic!("expected bar model");
        };
        let labels: Vec<&str> = model.frame.x_axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["erin", "alice", "bob"]);
        // Left-to-right positions follow the same order
        assert!(model.bars[0].x < model.bars[1].x);
        assert!(model.bars[1].x < model.bars[2].x);
    }

    #[test]
    fn test_bar_heights_proportional_to_values() {
        let data = totals(&[("a", 100), ("b", 50)]);
        let ChartModel::Bar(model) = render(&data, &Viewport::default(), Metric::Commits) else {
            panic!()
        };
        let tall = model.bars[0].height;
        let short = model.bars[1].height;
        assert!((tall - 2.0 * short).abs() < 1e-9);
        assert_eq!(model.bars[0].y + model.bars[0].height, 400.0);
    }

    #[test]
    fn test_axis_label_tracks_metric() {
        let data = totals(&[("a", 1)]);
        let ChartModel::Bar(model) = render(&data, &Viewport::default(), Metric::Lines) else {
            panic!()
        };
        assert_eq!(model.frame.y_axis.label.as_deref(), Some("Lines Changed"));
        let ChartModel::Bar(model) = render(&data, &Viewport::default(), Metric::Commits) else {
            panic!()
        };
        assert_eq!(model.frame.y_axis.label.as_deref(), Some("Number of Commits"));
        assert!(model.frame.x_axis.rotated_ticks);
    }

    #[test]
    fn test_negative_line_totals_do_not_break_geometry() {
        // A net-negative line delta clamps to a zero-height bar
        let data = totals(&[("a", 10), ("b", -5)]);
        let ChartModel::Bar(model) = render(&data, &Viewport::default(), Metric::Lines) else {
            panic!()
        };
        assert_eq!(model.bars[1].height, 0.0);
        for bar in &model.bars {
            assert!(bar.height >= 0.0);
        }
    }

    #[test]
    fn test_value_axis_is_niced() {
        let data = totals(&[("a", 87)]);
        let ChartModel::Bar(model) = render(&data, &Viewport::default(), Metric::Commits) else {
            panic!()
        };
        // Topmost tick sits at or above the max value on a round boundary
        let top = model
            .frame
            .y_axis
            .ticks
            .iter()
            .map(|t| t.label.parse::<f64>().unwrap())
            .fold(f64::MIN, f64::max);
        assert!(top >= 87.0);
        assert_eq!(top % 10.0, 0.0);
    }
}
