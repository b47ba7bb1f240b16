//! Pull-request funnel: four stacked trapezoids whose widths track stage
//! counts, scaled against the first stage as 100% and centered horizontally.

use crate::aggregate::{format_duration, FunnelStage};
use crate::chart::scale::LinearScale;
use crate::chart::{ChartModel, FunnelModel, TrapezoidMark, SEGMENT_COLORS};

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 400.0;
const STAGE_HEIGHT: f64 = 80.0;
const MARGIN: f64 = 40.0;

pub fn render(stages: &[FunnelStage; 4]) -> ChartModel {
    if stages[0].count == 0 {
        return ChartModel::empty("No pull requests found.");
    }

    let widths = LinearScale::new((0.0, stages[0].count as f64), (0.0, WIDTH - 2.0 * MARGIN));

    let segments: Vec<TrapezoidMark> = stages
        .iter()
        .enumerate()
        .map(|(i, stage)| {
            let top_width = widths.scale(stage.count as f64);
            // The last segment has no successor and draws as a rectangle.
            let bottom_width = stages
                .get(i + 1)
                .map(|next| widths.scale(next.count as f64))
                .unwrap_or(top_width);
            let x0 = (WIDTH - top_width) / 2.0;
            let x1 = (WIDTH - bottom_width) / 2.0;
            let y0 = i as f64 * STAGE_HEIGHT + MARGIN;
            let y1 = (i + 1) as f64 * STAGE_HEIGHT + MARGIN;

            let mut label = format!("{}: {} PRs", stage.stage.as_str(), stage.count);
            if stage.avg_duration_sec.is_some() {
                label.push_str(&format!(
                    " | Avg: {}",
                    format_duration(stage.avg_duration_sec)
                ));
            }

            TrapezoidMark {
                points: [
                    (x0, y0),
                    (x0 + top_width, y0),
                    (x1 + bottom_width, y1),
                    (x1, y1),
                ],
                fill: SEGMENT_COLORS[i % SEGMENT_COLORS.len()].to_string(),
                label,
                label_x: WIDTH / 2.0,
                label_y: y0 + STAGE_HEIGHT / 2.0,
            }
        })
        .collect();

    ChartModel::Funnel(FunnelModel {
        width: WIDTH,
        height: HEIGHT,
        segments,
    })
}
