//! Commit scatter plot: weekday bands across the x-axis, hour of day on a
//! fixed 0-24 y-axis. Points get a sub-hour vertical jitter to reduce
//! overplotting.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::chart::scale::{BandScale, LinearScale};
use crate::chart::{Axis, ChartModel, Frame, Margin, PointMark, ScatterModel, Tick, Viewport};
use crate::date_util::weekday_name;
use crate::interact::commit_tooltip;
use crate::links::commit_link;
use crate::records::CommitRecord;

const MARGIN: Margin = Margin { top: 30.0, right: 30.0, bottom: 50.0, left: 60.0 };
const HEIGHT: f64 = 400.0;
const BAND_PADDING: f64 = 0.1;
const POINT_RADIUS: f64 = 5.0;

/// Scatter options. With a seed the jitter (and therefore the geometry) is
/// reproducible; without one each render draws fresh jitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScatterConfig {
    pub seed: Option<u64>,
}

pub fn render(commits: &[CommitRecord], viewport: &Viewport, config: &ScatterConfig) -> ChartModel {
    if commits.is_empty() {
        return ChartModel::empty("No matching commits found for the selected filters.");
    }

    let inner_width = (viewport.width - MARGIN.left - MARGIN.right).max(100.0);
    let weekdays: Vec<String> = (0..7).map(|d| weekday_name(d).to_string()).collect();
    let bands = BandScale::new(weekdays.clone(), (0.0, inner_width), BAND_PADDING);
    // 24-hour domain, inverted for the SVG coordinate system.
    let hours = LinearScale::new((0.0, 24.0), (HEIGHT, 0.0));

    let mut rng: StdRng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let points: Vec<PointMark> = commits
        .iter()
        .filter_map(|commit| {
            let cx = bands.center(weekday_name(commit.weekday))?;
            let jitter: f64 = rng.gen_range(0.0..1.0);
            Some(PointMark {
                cx,
                cy: hours.scale(commit.hour as f64 + jitter),
                r: POINT_RADIUS,
                tooltip: commit_tooltip(commit),
                href: commit_link(commit),
            })
        })
        .collect();

    let x_axis = Axis {
        ticks: weekdays
            .iter()
            .filter_map(|day| {
                bands.center(day).map(|offset| Tick { offset, label: day.clone() })
            })
            .collect(),
        label: Some("Day of Week".to_string()),
        rotated_ticks: false,
    };
    let y_axis = Axis {
        ticks: hours
            .ticks(12)
            .into_iter()
            .map(|h| Tick {
                offset: hours.scale(h),
                label: format!("{h}:00"),
            })
            .collect(),
        label: Some("Time of Day (Hour)".to_string()),
        rotated_ticks: false,
    };

    ChartModel::Scatter(ScatterModel {
        frame: Frame {
            margin: MARGIN,
            inner_width,
            inner_height: HEIGHT,
            x_axis,
            y_axis,
        },
        points,
    })
}
