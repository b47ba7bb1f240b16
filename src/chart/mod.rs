//! Chart geometry. Each view has a pure `render` function that turns a
//! filtered or aggregated dataset plus a viewport into a `ChartModel` — the
//! renderer-agnostic intermediate of scales and drawable primitives. Painting
//! the model (see `crate::render`) is a separate step so the geometry stays
//! independently testable.

pub mod bar;
pub mod funnel;
pub mod gantt;
pub mod scale;
pub mod scatter;

use serde::Serialize;

use crate::interact::Tooltip;

/// The drawable area offered to a renderer. Heights are chart-determined
/// (fixed for scatter/bar/funnel, row-driven for the Gantt).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 960.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// One axis tick: an offset along the axis plus its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub offset: f64,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    pub ticks: Vec<Tick>,
    pub label: Option<String>,
    /// Rotate tick labels -45 degrees (long Gantt dates, author names).
    pub rotated_ticks: bool,
}

/// Shared chart frame: margins plus the inner plotting area the marks are
/// positioned in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub margin: Margin,
    pub inner_width: f64,
    pub inner_height: f64,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl Frame {
    pub fn outer_width(&self) -> f64 {
        self.inner_width + self.margin.left + self.margin.right
    }

    pub fn outer_height(&self) -> f64 {
        self.inner_height + self.margin.top + self.margin.bottom
    }
}

/// A rectangle mark (Gantt bars, author bars).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarMark {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub class: String,
    pub tooltip: Tooltip,
    pub href: Option<String>,
}

/// A circle mark (scatter points).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointMark {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub tooltip: Tooltip,
    pub href: Option<String>,
}

/// One labeled funnel segment. `points` run clockwise from the top-left
/// corner; the label is centered in the segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrapezoidMark {
    pub points: [(f64, f64); 4],
    pub fill: String,
    pub label: String,
    pub label_x: f64,
    pub label_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttModel {
    pub frame: Frame,
    pub bars: Vec<BarMark>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterModel {
    pub frame: Frame,
    pub points: Vec<PointMark>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarModel {
    pub frame: Frame,
    pub bars: Vec<BarMark>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelModel {
    pub width: f64,
    pub height: f64,
    pub segments: Vec<TrapezoidMark>,
}

/// The output of a chart renderer. `Empty` is an informational state, not an
/// error: the paint step shows its message instead of an empty plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartModel {
    Empty { message: String },
    Gantt(GanttModel),
    Scatter(ScatterModel),
    Bar(BarModel),
    Funnel(FunnelModel),
}

impl ChartModel {
    pub fn empty(message: impl Into<String>) -> Self {
        ChartModel::Empty { message: message.into() }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ChartModel::Empty { .. })
    }
}

/// Categorical fill palette for the funnel segments.
pub const SEGMENT_COLORS: [&str; 4] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728"];
