use std::fmt::Write;

use crate::chart::{
    BarMark, BarModel, ChartModel, Frame, FunnelModel, GanttModel, PointMark, ScatterModel,
    TrapezoidMark,
};
use crate::interact::Tooltip;
use crate::render::xml_escape;

/// Paint a chart model. Plot variants become an `<svg>` element; the empty
/// state becomes an informational paragraph for the chart region.
pub fn paint(model: &ChartModel) -> String {
    match model {
        ChartModel::Empty { message } => {
            format!(r#"<p class="chart-empty">{}</p>"#, xml_escape(message))
        }
        ChartModel::Gantt(m) => paint_gantt(m),
        ChartModel::Scatter(m) => paint_scatter(m),
        ChartModel::Bar(m) => paint_bar(m),
        ChartModel::Funnel(m) => paint_funnel(m),
    }
}

fn paint_gantt(model: &GanttModel) -> String {
    framed_svg(&model.frame, |out| {
        for bar in &model.bars {
            push_bar(out, bar);
        }
    })
}

fn paint_scatter(model: &ScatterModel) -> String {
    framed_svg(&model.frame, |out| {
        for point in &model.points {
            push_point(out, point);
        }
    })
}

fn paint_bar(model: &BarModel) -> String {
    framed_svg(&model.frame, |out| {
        for bar in &model.bars {
            push_bar(out, bar);
        }
    })
}

fn paint_funnel(model: &FunnelModel) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg class="chart" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        model.width, model.height, model.width, model.height
    );
    out.push('\n');
    for segment in &model.segments {
        push_trapezoid(&mut out, segment);
    }
    out.push_str("</svg>\n");
    out
}

/// Shared scaffolding for the axis-framed charts: outer svg, translated
/// plot group, both axes, then the chart's marks.
fn framed_svg(frame: &Frame, marks: impl FnOnce(&mut String)) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg class="chart" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        frame.outer_width(),
        frame.outer_height(),
        frame.outer_width(),
        frame.outer_height()
    );
    out.push('\n');
    let _ = writeln!(
        out,
        r#"<g transform="translate({},{})">"#,
        frame.margin.left, frame.margin.top
    );

    push_x_axis(&mut out, frame);
    push_y_axis(&mut out, frame);
    marks(&mut out);

    out.push_str("</g>\n</svg>\n");
    out
}

fn push_x_axis(out: &mut String, frame: &Frame) {
    let axis = &frame.x_axis;
    let y = frame.inner_height;
    let _ = writeln!(
        out,
        r#"<g class="x axis"><line x1="0" y1="{y}" x2="{}" y2="{y}"/>"#,
        frame.inner_width
    );
    for tick in &axis.ticks {
        let label = xml_escape(&tick.label);
        if axis.rotated_ticks {
            let _ = writeln!(
                out,
                r#"<text x="0" y="0" transform="translate({},{}) rotate(-45)" text-anchor="end">{label}</text>"#,
                tick.offset,
                y + 12.0
            );
        } else {
            let _ = writeln!(
                out,
                r#"<text x="{}" y="{}" text-anchor="middle">{label}</text>"#,
                tick.offset,
                y + 16.0
            );
        }
    }
    if let Some(ref label) = axis.label {
        let _ = writeln!(
            out,
            r#"<text class="axis-label" x="{}" y="{}" text-anchor="middle">{}</text>"#,
            frame.inner_width / 2.0,
            y + frame.margin.bottom - 10.0,
            xml_escape(label)
        );
    }
    out.push_str("</g>\n");
}

fn push_y_axis(out: &mut String, frame: &Frame) {
    let axis = &frame.y_axis;
    let _ = writeln!(
        out,
        r#"<g class="y axis"><line x1="0" y1="0" x2="0" y2="{}"/>"#,
        frame.inner_height
    );
    for tick in &axis.ticks {
        let _ = writeln!(
            out,
            r#"<text x="-8" y="{}" text-anchor="end" dominant-baseline="middle">{}</text>"#,
            tick.offset,
            xml_escape(&tick.label)
        );
    }
    if let Some(ref label) = axis.label {
        let _ = writeln!(
            out,
            r#"<text class="axis-label" transform="rotate(-90)" x="{}" y="{}" text-anchor="middle">{}</text>"#,
            -frame.inner_height / 2.0,
            -frame.margin.left + 14.0,
            xml_escape(label)
        );
    }
    out.push_str("</g>\n");
}

fn push_bar(out: &mut String, bar: &BarMark) {
    let opened = open_link(out, &bar.href);
    let _ = write!(
        out,
        r#"<rect class="{}" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}">"#,
        xml_escape(&bar.class),
        bar.x,
        bar.y,
        bar.width,
        bar.height
    );
    push_title(out, &bar.tooltip);
    out.push_str("</rect>");
    close_link(out, opened);
    out.push('\n');
}

fn push_point(out: &mut String, point: &PointMark) {
    let opened = open_link(out, &point.href);
    let _ = write!(
        out,
        r#"<circle class="scatter-dot" cx="{:.2}" cy="{:.2}" r="{}">"#,
        point.cx, point.cy, point.r
    );
    push_title(out, &point.tooltip);
    out.push_str("</circle>");
    close_link(out, opened);
    out.push('\n');
}

fn push_trapezoid(out: &mut String, segment: &TrapezoidMark) {
    let path = segment
        .points
        .iter()
        .enumerate()
        .map(|(i, (x, y))| {
            let cmd = if i == 0 { 'M' } else { 'L' };
            format!("{cmd}{x:.2},{y:.2}")
        })
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(
        out,
        r##"<path class="funnel-segment" d="{path} Z" fill="{}" stroke="#333" opacity="0.85"/>"##,
        segment.fill
    );
    let _ = writeln!(
        out,
        r##"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="middle" font-size="18" fill="#fff">{}</text>"##,
        segment.label_x,
        segment.label_y,
        xml_escape(&segment.label)
    );
}

/// Hover payloads ride along as SVG `<title>` elements, the native tooltip.
fn push_title(out: &mut String, tooltip: &Tooltip) {
    if tooltip.fields.is_empty() {
        return;
    }
    let _ = write!(out, "<title>{}</title>", xml_escape(&tooltip.to_text()));
}

fn open_link(out: &mut String, href: &Option<String>) -> bool {
    match href {
        Some(href) => {
            let _ = write!(
                out,
                r#"<a href="{}" target="_blank" rel="noopener">"#,
                xml_escape(href)
            );
            true
        }
        None => false,
    }
}

fn close_link(out: &mut String, opened: bool) {
    if opened {
        out.push_str("</a>");
    }
}
