use std::fmt::Write;

use crate::render::xml_escape;

/// One chart region of the dashboard: a heading plus painted body markup
/// (an `<svg>`, an empty-state paragraph, or an error paragraph).
#[derive(Debug, Clone)]
pub struct ChartSection {
    pub heading: String,
    pub body: String,
}

impl ChartSection {
    pub fn new(heading: &str, body: String) -> Self {
        Self { heading: heading.to_string(), body }
    }
}

/// Assemble the standalone dashboard page. Everything is inlined so the
/// output is a single self-contained file; tooltips and links live inside
/// the SVG, so no scripting is required.
pub fn render_page(title: &str, sections: &[ChartSection]) -> String {
    let mut body = String::new();
    for section in sections {
        let _ = writeln!(
            body,
            r#"        <section class="chart-region">
            <h2>{}</h2>
{}
        </section>"#,
            xml_escape(&section.heading),
            section.body
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <div class="dashboard">
        <h1>{title}</h1>
{body}    </div>
</body>
</html>
"#,
        title = xml_escape(title),
        css = PAGE_CSS,
        body = body,
    )
}

/// Page shown when the datasets fail to load: the same error message fills
/// every chart region.
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(r#"<p class="chart-error">{}</p>"#, xml_escape(message));
    let sections: Vec<ChartSection> = [
        "Issue Timeline",
        "Commit Activity",
        "Author Totals",
        "Pull Request Funnel",
    ]
    .iter()
    .map(|heading| ChartSection::new(heading, body.clone()))
    .collect();
    render_page(title, &sections)
}

const PAGE_CSS: &str = r#"        body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; background: #f7f7f9; color: #222; }
        .dashboard { max-width: 1100px; margin: 0 auto; padding: 24px; }
        .chart-region { background: #fff; border: 1px solid #ddd; border-radius: 6px; padding: 16px; margin-bottom: 24px; overflow-x: auto; }
        .chart-region h2 { margin-top: 0; font-size: 1.1em; }
        .chart text { font-size: 11px; fill: #333; }
        .chart .axis line { stroke: #333; }
        .chart .axis-label { font-size: 12px; font-weight: 600; }
        .state-open { fill: #2ca02c; }
        .state-closed { fill: #7f7f7f; }
        .gantt-rect:hover, .bar-rect:hover { opacity: 0.8; }
        .bar-rect { fill: #1f77b4; }
        .scatter-dot { fill: #1f77b4; opacity: 0.6; }
        .scatter-dot:hover { opacity: 1; }
        .funnel-segment:hover { opacity: 1; }
        .chart-empty { color: #31708f; text-align: center; padding: 40px 0; }
        .chart-error { color: #a94442; text-align: center; padding: 40px 0; }"#;
