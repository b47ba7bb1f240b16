//! The apply/paint step: turns `ChartModel`s into SVG markup and assembles
//! the standalone dashboard page. No geometry is computed here.

pub mod page;
pub mod svg;

pub use page::{error_page, render_page, ChartSection};
pub use svg::paint;

/// Escape text for embedding in SVG/HTML content and attributes.
pub fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
