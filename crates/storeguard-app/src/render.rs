//! Render use cases: Markdown and GitHub annotations from in-memory reports.

use storeguard_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    storeguard_render::render_markdown(report)
}

/// At most `max` annotations; GitHub drops the excess anyway.
pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    storeguard_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}
