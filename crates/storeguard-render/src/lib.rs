//! Rendering for CI surfaces: Markdown summaries and GitHub Actions annotations.
//!
//! Renderers take a [`RenderableReport`] rather than the report DTOs, so the wire format
//! can evolve without touching presentation.

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport,
    RenderableRuleResult, RenderableRuleStatus, RenderableSeverity, RenderableVerdictStatus,
};
