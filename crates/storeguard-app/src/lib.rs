//! Use case orchestration for storeguard.
//!
//! Coordinates the settings, repo, domain and render layers. The CLI crate depends on
//! this and only handles argument parsing, files and exit codes.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod render;
mod report;
mod rules;

pub use check::{CheckInput, CheckOutput, run_check, verdict_exit_code};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use render::{render_annotations, render_markdown};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
pub use rules::{RuleInfo, list_rules};
