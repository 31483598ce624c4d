//! Stable DTOs and IDs used across the storeguard workspace.
//!
//! Nothing in here evaluates anything:
//! - data types for the emitted report
//! - stable rule keys, env names and finding codes
//! - canonical project-relative path handling
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod path;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use path::RepoPath;
pub use receipt::{
    ArtifactsSeen, Finding, Location, ReportEnvelope, RuleResult, RuleStatus, SCHEMA_REPORT_V1,
    Severity, StoreguardData, StoreguardReport, ToolMeta, Verdict,
};
