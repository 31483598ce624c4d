use crate::RepoPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for storeguard reports.
pub const SCHEMA_REPORT_V1: &str = "storeguard.report.v1";

/// Severity maps cleanly to CI signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub path: RepoPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<u32>,
}

impl Location {
    /// A location pointing at a whole file.
    pub fn file(path: RepoPath) -> Self {
        Self {
            path,
            line: None,
            col: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    /// Rule key (or `tool.runtime` for tool failures).
    pub check_id: String,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Stable identifier for dedup and trending: a hash of
    /// `check_id + code + location path`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    /// Rule-specific structured payload.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

/// Outcome of one registered rule in a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Passed,
    Failed,
    /// Disabled by profile, config or environment.
    Skipped,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleResult {
    pub key: String,
    pub friendly_name: String,
    pub status: RuleStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Project artifacts the run found (project-relative).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ArtifactsSeen {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_config: Option<RepoPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_manifest: Option<RepoPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entitlements: Option<RepoPath>,
}

/// Storeguard-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct StoreguardData {
    pub profile: String,
    pub rules_evaluated: u32,
    pub rules_skipped: u32,
    pub findings_total: u32,
    pub findings_emitted: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated_reason: Option<String>,
    #[serde(default)]
    pub artifacts: ArtifactsSeen,
}

/// Report envelope.
///
/// Generic over the payload so the outer shape stays stable while `data` evolves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = StoreguardData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    #[serde(default)]
    pub rules: Vec<RuleResult>,
    pub findings: Vec<Finding>,
    pub data: TData,
}

pub type StoreguardReport = ReportEnvelope<StoreguardData>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn report_serializes_lowercase_enums_and_skips_empty_fields() {
        let report = StoreguardReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "storeguard".to_string(),
                version: "0.1.0".to_string(),
            },
            started_at: datetime!(2026-01-01 00:00:00 UTC),
            finished_at: datetime!(2026-01-01 00:00:01 UTC),
            verdict: Verdict::Fail,
            rules: vec![RuleResult {
                key: "verify_firebase_dynamic_links".to_string(),
                friendly_name: "Firebase Dynamic Links are valid or not in use".to_string(),
                status: RuleStatus::Failed,
            }],
            findings: vec![Finding {
                severity: Severity::Error,
                check_id: "verify_firebase_dynamic_links".to_string(),
                code: "missing_entitlements".to_string(),
                message: "missing".to_string(),
                location: None,
                help: None,
                url: None,
                fingerprint: None,
                data: JsonValue::Null,
            }],
            data: StoreguardData::default(),
        };

        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(value["verdict"], json!("fail"));
        assert_eq!(value["rules"][0]["status"], json!("failed"));
        assert_eq!(value["findings"][0]["severity"], json!("error"));
        assert!(value["findings"][0].get("location").is_none());
        assert!(value["findings"][0].get("data").is_none());
        assert_eq!(value["started_at"], json!("2026-01-01T00:00:00Z"));
    }

    #[test]
    fn report_without_rules_field_still_parses() {
        let text = r#"{
            "schema": "storeguard.report.v1",
            "tool": {"name": "storeguard", "version": "0.1.0"},
            "started_at": "2026-01-01T00:00:00Z",
            "finished_at": "2026-01-01T00:00:00Z",
            "verdict": "pass",
            "findings": [],
            "data": {
                "profile": "strict",
                "rules_evaluated": 1,
                "rules_skipped": 0,
                "findings_total": 0,
                "findings_emitted": 0
            }
        }"#;
        let report: StoreguardReport = serde_json::from_str(text).expect("parse");
        assert!(report.rules.is_empty());
        assert_eq!(report.data.artifacts, ArtifactsSeen::default());
    }
}
