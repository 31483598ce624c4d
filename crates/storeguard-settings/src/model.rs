use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `storeguard.toml` schema v1.
///
/// User-facing and permissive; unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StoreguardConfigV1 {
    /// Optional schema string for tooling (`storeguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `strict` (default) or `warn`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// When to fail the run: `error` (default) or `warning`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// How many findings to emit before truncating the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_findings: Option<u32>,

    /// Map of rule key -> config.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,

    /// Explicit artifact locations, relative to the project root.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Glob patterns excluded from artifact discovery.
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    /// Override preset enable/disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Override preset severity: `info`, `warning`, `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PathsConfig {
    /// `GoogleService-Info.plist`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_config: Option<String>,

    /// CocoaPods `Podfile`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub podfile: Option<String>,

    /// The app target's `.entitlements` file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entitlements: Option<String>,
}
