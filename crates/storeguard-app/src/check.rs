//! The `check` use case: resolve configuration, load the project, evaluate rules.

use anyhow::Context;
use camino::Utf8Path;
use storeguard_repo::DiscoveryOptions;
use storeguard_settings::{DiscoverySettings, Overrides, ResolvedConfig};
use storeguard_types::{ReportEnvelope, SCHEMA_REPORT_V1, StoreguardReport, Verdict};
use time::OffsetDateTime;

use crate::report::tool_meta;

#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Directory that contains the iOS project.
    pub project_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides and the process environment.
    pub overrides: Overrides,
}

#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: StoreguardReport,
    pub resolved_config: ResolvedConfig,
}

pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Empty config is allowed; the profile preset applies.
    let cfg = if input.config_text.trim().is_empty() {
        storeguard_settings::StoreguardConfigV1::default()
    } else {
        storeguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = storeguard_settings::resolve_config(cfg, input.overrides)
        .context("resolve config")?;

    let options = discovery_options(&resolved.discovery);
    let model = storeguard_repo::build_project_model(input.project_root, &options)
        .context("build project model")?;

    let domain_report = storeguard_domain::evaluate(&model, &resolved.effective);
    tracing::info!(
        verdict = ?domain_report.verdict,
        errors = domain_report.counts.error,
        warnings = domain_report.counts.warning,
        "check finished"
    );

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict: domain_report.verdict,
        rules: domain_report.rules,
        findings: domain_report.findings,
        data: domain_report.data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

fn discovery_options(settings: &DiscoverySettings) -> DiscoveryOptions {
    DiscoveryOptions {
        service_config: settings.service_config.clone(),
        podfile: settings.podfile.clone(),
        entitlements: settings.entitlements.clone(),
        exclude: settings.exclude.clone(),
    }
}

/// 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
