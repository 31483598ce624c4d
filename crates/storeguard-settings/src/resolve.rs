use crate::env::{EnvLevel, parse_env_level};
use crate::{model::StoreguardConfigV1, presets};
use anyhow::Context;
use globset::Glob;
use std::collections::BTreeMap;
use storeguard_domain::policy::{EffectiveConfig, FailOn, RulePolicy};
use storeguard_domain::rules;
use storeguard_types::Severity;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub max_findings: Option<u32>,
    /// Process environment (or a test double). Only rule env names are consulted.
    pub env: BTreeMap<String, String>,
}

/// Where and how to look for project artifacts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscoverySettings {
    pub service_config: Option<String>,
    pub podfile: Option<String>,
    pub entitlements: Option<String>,
    pub exclude: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub discovery: DiscoverySettings,
}

pub fn resolve_config(
    cfg: StoreguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| presets::DEFAULT_PROFILE.to_string());

    let mut effective = presets::preset(&profile);

    // max findings
    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    // per-rule config
    for (key, rc) in cfg.rules.iter() {
        if rules::lookup(key).is_none() {
            tracing::warn!(rule = %key, "config mentions an unknown rule");
        }
        let entry = effective
            .rules
            .entry(key.clone())
            .or_insert_with(RulePolicy::disabled);

        if let Some(enabled) = rc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = rc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {key}"))?;
        }
    }

    // env gating wins over the config file
    for rule in rules::registry() {
        let Some(value) = overrides.env.get(rule.env_name()) else {
            continue;
        };
        let level = parse_env_level(value)
            .with_context(|| format!("invalid value for {}", rule.env_name()))?;
        tracing::debug!(rule = rule.key(), env = rule.env_name(), ?level, "env override");

        let entry = effective
            .rules
            .entry(rule.key().to_string())
            .or_insert_with(|| RulePolicy::enabled(Severity::Error));
        match level {
            EnvLevel::Enabled => entry.enabled = true,
            EnvLevel::Disabled => entry.enabled = false,
            EnvLevel::Severity(severity) => {
                entry.enabled = true;
                entry.severity = severity;
            }
        }
    }

    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    validate_excludes(&cfg.exclude)?;

    let discovery = DiscoverySettings {
        service_config: cfg.paths.service_config,
        podfile: cfg.paths.podfile,
        entitlements: cfg.paths.entitlements,
        exclude: cfg.exclude,
    };

    Ok(ResolvedConfig {
        effective,
        discovery,
    })
}

fn validate_excludes(patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid exclude glob: {pattern}"))?;
    }
    Ok(())
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}
