use std::collections::BTreeMap;
use storeguard_domain::policy::{EffectiveConfig, FailOn, RulePolicy};
use storeguard_domain::rules;
use storeguard_types::Severity;

pub const DEFAULT_PROFILE: &str = "strict";

/// Preset profiles are opinionated defaults.
///
/// Keep these small. Anything project-specific belongs in `storeguard.toml`.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "warn" => warn_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: DEFAULT_PROFILE.to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        rules: default_rules(Severity::Error),
    }
}

fn warn_profile() -> EffectiveConfig {
    // Reports everything, blocks nothing unless `fail_on = "warning"`.
    EffectiveConfig {
        profile: "warn".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        rules: default_rules(Severity::Warning),
    }
}

fn default_rules(severity: Severity) -> BTreeMap<String, RulePolicy> {
    rules::registry()
        .iter()
        .map(|r| (r.key().to_string(), RulePolicy::enabled(severity)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storeguard_types::ids;

    #[test]
    fn strict_enables_every_rule_at_error() {
        let cfg = preset("strict");
        assert_eq!(cfg.profile, "strict");
        let policy = cfg
            .rule_policy(ids::RULE_VERIFY_FIREBASE_DYNAMIC_LINKS)
            .expect("enabled");
        assert_eq!(policy.severity, Severity::Error);
    }

    #[test]
    fn warn_uses_warning_severity() {
        let cfg = preset("warn");
        let policy = cfg
            .rule_policy(ids::RULE_VERIFY_FIREBASE_DYNAMIC_LINKS)
            .expect("enabled");
        assert_eq!(policy.severity, Severity::Warning);
        assert_eq!(cfg.fail_on, FailOn::Error);
    }

    #[test]
    fn unknown_profile_falls_back_to_strict() {
        assert_eq!(preset("nope").profile, "strict");
    }
}
