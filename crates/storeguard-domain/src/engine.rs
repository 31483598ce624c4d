use crate::fingerprint::fingerprint_for_rule;
use crate::model::ProjectItem;
use crate::policy::{EffectiveConfig, FailOn, RulePolicy};
use crate::report::{DomainReport, SeverityCounts};
use crate::rule::{Rule, RuleReturn};
use crate::rules;
use serde_json::json;
use storeguard_types::{
    ArtifactsSeen, Finding, RuleResult, RuleStatus, Severity, StoreguardData, Verdict,
};

pub fn evaluate(item: &dyn ProjectItem, cfg: &EffectiveConfig) -> DomainReport {
    evaluate_rules(rules::registry(), item, cfg)
}

pub(crate) fn evaluate_rules(
    registry: &[&dyn Rule],
    item: &dyn ProjectItem,
    cfg: &EffectiveConfig,
) -> DomainReport {
    let mut results: Vec<RuleResult> = Vec::with_capacity(registry.len());
    let mut findings: Vec<Finding> = Vec::new();
    let mut evaluated = 0u32;
    let mut skipped = 0u32;

    for rule in registry {
        let Some(policy) = cfg.rule_policy(rule.key()) else {
            tracing::debug!(rule = rule.key(), "rule disabled; skipping");
            skipped += 1;
            results.push(rule_result(*rule, RuleStatus::Skipped));
            continue;
        };

        evaluated += 1;
        let outcome = rule.evaluate(item);
        if outcome.is_passed() {
            tracing::debug!(rule = rule.key(), "rule passed");
            results.push(rule_result(*rule, RuleStatus::Passed));
        } else {
            tracing::debug!(
                rule = rule.key(),
                code = outcome.failure_code().unwrap_or_default(),
                "rule failed"
            );
            results.push(rule_result(*rule, RuleStatus::Failed));
            findings.push(finding_for(*rule, policy, &outcome));
        }
    }

    // Deterministic ordering before truncation.
    findings.sort_by(compare_findings);

    let total = findings.len() as u32;

    let mut emitted = findings;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_findings {
        emitted.truncate(cfg.max_findings);
        truncated_reason = Some(format!(
            "findings truncated to max_findings={}",
            cfg.max_findings
        ));
    }

    let verdict = compute_verdict(&emitted, cfg.fail_on);
    let counts = SeverityCounts::from_findings(&emitted);

    let data = StoreguardData {
        profile: cfg.profile.clone(),
        rules_evaluated: evaluated,
        rules_skipped: skipped,
        findings_total: total,
        findings_emitted: emitted.len() as u32,
        truncated_reason,
        artifacts: ArtifactsSeen {
            service_config: item.service_config_plist().map(|c| c.path.clone()),
            dependency_manifest: item.dependency_manifest().map(|m| m.path.clone()),
            entitlements: item.entitlements().map(|e| e.path.clone()),
        },
    };

    DomainReport {
        verdict,
        rules: results,
        findings: emitted,
        data,
        counts,
    }
}

fn rule_result(rule: &dyn Rule, status: RuleStatus) -> RuleResult {
    RuleResult {
        key: rule.key().to_string(),
        friendly_name: rule.friendly_name().to_string(),
        status,
    }
}

fn finding_for(rule: &dyn Rule, policy: &RulePolicy, outcome: &RuleReturn) -> Finding {
    let code = outcome.failure_code().unwrap_or_default();
    let location = outcome.location().cloned();
    let fingerprint = fingerprint_for_rule(
        rule.key(),
        code,
        location.as_ref().map(|l| l.path.as_str()),
    );

    Finding {
        severity: policy.severity,
        check_id: rule.key().to_string(),
        code: code.to_string(),
        message: outcome.failure_data().unwrap_or_default().to_string(),
        location,
        help: Some(format!(
            "Run `storeguard explain {code}` for remediation guidance."
        )),
        url: rule.documentation_url().map(str::to_string),
        fingerprint: Some(fingerprint),
        data: json!({
            "env_name": rule.env_name(),
            "friendly_name": rule.friendly_name(),
        }),
    }
}

fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> Verdict {
    let has_error = findings.iter().any(|f| f.severity == Severity::Error);
    if has_error {
        return Verdict::Fail;
    }

    let has_warn = findings.iter().any(|f| f.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::Error => Verdict::Warn,
        };
    }

    Verdict::Pass
}

fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) severity (error -> warning -> info)
    // 2) location.path (missing last)
    // 3) location.line (missing last)
    // 4) check_id
    // 5) code
    // 6) message
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    };
    let (ap, al) = match &a.location {
        Some(l) => (l.path.as_str(), l.line.unwrap_or(u32::MAX)),
        None => ("~", u32::MAX),
    };
    let (bp, bl) = match &b.location {
        Some(l) => (l.path.as_str(), l.line.unwrap_or(u32::MAX)),
        None => ("~", u32::MAX),
    };

    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then(ap.cmp(bp))
        .then(al.cmp(&bl))
        .then(a.check_id.cmp(&b.check_id))
        .then(a.code.cmp(&b.code))
        .then(a.message.cmp(&b.message))
}
