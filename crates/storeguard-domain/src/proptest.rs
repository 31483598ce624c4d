//! Property-based tests for the domain crate.
//!
//! Invariants covered:
//! - the rule passes whenever the service config or the manifest is missing
//! - order and duplicates in the associated domains never change the verdict
//! - `failure_data` is present exactly when the rule fails
//! - engine output is deterministic

use crate::engine::evaluate;
use crate::rule::{Rule, ValidationState};
use crate::rules::VerifyFirebaseDynamicLinksRule;
use crate::test_support::{
    config_with_rule, dynamic_links_project, entitlements_with_domains, podfile, project,
    service_config,
};
use proptest::prelude::*;
use storeguard_types::{Severity, ids};

// ============================================================================
// Strategies
// ============================================================================

/// Associated-domain entries, qualifying or not.
fn arb_domain() -> impl Strategy<Value = String> {
    let host = prop::string::string_regex("[a-z][a-z0-9-]{0,15}")
        .expect("valid regex");
    let service = prop_oneof![
        Just("applinks:"),
        Just("webcredentials:"),
        Just("activitycontinuation:"),
        Just(""),
    ];
    let suffix = prop_oneof![
        Just(".app.goo.gl"),
        Just(".page.link"),
        Just(".com"),
        Just("app.goo.gl"),
    ];
    (service, host, suffix).prop_map(|(s, h, x)| format!("{s}{h}{x}"))
}

fn arb_pod_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Firebase/DynamicLinks".to_string()),
        Just("Firebase/Invites".to_string()),
        Just("Firebase/Analytics".to_string()),
        Just("Alamofire".to_string()),
        prop::string::string_regex("[A-Z][A-Za-z]{0,12}(/[A-Z][A-Za-z]{0,12})?")
            .expect("valid regex"),
    ]
}

fn verdict_for(domains: &[String]) -> ValidationState {
    let refs: Vec<&str> = domains.iter().map(String::as_str).collect();
    let p = dynamic_links_project(Some(entitlements_with_domains(&refs)));
    VerifyFirebaseDynamicLinksRule.evaluate(&p).validation_state()
}

proptest! {
    #[test]
    fn passes_without_service_config(pods in prop::collection::vec(arb_pod_name(), 0..8)) {
        let refs: Vec<&str> = pods.iter().map(String::as_str).collect();
        let p = project(None, Some(podfile(&refs)), None);
        prop_assert!(VerifyFirebaseDynamicLinksRule.evaluate(&p).is_passed());
    }

    #[test]
    fn passes_without_dynamic_link_pods(pods in prop::collection::vec(arb_pod_name(), 0..8)) {
        let pods: Vec<&str> = pods
            .iter()
            .map(String::as_str)
            .filter(|n| *n != "Firebase/DynamicLinks" && *n != "Firebase/Invites")
            .collect();
        let p = project(Some(service_config()), Some(podfile(&pods)), None);
        prop_assert!(VerifyFirebaseDynamicLinksRule.evaluate(&p).is_passed());
    }

    #[test]
    fn order_never_changes_verdict(
        domains in prop::collection::vec(arb_domain(), 1..8),
        rotate in 0usize..8,
    ) {
        let mut reordered = domains.clone();
        reordered.reverse();
        let len = reordered.len();
        reordered.rotate_left(rotate % len);
        prop_assert_eq!(verdict_for(&domains), verdict_for(&reordered));
    }

    #[test]
    fn duplicates_never_change_verdict(domains in prop::collection::vec(arb_domain(), 1..8)) {
        let mut doubled = domains.clone();
        doubled.extend(domains.iter().cloned());
        prop_assert_eq!(verdict_for(&domains), verdict_for(&doubled));
    }

    #[test]
    fn verdict_matches_any_qualifying_entry(domains in prop::collection::vec(arb_domain(), 1..8)) {
        let expected = if domains
            .iter()
            .any(|d| d.starts_with("applinks:") && d.ends_with("app.goo.gl"))
        {
            ValidationState::Passed
        } else {
            ValidationState::Failed
        };
        prop_assert_eq!(verdict_for(&domains), expected);
    }

    #[test]
    fn failure_data_iff_failed(domains in prop::collection::vec(arb_domain(), 0..6)) {
        let refs: Vec<&str> = domains.iter().map(String::as_str).collect();
        let p = dynamic_links_project(Some(entitlements_with_domains(&refs)));
        let r = VerifyFirebaseDynamicLinksRule.evaluate(&p);
        prop_assert_eq!(
            r.failure_data().is_some(),
            r.validation_state() == ValidationState::Failed
        );
        prop_assert_eq!(r.failure_code().is_some(), r.failure_data().is_some());
    }

    #[test]
    fn engine_is_deterministic(domains in prop::collection::vec(arb_domain(), 0..6)) {
        let refs: Vec<&str> = domains.iter().map(String::as_str).collect();
        let p = dynamic_links_project(Some(entitlements_with_domains(&refs)));
        let cfg = config_with_rule(ids::RULE_VERIFY_FIREBASE_DYNAMIC_LINKS, Severity::Error);
        let a = evaluate(&p, &cfg);
        let b = evaluate(&p, &cfg);
        prop_assert_eq!(a.verdict, b.verdict);
        prop_assert_eq!(a.findings, b.findings);
        prop_assert_eq!(a.rules, b.rules);
    }
}
