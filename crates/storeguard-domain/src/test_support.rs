use crate::model::{
    ASSOCIATED_DOMAINS_KEY, Dependency, DependencyManifest, EntitlementValue, Entitlements,
    ProjectModel, ServiceConfig,
};
use crate::policy::{EffectiveConfig, FailOn, RulePolicy};
use storeguard_types::{Location, RepoPath, Severity};
use std::collections::BTreeMap;

pub fn service_config() -> ServiceConfig {
    let mut values = BTreeMap::new();
    values.insert("GOOGLE_APP_ID".to_string(), "1:123:ios:abc".to_string());
    values.insert("BUNDLE_ID".to_string(), "com.example.app".to_string());
    ServiceConfig {
        path: RepoPath::new("App/GoogleService-Info.plist"),
        values,
    }
}

pub fn podfile(pods: &[&str]) -> DependencyManifest {
    DependencyManifest {
        path: RepoPath::new("Podfile"),
        dependencies: pods
            .iter()
            .enumerate()
            .map(|(i, name)| Dependency {
                name: name.to_string(),
                requirement: None,
                location: Some(Location {
                    path: RepoPath::new("Podfile"),
                    line: Some(i as u32 + 1),
                    col: None,
                }),
            })
            .collect(),
    }
}

pub fn entitlements(entries: BTreeMap<String, EntitlementValue>) -> Entitlements {
    Entitlements {
        path: RepoPath::new("App/App.entitlements"),
        entries,
    }
}

pub fn entitlements_with_domains(domains: &[&str]) -> Entitlements {
    let mut entries = BTreeMap::new();
    entries.insert(
        ASSOCIATED_DOMAINS_KEY.to_string(),
        EntitlementValue::Array(
            domains
                .iter()
                .map(|d| EntitlementValue::String(d.to_string()))
                .collect(),
        ),
    );
    entitlements(entries)
}

pub fn project(
    service_config: Option<ServiceConfig>,
    manifest: Option<DependencyManifest>,
    entitlements: Option<Entitlements>,
) -> ProjectModel {
    ProjectModel {
        project_root: RepoPath::new("."),
        service_config,
        dependency_manifest: manifest,
        entitlements,
    }
}

/// A project with the service config and the Dynamic Links pod in place.
pub fn dynamic_links_project(entitlements: Option<Entitlements>) -> ProjectModel {
    project(
        Some(service_config()),
        Some(podfile(&["Firebase/Analytics", "Firebase/DynamicLinks"])),
        entitlements,
    )
}

pub fn config_with_rule(rule_key: &str, severity: Severity) -> EffectiveConfig {
    let mut rules = BTreeMap::new();
    rules.insert(rule_key.to_string(), RulePolicy::enabled(severity));
    EffectiveConfig {
        profile: "test".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        rules,
    }
}
