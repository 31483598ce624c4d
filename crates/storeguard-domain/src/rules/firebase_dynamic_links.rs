use crate::model::ProjectItem;
use crate::rule::{Rule, RuleReturn};
use storeguard_types::{Location, ids};

const DETAILS_URL: &str = "https://firebase.google.com/docs/dynamic-links/ios/create";
const DETAILS_MESSAGE: &str =
    "Please see https://firebase.google.com/docs/dynamic-links/ios/create for details.";

/// Pods that pull in Dynamic Links (`Firebase/Invites` is the legacy umbrella).
const DYNAMIC_LINK_PODS: &[&str] = &["Firebase/DynamicLinks", "Firebase/Invites"];

const APPLINKS_PREFIX: &str = "applinks:";
const DYNAMIC_LINK_DOMAIN_SUFFIX: &str = "app.goo.gl";

/// Projects using Firebase Dynamic Links must declare an `applinks:` associated
/// domain on `*.app.goo.gl`.
#[derive(Clone, Copy, Debug, Default)]
pub struct VerifyFirebaseDynamicLinksRule;

impl Rule for VerifyFirebaseDynamicLinksRule {
    fn key(&self) -> &'static str {
        ids::RULE_VERIFY_FIREBASE_DYNAMIC_LINKS
    }

    fn env_name(&self) -> &'static str {
        ids::ENV_VERIFY_FIREBASE_DYNAMIC_LINKS
    }

    fn friendly_name(&self) -> &'static str {
        "Firebase Dynamic Links are valid or not in use"
    }

    fn description(&self) -> &'static str {
        "Checks if Firebase Dynamic Links are properly configured"
    }

    fn documentation_url(&self) -> Option<&'static str> {
        Some(DETAILS_URL)
    }

    fn evaluate(&self, item: &dyn ProjectItem) -> RuleReturn {
        // Nothing to check against without the Firebase service config.
        if item.service_config_plist().is_none() {
            return RuleReturn::passed();
        }

        let Some(manifest) = item.dependency_manifest() else {
            return RuleReturn::passed();
        };

        let Some(dependency) = manifest.find_any(DYNAMIC_LINK_PODS) else {
            return RuleReturn::passed();
        };

        let Some(entitlements) = item.entitlements() else {
            let location = dependency
                .location
                .clone()
                .or_else(|| Some(Location::file(manifest.path.clone())));
            return RuleReturn::failed(
                ids::CODE_MISSING_ENTITLEMENTS,
                format!(
                    "Your project is using Firebase Dynamic Links but you are missing the entitlements file. {DETAILS_MESSAGE}"
                ),
            )
            .at(location);
        };
        let entitlements_location = Some(Location::file(entitlements.path.clone()));

        let associated_domains = match entitlements.associated_domains() {
            Some(domains) if !domains.is_empty() => domains,
            _ => {
                return RuleReturn::failed(
                    ids::CODE_MISSING_ASSOCIATED_DOMAINS,
                    format!(
                        "Your project is using Firebase Dynamic Links but your entitlements file does not specify any associated domains. {DETAILS_MESSAGE}"
                    ),
                )
                .at(entitlements_location);
            }
        };

        // The project-specific link prefix is not known here, so any applink on the
        // Dynamic Links domain is accepted.
        let has_app_links = associated_domains
            .iter()
            .filter_map(|d| d.as_str())
            .any(is_dynamic_link_applink);

        if !has_app_links {
            // "is using is using" is part of the established message text.
            return RuleReturn::failed(
                ids::CODE_MISSING_DYNAMIC_LINK_DOMAIN,
                format!(
                    "Your project is using is using Firebase Dynamic Links but none of the associated domains specifies an applink pointing to *.app.goo.gl. {DETAILS_MESSAGE}"
                ),
            )
            .at(entitlements_location);
        }

        RuleReturn::passed()
    }
}

fn is_dynamic_link_applink(domain: &str) -> bool {
    domain.starts_with(APPLINKS_PREFIX) && domain.ends_with(DYNAMIC_LINK_DOMAIN_SUFFIX)
}
