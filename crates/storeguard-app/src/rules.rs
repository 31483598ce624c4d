use storeguard_domain::rules;

/// Static metadata of a registered rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleInfo {
    pub key: &'static str,
    pub env_name: &'static str,
    pub friendly_name: &'static str,
    pub description: &'static str,
    pub documentation_url: Option<&'static str>,
}

/// Every registered rule, in registry order.
pub fn list_rules() -> Vec<RuleInfo> {
    rules::registry()
        .iter()
        .map(|r| RuleInfo {
            key: r.key(),
            env_name: r.env_name(),
            friendly_name: r.friendly_name(),
            description: r.description(),
            documentation_url: r.documentation_url(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storeguard_types::{explain, ids};

    #[test]
    fn lists_dynamic_links_rule() {
        let rules = list_rules();
        let info = rules
            .iter()
            .find(|r| r.key == ids::RULE_VERIFY_FIREBASE_DYNAMIC_LINKS)
            .expect("registered");
        assert_eq!(info.env_name, ids::ENV_VERIFY_FIREBASE_DYNAMIC_LINKS);
        assert!(info.documentation_url.is_some());
    }

    #[test]
    fn every_listed_rule_has_an_explanation() {
        for r in list_rules() {
            assert!(explain::lookup_explanation(r.key).is_some(), "{}", r.key);
        }
    }
}
