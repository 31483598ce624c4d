//! Explain registry for rules and codes.
//!
//! Maps rule keys and finding codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a rule or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule/code.
    pub title: &'static str,
    /// What the rule checks and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after entitlements examples.
    pub examples: ExamplePair,
}

/// Before and after examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Configuration that would trigger a finding.
    pub before: &'static str,
    /// Configuration that passes the rule.
    pub after: &'static str,
}

/// Look up an explanation by rule key or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Rule keys
        ids::RULE_VERIFY_FIREBASE_DYNAMIC_LINKS => Some(explain_firebase_dynamic_links()),

        // Codes
        ids::CODE_MISSING_ENTITLEMENTS => Some(explain_missing_entitlements()),
        ids::CODE_MISSING_ASSOCIATED_DOMAINS => Some(explain_missing_associated_domains()),
        ids::CODE_MISSING_DYNAMIC_LINK_DOMAIN => Some(explain_missing_dynamic_link_domain()),

        _ => None,
    }
}

/// List all known rule keys.
pub fn all_check_ids() -> &'static [&'static str] {
    &[ids::RULE_VERIFY_FIREBASE_DYNAMIC_LINKS]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_MISSING_ENTITLEMENTS,
        ids::CODE_MISSING_ASSOCIATED_DOMAINS,
        ids::CODE_MISSING_DYNAMIC_LINK_DOMAIN,
    ]
}

const ENTITLEMENTS_WITH_APPLINK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>com.apple.developer.associated-domains</key>
    <array>
        <string>applinks:example.app.goo.gl</string>
    </array>
</dict>
</plist>"#;

// --- Rule-level explanations ---

fn explain_firebase_dynamic_links() -> Explanation {
    Explanation {
        title: "Firebase Dynamic Links Configuration",
        description: "\
Runs when the project ships a GoogleService-Info.plist and its Podfile declares
`Firebase/DynamicLinks` (or the legacy `Firebase/Invites`) pod.

Dynamic Links open the app through universal links served from a `*.app.goo.gl`
domain. iOS only routes those links to the app when its entitlements declare the
domain as an associated domain with the `applinks:` service type. Without it, links
open in Safari instead of the app.

The rule fails when:
- the entitlements file is missing
- the entitlements declare no associated domains
- none of the associated domains is an `applinks:` entry ending in `app.goo.gl`

The domain check is approximate: the project-specific link prefix is not available
from the service configuration, so any `applinks:*app.goo.gl` entry is accepted.",
        remediation: "\
Enable the Associated Domains capability for the app target and add your Dynamic
Links domain with the `applinks:` prefix:

    applinks:your-prefix.app.goo.gl

See https://firebase.google.com/docs/dynamic-links/ios/create for details.

If the project does not use Dynamic Links, remove the pod or disable the rule with
VERIFY_FIREBASE_DYNAMIC_LINKS=false.",
        examples: ExamplePair {
            before: r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>com.apple.developer.associated-domains</key>
    <array>
        <string>applinks:example.com</string>
    </array>
</dict>
</plist>"#,
            after: ENTITLEMENTS_WITH_APPLINK,
        },
    }
}

// --- Code-level explanations ---

fn explain_missing_entitlements() -> Explanation {
    Explanation {
        title: "Missing Entitlements File",
        description: "\
The project uses Firebase Dynamic Links but no `.entitlements` file was found.

Associated domains are declared in the entitlements file; without one, iOS will
never hand Dynamic Links to the app.",
        remediation: "\
Enable the Associated Domains capability in Xcode (Signing & Capabilities). Xcode
creates `<Target>.entitlements` and wires it through CODE_SIGN_ENTITLEMENTS.

If the file lives somewhere unusual, point storeguard at it:

    [paths]
    entitlements = \"App/Config/App.entitlements\"",
        examples: ExamplePair {
            before: "# Podfile\npod 'Firebase/DynamicLinks'\n# (no .entitlements file in the project)",
            after: ENTITLEMENTS_WITH_APPLINK,
        },
    }
}

fn explain_missing_associated_domains() -> Explanation {
    Explanation {
        title: "No Associated Domains",
        description: "\
The entitlements file has no `com.apple.developer.associated-domains` entry, or the
entry is empty or not an array. When several `.entitlements` files sit at the same
depth the first one alphabetically is checked, which may belong to an app extension.",
        remediation: "\
Add the associated-domains array with your Dynamic Links domain:

    <key>com.apple.developer.associated-domains</key>
    <array>
        <string>applinks:your-prefix.app.goo.gl</string>
    </array>

If the reported file belongs to an extension, point storeguard at the app target's file:

    [paths]
    entitlements = \"App/App.entitlements\"",
        examples: ExamplePair {
            before: r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>aps-environment</key>
    <string>development</string>
</dict>
</plist>"#,
            after: ENTITLEMENTS_WITH_APPLINK,
        },
    }
}

fn explain_missing_dynamic_link_domain() -> Explanation {
    let mut exp = explain_firebase_dynamic_links();
    exp.title = "No Dynamic Links Applink Domain";
    exp.description = "\
Associated domains are declared, but none of them is an `applinks:` entry pointing
to a `*.app.goo.gl` domain.

Entries with other service types (`webcredentials:`, `activitycontinuation:`) or
other hosts do not count.";
    exp
}
