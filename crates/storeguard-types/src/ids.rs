//! Stable identifiers for rules and finding codes.
//!
//! Rule keys are snake_case and double as `check_id` in findings. `code` is a short
//! snake_case discriminator within a rule.

// Rules
pub const RULE_VERIFY_FIREBASE_DYNAMIC_LINKS: &str = "verify_firebase_dynamic_links";

// Environment variables gating rules
pub const ENV_VERIFY_FIREBASE_DYNAMIC_LINKS: &str = "VERIFY_FIREBASE_DYNAMIC_LINKS";

// Codes: verify_firebase_dynamic_links
pub const CODE_MISSING_ENTITLEMENTS: &str = "missing_entitlements";
pub const CODE_MISSING_ASSOCIATED_DOMAINS: &str = "missing_associated_domains";
pub const CODE_MISSING_DYNAMIC_LINK_DOMAIN: &str = "missing_dynamic_link_domain";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
