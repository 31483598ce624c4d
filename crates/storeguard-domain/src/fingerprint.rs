use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a rule finding.
///
/// Identity fields:
/// - rule key
/// - code
/// - location path (project-relative), if the failure points at a file
pub fn fingerprint_for_rule(rule_key: &str, code: &str, path: Option<&str>) -> String {
    let mut parts = vec![rule_key, code];
    if let Some(p) = path {
        parts.push(p);
    }
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
