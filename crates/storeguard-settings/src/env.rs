//! Environment-variable gating of individual rules.
//!
//! `VERIFY_FIREBASE_DYNAMIC_LINKS=false` turns the rule off; `=warn` keeps it on as a warning.

use anyhow::bail;
use storeguard_types::Severity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvLevel {
    /// Enabled; keep whatever severity the profile/config chose.
    Enabled,
    /// Enabled at a specific severity.
    Severity(Severity),
    Disabled,
}

pub fn parse_env_level(value: &str) -> anyhow::Result<EnvLevel> {
    let v = value.trim().to_ascii_lowercase();
    match v.as_str() {
        "true" | "1" | "yes" | "on" => Ok(EnvLevel::Enabled),
        "false" | "0" | "no" | "off" | "skip" => Ok(EnvLevel::Disabled),
        "error" => Ok(EnvLevel::Severity(Severity::Error)),
        "warning" | "warn" => Ok(EnvLevel::Severity(Severity::Warning)),
        "info" => Ok(EnvLevel::Severity(Severity::Info)),
        _ => bail!(
            "unknown rule level: {value} (expected true|false|skip|error|warning|info)"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_toggle() {
        assert_eq!(parse_env_level("true").unwrap(), EnvLevel::Enabled);
        assert_eq!(parse_env_level(" YES ").unwrap(), EnvLevel::Enabled);
        assert_eq!(parse_env_level("0").unwrap(), EnvLevel::Disabled);
        assert_eq!(parse_env_level("skip").unwrap(), EnvLevel::Disabled);
    }

    #[test]
    fn levels_set_severity() {
        assert_eq!(
            parse_env_level("Warn").unwrap(),
            EnvLevel::Severity(Severity::Warning)
        );
        assert_eq!(
            parse_env_level("error").unwrap(),
            EnvLevel::Severity(Severity::Error)
        );
        assert_eq!(
            parse_env_level("info").unwrap(),
            EnvLevel::Severity(Severity::Info)
        );
    }

    #[test]
    fn garbage_is_rejected() {
        let err = parse_env_level("maybe").unwrap_err();
        assert!(err.to_string().contains("unknown rule level: maybe"));
    }
}
