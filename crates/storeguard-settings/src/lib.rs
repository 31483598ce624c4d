//! Config parsing, profile presets and environment gating.
//!
//! IO-free: configuration text and the environment map are supplied by the caller.

#![forbid(unsafe_code)]

mod env;
mod model;
mod presets;
mod resolve;

pub use env::EnvLevel;
pub use model::{PathsConfig, RuleConfig, StoreguardConfigV1};
pub use resolve::{DiscoverySettings, Overrides, ResolvedConfig};

/// Parse `storeguard.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<StoreguardConfigV1> {
    let cfg: StoreguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profile + config file + env + overrides).
pub fn resolve_config(
    cfg: StoreguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
