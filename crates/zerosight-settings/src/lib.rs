//! Config parsing and preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{ActorConfig, AuditConfig, SessionConfig, ZerosightConfigV1};
pub use presets::{PROFILES, preset};
pub use resolve::{DEFAULT_SESSION_PATH, Overrides, ResolvedConfig, SessionSettings};

/// Parse `zerosight.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<ZerosightConfigV1> {
    let cfg: ZerosightConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config (preset + file + overrides) and the actor directory.
pub fn resolve_config(
    cfg: ZerosightConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
