use zerosight_domain::policy::{AuditPolicy, EffectiveConfig, Enforcement, ReportNumbering};
use zerosight_types::ids;

pub const PROFILES: [&str; 3] = ["strict", "legacy", "audited"];

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything else belongs in `zerosight.toml`.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    match profile {
        "strict" => Some(strict_profile()),
        "legacy" => Some(legacy_profile()),
        "audited" => Some(audited_profile()),
        _ => None,
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        enforcement: Enforcement::Strict,
        numbering: ReportNumbering::Monotonic,
        report_id_prefix: ids::REPORT_ID_PREFIX.to_string(),
        audit: AuditPolicy::default(),
    }
}

// The dashboard as it originally shipped: role checks live in the UI.
fn legacy_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "legacy".to_string(),
        enforcement: Enforcement::TrustCaller,
        numbering: ReportNumbering::CollectionSize,
        report_id_prefix: ids::REPORT_ID_PREFIX.to_string(),
        audit: AuditPolicy::default(),
    }
}

fn audited_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "audited".to_string(),
        enforcement: Enforcement::Strict,
        numbering: ReportNumbering::Monotonic,
        report_id_prefix: ids::REPORT_ID_PREFIX.to_string(),
        audit: AuditPolicy {
            record_updates: true,
            record_comments: true,
        },
    }
}
