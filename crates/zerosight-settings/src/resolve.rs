use crate::{model::ZerosightConfigV1, presets};
use anyhow::Context;
use std::collections::BTreeSet;
use zerosight_domain::policy::{EffectiveConfig, Enforcement, ReportNumbering};
use zerosight_types::{Actor, Credential, Role, ids};

pub const DEFAULT_SESSION_PATH: &str = ".zerosight/session.json";

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub enforcement: Option<String>,
    pub report_numbering: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    pub key: String,
    pub path: String,
    pub login_delay_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            key: ids::SESSION_KEY.to_string(),
            path: DEFAULT_SESSION_PATH.to_string(),
            login_delay_ms: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub session: SessionSettings,
    /// `None` means the built-in demo directory.
    pub directory: Option<Vec<Credential>>,
}

pub fn resolve_config(
    cfg: ZerosightConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref() {
        anyhow::ensure!(
            schema == ids::SCHEMA_CONFIG_V1,
            "unsupported config schema: {schema} (expected {})",
            ids::SCHEMA_CONFIG_V1
        );
    }

    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile).with_context(|| {
        format!(
            "unknown profile: {profile} (expected {})",
            presets::PROFILES.join("|")
        )
    })?;

    if let Some(v) = overrides.enforcement.as_deref().or(cfg.enforcement.as_deref()) {
        effective.enforcement = parse_enforcement(v)?;
    }

    if let Some(v) = overrides
        .report_numbering
        .as_deref()
        .or(cfg.report_numbering.as_deref())
    {
        effective.numbering = parse_numbering(v)?;
    }

    if let Some(prefix) = cfg.report_id_prefix {
        effective.report_id_prefix = parse_prefix(&prefix)?;
    }

    if let Some(v) = cfg.audit.record_updates {
        effective.audit.record_updates = v;
    }
    if let Some(v) = cfg.audit.record_comments {
        effective.audit.record_comments = v;
    }

    let mut session = SessionSettings::default();
    if let Some(key) = cfg.session.key {
        anyhow::ensure!(!key.trim().is_empty(), "session.key must not be blank");
        session.key = key;
    }
    if let Some(path) = cfg.session.path {
        anyhow::ensure!(!path.trim().is_empty(), "session.path must not be blank");
        session.path = path;
    }
    if let Some(delay) = cfg.session.login_delay_ms {
        session.login_delay_ms = delay;
    }

    let directory = if cfg.actors.is_empty() {
        None
    } else {
        let mut seen_ids = BTreeSet::new();
        let mut seen_emails = BTreeSet::new();
        let mut out = Vec::with_capacity(cfg.actors.len());
        for a in cfg.actors {
            let role: Role = a
                .role
                .parse()
                .with_context(|| format!("invalid role for actor {}", a.email))?;
            anyhow::ensure!(!a.id.trim().is_empty(), "actor id must not be blank");
            anyhow::ensure!(
                seen_ids.insert(a.id.clone()),
                "duplicate actor id: {}",
                a.id
            );
            anyhow::ensure!(
                seen_emails.insert(a.email.to_lowercase()),
                "duplicate actor email: {}",
                a.email
            );
            out.push(Credential {
                email: a.email.clone(),
                password: a.password,
                actor: Actor {
                    id: a.id,
                    email: a.email,
                    name: a.name,
                    role,
                },
            });
        }
        Some(out)
    };

    Ok(ResolvedConfig {
        effective,
        session,
        directory,
    })
}

fn parse_enforcement(v: &str) -> anyhow::Result<Enforcement> {
    match v {
        "strict" => Ok(Enforcement::Strict),
        "trust-caller" => Ok(Enforcement::TrustCaller),
        other => anyhow::bail!("unknown enforcement: {other} (expected strict|trust-caller)"),
    }
}

fn parse_numbering(v: &str) -> anyhow::Result<ReportNumbering> {
    match v {
        "monotonic" => Ok(ReportNumbering::Monotonic),
        "collection-size" => Ok(ReportNumbering::CollectionSize),
        other => {
            anyhow::bail!("unknown report_numbering: {other} (expected monotonic|collection-size)")
        }
    }
}

fn parse_prefix(v: &str) -> anyhow::Result<String> {
    let ok = !v.is_empty() && v.chars().all(|c| c.is_ascii_alphanumeric());
    anyhow::ensure!(ok, "report_id_prefix must be non-empty ASCII alphanumeric: {v:?}");
    Ok(v.to_string())
}
