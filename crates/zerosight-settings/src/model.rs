use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `zerosight.toml` schema v1.
///
/// Every field is optional; a missing file and an empty file resolve to the same defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ZerosightConfigV1 {
    /// Schema id; when present it must be `zerosight.config.v1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `strict` (default), `legacy` or `audited`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// `strict` or `trust-caller`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforcement: Option<String>,

    /// `monotonic` or `collection-size`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_numbering: Option<String>,

    /// Prefix of generated report ids (`RPT`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id_prefix: Option<String>,

    #[serde(default)]
    pub audit: AuditConfig,

    #[serde(default)]
    pub session: SessionConfig,

    /// When non-empty, replaces the built-in demo directory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actors: Vec<ActorConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_updates: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_comments: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Store key of the persisted actor (`bgs_user`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Session file, relative to the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Artificial delay before a login attempt resolves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_delay_ms: Option<u64>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ActorConfig {
    pub id: String,
    pub email: String,
    pub name: String,
    /// `admin`, `soc-analyst`, `pentester` or `client`.
    pub role: String,
    pub password: String,
}

impl std::fmt::Debug for ActorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorConfig")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("password", &"<redacted>")
            .finish()
    }
}
