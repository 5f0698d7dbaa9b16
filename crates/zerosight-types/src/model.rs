use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Returned when a role, status, severity or visibility string is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value} (expected {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Role of an authenticated actor. Exactly one per actor.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    SocAnalyst,
    Pentester,
    Client,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::SocAnalyst, Role::Pentester, Role::Client];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::SocAnalyst => "soc-analyst",
            Role::Pentester => "pentester",
            Role::Client => "client",
        }
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "soc-analyst" => Ok(Role::SocAnalyst),
            "pentester" => Ok(Role::Pentester),
            "client" => Ok(Role::Client),
            other => Err(ParseEnumError {
                kind: "role",
                value: other.to_string(),
                expected: "admin|soc-analyst|pentester|client",
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportSeverity {
    Critical,
    High,
    Medium,
    Low,
    Informational,
}

impl ReportSeverity {
    pub const ALL: [ReportSeverity; 5] = [
        ReportSeverity::Critical,
        ReportSeverity::High,
        ReportSeverity::Medium,
        ReportSeverity::Low,
        ReportSeverity::Informational,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportSeverity::Critical => "critical",
            ReportSeverity::High => "high",
            ReportSeverity::Medium => "medium",
            ReportSeverity::Low => "low",
            ReportSeverity::Informational => "informational",
        }
    }
}

impl FromStr for ReportSeverity {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(ReportSeverity::Critical),
            "high" => Ok(ReportSeverity::High),
            "medium" => Ok(ReportSeverity::Medium),
            "low" => Ok(ReportSeverity::Low),
            "informational" => Ok(ReportSeverity::Informational),
            other => Err(ParseEnumError {
                kind: "severity",
                value: other.to_string(),
                expected: "critical|high|medium|low|informational",
            }),
        }
    }
}

impl fmt::Display for ReportSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow state of a report.
///
/// `draft -> submitted -> under-review -> approved | rejected -> closed`
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Draft,
    Submitted,
    UnderReview,
    Approved,
    Rejected,
    Closed,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 6] = [
        ReportStatus::Draft,
        ReportStatus::Submitted,
        ReportStatus::UnderReview,
        ReportStatus::Approved,
        ReportStatus::Rejected,
        ReportStatus::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Draft => "draft",
            ReportStatus::Submitted => "submitted",
            ReportStatus::UnderReview => "under-review",
            ReportStatus::Approved => "approved",
            ReportStatus::Rejected => "rejected",
            ReportStatus::Closed => "closed",
        }
    }

    /// Waiting on an admin decision.
    pub fn is_pending_review(self) -> bool {
        matches!(self, ReportStatus::Submitted | ReportStatus::UnderReview)
    }

    /// A review verdict has been recorded.
    pub fn is_decided(self) -> bool {
        matches!(self, ReportStatus::Approved | ReportStatus::Rejected)
    }

    pub fn is_terminal(self) -> bool {
        self == ReportStatus::Closed
    }

    /// Edges of the state machine. Self-loops are not transitions.
    pub fn can_transition_to(self, next: ReportStatus) -> bool {
        use ReportStatus::*;
        matches!(
            (self, next),
            (Draft, Submitted)
                | (Submitted, UnderReview)
                | (Submitted, Approved)
                | (Submitted, Rejected)
                | (UnderReview, Approved)
                | (UnderReview, Rejected)
                | (Approved, Closed)
                | (Rejected, Closed)
        )
    }
}

impl FromStr for ReportStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ReportStatus::Draft),
            "submitted" => Ok(ReportStatus::Submitted),
            "under-review" | "under_review" => Ok(ReportStatus::UnderReview),
            "approved" => Ok(ReportStatus::Approved),
            "rejected" => Ok(ReportStatus::Rejected),
            "closed" => Ok(ReportStatus::Closed),
            other => Err(ParseEnumError {
                kind: "status",
                value: other.to_string(),
                expected: "draft|submitted|under-review|approved|rejected|closed",
            }),
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audience a report is written for. Independent of status.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Client,
    Internal,
    Admin,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [Visibility::Client, Visibility::Internal, Visibility::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Client => "client",
            Visibility::Internal => "internal",
            Visibility::Admin => "admin",
        }
    }
}

impl FromStr for Visibility {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Visibility::Client),
            "internal" => Ok(Visibility::Internal),
            "admin" => Ok(Visibility::Admin),
            other => Err(ParseEnumError {
                kind: "visibility",
                value: other.to_string(),
                expected: "client|internal|admin",
            }),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated user. This is also the session payload stored under `bgs_user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Actor {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Directory record: an actor plus the plaintext password it logs in with.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    pub password: String,
    pub actor: Actor,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("actor", &self.actor)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_role: Role,
    pub content: String,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    pub action: String,
    /// Display name of the actor, not the actor id.
    pub performed_by: String,
    pub performed_by_role: Role,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// `RPT-YYYY-NNN`; unique within a collection for the process lifetime.
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: ReportSeverity,
    pub status: ReportStatus,
    pub visibility: Visibility,
    pub author_id: String,
    pub author_name: String,
    pub author_role: Role,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[schemars(with = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub submitted_at: Option<OffsetDateTime>,
    #[schemars(with = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub reviewed_at: Option<OffsetDateTime>,
    /// Reviewer display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[schemars(with = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub closed_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub activity_log: Vec<ActivityEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}

impl Report {
    pub fn is_authored_by(&self, actor_id: &str) -> bool {
        self.author_id == actor_id
    }

    pub fn last_activity(&self) -> Option<&ActivityEntry> {
        self.activity_log.last()
    }
}

/// Input for creating a report. Author and initial status come from the creating actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NewReport {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub severity: ReportSeverity,
    pub visibility: Visibility,
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// Partial update of a report's mutable fields. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<ReportSeverity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
}

impl ReportPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.severity.is_none()
            && self.visibility.is_none()
            && self.attachments.is_none()
    }
}
