use zerosight_types::ids;

/// How much of the access evaluator the workflow engine applies on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Enforcement {
    /// Every operation checks the capability it needs before mutating.
    Strict,
    /// Only existence and the engine's built-in status guards are checked;
    /// role checks are left to the caller.
    TrustCaller,
}

/// How the `NNN` part of a new report id is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportNumbering {
    /// Counter that only moves forward; numbers are never reused.
    Monotonic,
    /// `collection size + 1`, probing forward past ids already taken.
    CollectionSize,
}

/// Which non-transition mutations also append to the activity log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuditPolicy {
    pub record_updates: bool,
    pub record_comments: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub profile: String,
    pub enforcement: Enforcement,
    pub numbering: ReportNumbering,
    pub report_id_prefix: String,
    pub audit: AuditPolicy,
}

impl EffectiveConfig {
    pub fn is_strict(&self) -> bool {
        self.enforcement == Enforcement::Strict
    }
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: "strict".to_string(),
            enforcement: Enforcement::Strict,
            numbering: ReportNumbering::Monotonic,
            report_id_prefix: ids::REPORT_ID_PREFIX.to_string(),
            audit: AuditPolicy::default(),
        }
    }
}
