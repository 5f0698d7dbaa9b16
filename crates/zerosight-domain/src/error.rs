use thiserror::Error;

/// Why a workflow operation left the collection unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("report not found: {id}")]
    NotFound { id: String },

    #[error("cannot {operation} {id}: {reason}")]
    PreconditionNotMet {
        id: String,
        operation: &'static str,
        /// Access rule that denied the operation, when one applies.
        rule_id: Option<&'static str>,
        reason: String,
    },
}

impl WorkflowError {
    pub fn not_found(id: impl Into<String>) -> Self {
        WorkflowError::NotFound { id: id.into() }
    }

    pub fn precondition(
        id: impl Into<String>,
        operation: &'static str,
        rule_id: Option<&'static str>,
        reason: impl Into<String>,
    ) -> Self {
        WorkflowError::PreconditionNotMet {
            id: id.into(),
            operation,
            rule_id,
            reason: reason.into(),
        }
    }

    /// Stable snake_case discriminator for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            WorkflowError::NotFound { .. } => "not_found",
            WorkflowError::PreconditionNotMet { .. } => "precondition_not_met",
        }
    }
}
