//! Report state machine: guards and effects, split so callers can check before they mint ids.
//!
//! Guards never mutate. Effects assume their guard passed and always append to the activity log
//! (except `apply_patch` / `append_comment`, whose audit entries are opt-in).

use crate::access::{self, Capability};
use crate::error::WorkflowError;
use crate::policy::{EffectiveConfig, Enforcement};
use time::OffsetDateTime;
use zerosight_types::{
    ActivityEntry, Actor, Comment, NewReport, Report, ReportPatch, ReportStatus, Role, ids,
};

/// Placeholder id used in errors raised before a new report has an id.
pub const NEW_REPORT: &str = "<new report>";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Submit,
    BeginReview,
    Approve,
    Reject,
    Close,
}

impl Transition {
    pub fn review(approved: bool) -> Self {
        if approved {
            Transition::Approve
        } else {
            Transition::Reject
        }
    }

    pub fn operation(self) -> &'static str {
        match self {
            Transition::Submit => "submit",
            Transition::BeginReview => "begin-review",
            Transition::Approve | Transition::Reject => "review",
            Transition::Close => "close",
        }
    }

    pub fn capability(self) -> Capability {
        match self {
            Transition::Submit => Capability::Submit,
            Transition::BeginReview => Capability::BeginReview,
            Transition::Approve | Transition::Reject => Capability::Review,
            Transition::Close => Capability::Close,
        }
    }

    pub fn target(self) -> ReportStatus {
        match self {
            Transition::Submit => ReportStatus::Submitted,
            Transition::BeginReview => ReportStatus::UnderReview,
            Transition::Approve => ReportStatus::Approved,
            Transition::Reject => ReportStatus::Rejected,
            Transition::Close => ReportStatus::Closed,
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            Transition::Submit => ids::ACTION_REPORT_SUBMITTED,
            Transition::BeginReview => ids::ACTION_REVIEW_STARTED,
            Transition::Approve => ids::ACTION_REPORT_APPROVED,
            Transition::Reject => ids::ACTION_REPORT_REJECTED,
            Transition::Close => ids::ACTION_REPORT_CLOSED,
        }
    }

    pub fn details(self) -> Option<&'static str> {
        match self {
            Transition::Approve => Some(ids::DETAILS_APPROVED),
            Transition::Reject => Some(ids::DETAILS_REJECTED),
            _ => None,
        }
    }
}

/// Decide whether `transition` may fire on `report` for `actor`.
///
/// Under `Enforcement::Strict` the capability's access rule decides. Under `TrustCaller` only the
/// guards the engine always had remain: submit is author + draft, begin-review needs `submitted`,
/// close needs a verdict, and review checks nothing.
pub fn check_transition(
    report: &Report,
    transition: Transition,
    actor: &Actor,
    cfg: &EffectiveConfig,
) -> Result<(), WorkflowError> {
    let operation = transition.operation();

    let status_ok = match (cfg.enforcement, transition) {
        (Enforcement::Strict, _) | (_, Transition::Submit) => {
            return check_capability(report, transition.capability(), operation, actor);
        }
        (Enforcement::TrustCaller, Transition::BeginReview) => {
            report.status == ReportStatus::Submitted
        }
        (Enforcement::TrustCaller, Transition::Close) => report.status.is_decided(),
        (Enforcement::TrustCaller, Transition::Approve | Transition::Reject) => true,
    };

    if status_ok {
        Ok(())
    } else {
        Err(WorkflowError::precondition(
            &report.id,
            operation,
            None,
            format!("report is {}", report.status),
        ))
    }
}

/// Apply a transition whose guard has passed. Appends exactly one activity entry.
pub fn apply_transition(
    report: &mut Report,
    transition: Transition,
    actor: &Actor,
    at: OffsetDateTime,
    entry_id: String,
) {
    report.status = transition.target();
    report.updated_at = at;

    let performed_by_role = match transition {
        Transition::Submit => {
            report.submitted_at = Some(at);
            report.author_role
        }
        Transition::Approve | Transition::Reject => {
            report.reviewed_at = Some(at);
            report.reviewed_by = Some(actor.name.clone());
            // Review entries are always attributed to the admin role.
            Role::Admin
        }
        Transition::Close => {
            report.closed_at = Some(at);
            actor.role
        }
        Transition::BeginReview => actor.role,
    };

    report.activity_log.push(ActivityEntry {
        id: entry_id,
        action: transition.action().to_string(),
        performed_by: actor.name.clone(),
        performed_by_role,
        timestamp: at,
        details: transition.details().map(str::to_string),
    });
}

pub fn validate_new_report(input: &NewReport) -> Result<(), WorkflowError> {
    if input.title.trim().is_empty() {
        return Err(WorkflowError::precondition(
            NEW_REPORT,
            "create",
            None,
            "title must not be blank",
        ));
    }
    Ok(())
}

/// Build a draft report authored by `author` with its creation entry.
pub fn new_report(
    id: String,
    input: NewReport,
    author: &Actor,
    at: OffsetDateTime,
    entry_id: String,
) -> Report {
    Report {
        id,
        title: input.title,
        description: input.description,
        severity: input.severity,
        status: ReportStatus::Draft,
        visibility: input.visibility,
        author_id: author.id.clone(),
        author_name: author.name.clone(),
        author_role: author.role,
        created_at: at,
        updated_at: at,
        submitted_at: None,
        reviewed_at: None,
        reviewed_by: None,
        closed_at: None,
        comments: Vec::new(),
        activity_log: vec![ActivityEntry {
            id: entry_id,
            action: ids::ACTION_REPORT_CREATED.to_string(),
            performed_by: author.name.clone(),
            performed_by_role: author.role,
            timestamp: at,
            details: None,
        }],
        attachments: input.attachments,
    }
}

pub fn check_update(
    report: &Report,
    patch: &ReportPatch,
    actor: &Actor,
    cfg: &EffectiveConfig,
) -> Result<(), WorkflowError> {
    if cfg.is_strict() {
        check_capability(report, Capability::Edit, "update", actor)?;
    }
    if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(WorkflowError::precondition(
            &report.id,
            "update",
            None,
            "title must not be blank",
        ));
    }
    Ok(())
}

/// Merge `patch` into the report and bump `updated_at`. Returns the names of the fields that
/// changed value.
pub fn apply_patch(
    report: &mut Report,
    patch: ReportPatch,
    at: OffsetDateTime,
) -> Vec<&'static str> {
    let mut changed = Vec::new();

    if let Some(title) = patch.title
        && title != report.title
    {
        report.title = title;
        changed.push("title");
    }
    if let Some(description) = patch.description
        && description != report.description
    {
        report.description = description;
        changed.push("description");
    }
    if let Some(severity) = patch.severity
        && severity != report.severity
    {
        report.severity = severity;
        changed.push("severity");
    }
    if let Some(visibility) = patch.visibility
        && visibility != report.visibility
    {
        report.visibility = visibility;
        changed.push("visibility");
    }
    if let Some(attachments) = patch.attachments
        && attachments != report.attachments
    {
        report.attachments = attachments;
        changed.push("attachments");
    }

    report.updated_at = at;
    changed
}

pub fn check_delete(
    report: &Report,
    actor: &Actor,
    cfg: &EffectiveConfig,
) -> Result<(), WorkflowError> {
    if cfg.is_strict() {
        check_capability(report, Capability::Delete, "delete", actor)?;
    }
    Ok(())
}

pub fn check_comment(
    report: &Report,
    content: &str,
    actor: &Actor,
    cfg: &EffectiveConfig,
) -> Result<(), WorkflowError> {
    if cfg.is_strict() {
        check_capability(report, Capability::Comment, "comment on", actor)?;
    }
    if content.trim().is_empty() {
        return Err(WorkflowError::precondition(
            &report.id,
            "comment on",
            None,
            "comment must not be blank",
        ));
    }
    Ok(())
}

pub fn new_comment(id: String, author: &Actor, content: &str, at: OffsetDateTime) -> Comment {
    Comment {
        id,
        author_id: author.id.clone(),
        author_name: author.name.clone(),
        author_role: author.role,
        content: content.to_string(),
        created_at: at,
    }
}

pub fn append_comment(report: &mut Report, comment: Comment) {
    report.updated_at = comment.created_at;
    report.comments.push(comment);
}

/// Append an audit entry that is not tied to a status change.
pub fn record_activity(
    report: &mut Report,
    action: &str,
    actor: &Actor,
    at: OffsetDateTime,
    entry_id: String,
    details: Option<String>,
) {
    report.activity_log.push(ActivityEntry {
        id: entry_id,
        action: action.to_string(),
        performed_by: actor.name.clone(),
        performed_by_role: actor.role,
        timestamp: at,
        details,
    });
}

fn check_capability(
    report: &Report,
    capability: Capability,
    operation: &'static str,
    actor: &Actor,
) -> Result<(), WorkflowError> {
    let decision = access::decide(capability, report, &actor.id, actor.role);
    if decision.allowed {
        return Ok(());
    }
    Err(WorkflowError::precondition(
        &report.id,
        operation,
        Some(decision.rule_id),
        format!(
            "{} ({}) lacks {} access to a report that is {}",
            actor.id,
            actor.role,
            capability.as_str(),
            report.status
        ),
    ))
}
