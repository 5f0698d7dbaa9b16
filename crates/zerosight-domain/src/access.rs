//! Access evaluator: who may do what with a report.
//!
//! Every predicate is a pure function of `(report, actor_id, role)`. Each one is backed by a
//! `decide_*` function that also names the clause that produced the answer.

use zerosight_types::{Report, ReportStatus, Role, Visibility, ids};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    View,
    Edit,
    Delete,
    Submit,
    Review,
    BeginReview,
    Close,
    Comment,
}

impl Capability {
    pub const ALL: [Capability; 8] = [
        Capability::View,
        Capability::Edit,
        Capability::Delete,
        Capability::Submit,
        Capability::Review,
        Capability::BeginReview,
        Capability::Close,
        Capability::Comment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::View => "view",
            Capability::Edit => "edit",
            Capability::Delete => "delete",
            Capability::Submit => "submit",
            Capability::Review => "review",
            Capability::BeginReview => "begin-review",
            Capability::Close => "close",
            Capability::Comment => "comment",
        }
    }
}

/// Outcome of evaluating one capability, with the rule that decided it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessDecision {
    pub capability: Capability,
    pub allowed: bool,
    pub rule_id: &'static str,
}

impl AccessDecision {
    fn allow(capability: Capability, rule_id: &'static str) -> Self {
        Self {
            capability,
            allowed: true,
            rule_id,
        }
    }

    fn deny(capability: Capability) -> Self {
        Self {
            capability,
            allowed: false,
            rule_id: ids::RULE_DENY,
        }
    }
}

pub fn decide(
    capability: Capability,
    report: &Report,
    actor_id: &str,
    role: Role,
) -> AccessDecision {
    match capability {
        Capability::View => decide_view(report, actor_id, role),
        Capability::Edit => decide_admin_or_author_draft(
            Capability::Edit,
            report,
            actor_id,
            role,
            ids::RULE_EDIT_ADMIN,
            ids::RULE_EDIT_AUTHOR_DRAFT,
        ),
        Capability::Delete => decide_admin_or_author_draft(
            Capability::Delete,
            report,
            actor_id,
            role,
            ids::RULE_DELETE_ADMIN,
            ids::RULE_DELETE_AUTHOR_DRAFT,
        ),
        Capability::Submit => {
            if report.is_authored_by(actor_id) && report.status == ReportStatus::Draft {
                AccessDecision::allow(capability, ids::RULE_SUBMIT_AUTHOR_DRAFT)
            } else {
                AccessDecision::deny(capability)
            }
        }
        Capability::Review => {
            if role == Role::Admin && report.status.is_pending_review() {
                AccessDecision::allow(capability, ids::RULE_REVIEW_ADMIN_PENDING)
            } else {
                AccessDecision::deny(capability)
            }
        }
        Capability::BeginReview => {
            if role == Role::Admin && report.status == ReportStatus::Submitted {
                AccessDecision::allow(capability, ids::RULE_BEGIN_REVIEW_ADMIN_SUBMITTED)
            } else {
                AccessDecision::deny(capability)
            }
        }
        Capability::Close => {
            if role == Role::Admin && report.status.is_decided() {
                AccessDecision::allow(capability, ids::RULE_CLOSE_ADMIN_DECIDED)
            } else {
                AccessDecision::deny(capability)
            }
        }
        Capability::Comment => {
            if decide_view(report, actor_id, role).allowed {
                AccessDecision::allow(capability, ids::RULE_COMMENT_VIEWER)
            } else {
                AccessDecision::deny(capability)
            }
        }
    }
}

/// Evaluate every capability, in `Capability::ALL` order.
pub fn decide_all(report: &Report, actor_id: &str, role: Role) -> Vec<AccessDecision> {
    Capability::ALL
        .iter()
        .map(|&capability| decide(capability, report, actor_id, role))
        .collect()
}

// First matching clause wins.
fn decide_view(report: &Report, actor_id: &str, role: Role) -> AccessDecision {
    let allow = |rule_id| AccessDecision::allow(Capability::View, rule_id);

    if role == Role::Admin {
        return allow(ids::RULE_VIEW_ADMIN);
    }
    if report.is_authored_by(actor_id) {
        return allow(ids::RULE_VIEW_AUTHOR);
    }

    let approved = report.status == ReportStatus::Approved;
    match (role, report.visibility) {
        (Role::SocAnalyst, Visibility::Internal | Visibility::Admin) => {
            allow(ids::RULE_VIEW_SOC_ANALYST)
        }
        (Role::Pentester, Visibility::Internal) => allow(ids::RULE_VIEW_PENTESTER_INTERNAL),
        (Role::Pentester, Visibility::Client) if approved => {
            allow(ids::RULE_VIEW_PENTESTER_APPROVED_CLIENT)
        }
        (Role::Client, Visibility::Client) if approved => allow(ids::RULE_VIEW_CLIENT_APPROVED),
        _ => AccessDecision::deny(Capability::View),
    }
}

fn decide_admin_or_author_draft(
    capability: Capability,
    report: &Report,
    actor_id: &str,
    role: Role,
    admin_rule: &'static str,
    author_rule: &'static str,
) -> AccessDecision {
    if role == Role::Admin {
        return AccessDecision::allow(capability, admin_rule);
    }
    if report.is_authored_by(actor_id) && report.status == ReportStatus::Draft {
        return AccessDecision::allow(capability, author_rule);
    }
    AccessDecision::deny(capability)
}

pub fn can_view(report: &Report, actor_id: &str, role: Role) -> bool {
    decide(Capability::View, report, actor_id, role).allowed
}

pub fn can_edit(report: &Report, actor_id: &str, role: Role) -> bool {
    decide(Capability::Edit, report, actor_id, role).allowed
}

pub fn can_delete(report: &Report, actor_id: &str, role: Role) -> bool {
    decide(Capability::Delete, report, actor_id, role).allowed
}

pub fn can_submit(report: &Report, actor_id: &str) -> bool {
    report.is_authored_by(actor_id) && report.status == ReportStatus::Draft
}

pub fn can_review(report: &Report, role: Role) -> bool {
    role == Role::Admin && report.status.is_pending_review()
}

pub fn can_comment(report: &Report, actor_id: &str, role: Role) -> bool {
    can_view(report, actor_id, role)
}

/// Reports the actor may view, in collection order.
pub fn visible_reports<'a>(
    reports: &'a [Report],
    actor_id: &str,
    role: Role,
) -> impl Iterator<Item = &'a Report> {
    reports
        .iter()
        .filter(move |report| can_view(report, actor_id, role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::report;

    #[test]
    fn view_rules_follow_clause_order() {
        let cases = [
            // (author, visibility, status, actor, role, expected rule)
            ("3", Visibility::Admin, ReportStatus::Draft, "1", Role::Admin, ids::RULE_VIEW_ADMIN),
            ("1", Visibility::Client, ReportStatus::Draft, "1", Role::Admin, ids::RULE_VIEW_ADMIN),
            ("4", Visibility::Admin, ReportStatus::Draft, "4", Role::Client, ids::RULE_VIEW_AUTHOR),
            (
                "3",
                Visibility::Admin,
                ReportStatus::Rejected,
                "2",
                Role::SocAnalyst,
                ids::RULE_VIEW_SOC_ANALYST,
            ),
            (
                "3",
                Visibility::Client,
                ReportStatus::Approved,
                "2",
                Role::SocAnalyst,
                ids::RULE_DENY,
            ),
            (
                "2",
                Visibility::Internal,
                ReportStatus::Draft,
                "3",
                Role::Pentester,
                ids::RULE_VIEW_PENTESTER_INTERNAL,
            ),
            (
                "2",
                Visibility::Client,
                ReportStatus::Approved,
                "3",
                Role::Pentester,
                ids::RULE_VIEW_PENTESTER_APPROVED_CLIENT,
            ),
            (
                "2",
                Visibility::Client,
                ReportStatus::Submitted,
                "3",
                Role::Pentester,
                ids::RULE_DENY,
            ),
            ("2", Visibility::Admin, ReportStatus::Approved, "3", Role::Pentester, ids::RULE_DENY),
            (
                "3",
                Visibility::Client,
                ReportStatus::Approved,
                "4",
                Role::Client,
                ids::RULE_VIEW_CLIENT_APPROVED,
            ),
            ("3", Visibility::Client, ReportStatus::Closed, "4", Role::Client, ids::RULE_DENY),
            ("3", Visibility::Internal, ReportStatus::Approved, "4", Role::Client, ids::RULE_DENY),
        ];

        for (author, visibility, status, actor, role, expected) in cases {
            let r = report("RPT-2024-001", author, Role::Pentester, visibility, status);
            let decision = decide(Capability::View, &r, actor, role);
            assert_eq!(
                decision.rule_id, expected,
                "author={author} visibility={visibility} status={status} actor={actor} role={role}"
            );
            assert_eq!(decision.allowed, expected != ids::RULE_DENY);
        }
    }

    #[test]
    fn edit_and_delete_share_admin_or_author_draft_shape() {
        let draft = report(
            "RPT-2024-003",
            "4",
            Role::Client,
            Visibility::Internal,
            ReportStatus::Draft,
        );
        let submitted = report(
            "RPT-2024-004",
            "4",
            Role::Client,
            Visibility::Internal,
            ReportStatus::Submitted,
        );

        assert!(can_edit(&draft, "4", Role::Client));
        assert!(can_delete(&draft, "4", Role::Client));
        assert!(!can_edit(&submitted, "4", Role::Client));
        assert!(!can_delete(&submitted, "4", Role::Client));
        assert!(!can_edit(&draft, "2", Role::SocAnalyst));
        assert!(can_edit(&submitted, "1", Role::Admin));
        assert!(can_delete(&submitted, "1", Role::Admin));

        assert_eq!(
            decide(Capability::Edit, &draft, "4", Role::Client).rule_id,
            ids::RULE_EDIT_AUTHOR_DRAFT
        );
        assert_eq!(
            decide(Capability::Delete, &submitted, "1", Role::Admin).rule_id,
            ids::RULE_DELETE_ADMIN
        );
    }

    #[test]
    fn submit_requires_author_and_draft_even_for_admin() {
        let draft = report(
            "RPT-2024-003",
            "4",
            Role::Client,
            Visibility::Client,
            ReportStatus::Draft,
        );
        assert!(can_submit(&draft, "4"));
        assert!(!can_submit(&draft, "1"));
        assert!(!decide(Capability::Submit, &draft, "1", Role::Admin).allowed);
    }

    #[test]
    fn review_requires_admin_and_pending_status() {
        for status in ReportStatus::ALL {
            let r = report("RPT-2024-002", "2", Role::SocAnalyst, Visibility::Internal, status);
            assert_eq!(can_review(&r, Role::Admin), status.is_pending_review());
            assert!(!can_review(&r, Role::SocAnalyst));
        }
    }

    #[test]
    fn begin_review_and_close_follow_status() {
        let submitted = report(
            "RPT-2024-005",
            "3",
            Role::Pentester,
            Visibility::Client,
            ReportStatus::Submitted,
        );
        let rejected = report(
            "RPT-2024-006",
            "3",
            Role::Pentester,
            Visibility::Client,
            ReportStatus::Rejected,
        );

        assert!(decide(Capability::BeginReview, &submitted, "1", Role::Admin).allowed);
        assert!(!decide(Capability::BeginReview, &rejected, "1", Role::Admin).allowed);
        assert!(decide(Capability::Close, &rejected, "1", Role::Admin).allowed);
        assert!(!decide(Capability::Close, &submitted, "1", Role::Admin).allowed);
        assert!(!decide(Capability::Close, &rejected, "3", Role::Pentester).allowed);
    }

    #[test]
    fn comment_follows_view() {
        let r = report(
            "RPT-2024-002",
            "2",
            Role::SocAnalyst,
            Visibility::Internal,
            ReportStatus::Submitted,
        );
        assert!(can_comment(&r, "3", Role::Pentester));
        assert!(!can_comment(&r, "4", Role::Client));
        assert_eq!(
            decide(Capability::Comment, &r, "3", Role::Pentester).rule_id,
            ids::RULE_COMMENT_VIEWER
        );
    }

    #[test]
    fn decide_all_covers_every_capability_in_order() {
        let r = report(
            "RPT-2024-001",
            "3",
            Role::Pentester,
            Visibility::Client,
            ReportStatus::Approved,
        );
        let decisions = decide_all(&r, "4", Role::Client);
        let caps: Vec<_> = decisions.iter().map(|d| d.capability).collect();
        assert_eq!(caps, Capability::ALL.to_vec());
        assert!(decisions[0].allowed);
        assert!(!decisions[1].allowed);
    }

    #[test]
    fn visible_reports_keeps_collection_order() {
        let reports = vec![
            report(
                "RPT-2024-001",
                "3",
                Role::Pentester,
                Visibility::Client,
                ReportStatus::Approved,
            ),
            report(
                "RPT-2024-002",
                "2",
                Role::SocAnalyst,
                Visibility::Internal,
                ReportStatus::UnderReview,
            ),
            report("RPT-2024-003", "4", Role::Client, Visibility::Internal, ReportStatus::Draft),
        ];

        let ids_for = |actor: &str, role| -> Vec<String> {
            visible_reports(&reports, actor, role)
                .map(|r| r.id.clone())
                .collect()
        };

        assert_eq!(ids_for("1", Role::Admin).len(), 3);
        assert_eq!(ids_for("2", Role::SocAnalyst), vec!["RPT-2024-002", "RPT-2024-003"]);
        assert_eq!(
            ids_for("3", Role::Pentester),
            vec!["RPT-2024-001", "RPT-2024-002", "RPT-2024-003"]
        );
        assert_eq!(ids_for("4", Role::Client), vec!["RPT-2024-001", "RPT-2024-003"]);
    }
}
