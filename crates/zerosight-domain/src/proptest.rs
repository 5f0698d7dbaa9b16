//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Author visibility and the edit lock on non-draft reports
//! - Transitions never skipping a state
//! - Activity logs growing in time order

use crate::access::{Capability, can_edit, can_view, decide};
use crate::policy::{EffectiveConfig, Enforcement};
use crate::test_support::{T0, actor, report};
use crate::workflow::{Transition, apply_transition, check_transition, new_report};
use proptest::prelude::*;
use time::Duration;
use zerosight_types::{NewReport, ReportSeverity, ReportStatus, Role, Visibility};

// ============================================================================
// Strategies
// ============================================================================

fn arb_role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

fn arb_status() -> impl Strategy<Value = ReportStatus> {
    prop::sample::select(ReportStatus::ALL.to_vec())
}

fn arb_severity() -> impl Strategy<Value = ReportSeverity> {
    prop::sample::select(ReportSeverity::ALL.to_vec())
}

fn arb_visibility() -> impl Strategy<Value = Visibility> {
    prop::sample::select(Visibility::ALL.to_vec())
}

fn arb_actor_id() -> impl Strategy<Value = String> {
    (1u32..8).prop_map(|n| n.to_string())
}

fn arb_transition() -> impl Strategy<Value = Transition> {
    prop::sample::select(vec![
        Transition::Submit,
        Transition::BeginReview,
        Transition::Approve,
        Transition::Reject,
        Transition::Close,
    ])
}

fn arb_enforcement() -> impl Strategy<Value = Enforcement> {
    prop_oneof![Just(Enforcement::Strict), Just(Enforcement::TrustCaller)]
}

// ============================================================================
// Access properties
// ============================================================================

proptest! {
    #[test]
    fn author_can_always_view_own_report(
        author in arb_actor_id(),
        role in arb_role(),
        visibility in arb_visibility(),
        status in arb_status(),
    ) {
        let r = report("RPT-2024-001", &author, role, visibility, status);
        prop_assert!(can_view(&r, &author, role));
    }

    #[test]
    fn admin_sees_and_edits_everything(
        author in arb_actor_id(),
        author_role in arb_role(),
        visibility in arb_visibility(),
        status in arb_status(),
    ) {
        let r = report("RPT-2024-001", &author, author_role, visibility, status);
        prop_assert!(can_view(&r, "admin", Role::Admin));
        prop_assert!(can_edit(&r, "admin", Role::Admin));
    }

    #[test]
    fn non_admin_cannot_edit_outside_draft(
        author in arb_actor_id(),
        actor_id in arb_actor_id(),
        role in arb_role().prop_filter("non-admin", |r| *r != Role::Admin),
        visibility in arb_visibility(),
        status in arb_status().prop_filter("non-draft", |s| *s != ReportStatus::Draft),
    ) {
        let r = report("RPT-2024-001", &author, role, visibility, status);
        prop_assert!(!can_edit(&r, &actor_id, role));
        prop_assert!(!decide(Capability::Delete, &r, &actor_id, role).allowed);
    }

    #[test]
    fn comment_is_exactly_view(
        author in arb_actor_id(),
        actor_id in arb_actor_id(),
        role in arb_role(),
        visibility in arb_visibility(),
        status in arb_status(),
    ) {
        let r = report("RPT-2024-001", &author, Role::Pentester, visibility, status);
        prop_assert_eq!(
            decide(Capability::Comment, &r, &actor_id, role).allowed,
            can_view(&r, &actor_id, role)
        );
    }

    #[test]
    fn creator_can_view_new_report(
        role in arb_role(),
        severity in arb_severity(),
        visibility in arb_visibility(),
        title in "[A-Za-z][A-Za-z0-9 ]{0,30}",
    ) {
        let author = actor("9", role);
        let input = NewReport {
            title,
            description: String::new(),
            severity,
            visibility,
            attachments: Vec::new(),
        };
        let r = new_report("RPT-2024-009".to_string(), input, &author, T0, "a1".to_string());
        prop_assert_eq!(r.status, ReportStatus::Draft);
        prop_assert!(can_view(&r, &author.id, role));
    }
}

// ============================================================================
// Workflow properties
// ============================================================================

proptest! {
    /// Under strict enforcement every accepted transition is a state-machine edge, and the log
    /// grows by one entry with non-decreasing timestamps.
    #[test]
    fn strict_transitions_follow_state_machine(
        steps in prop::collection::vec((arb_transition(), prop::bool::ANY), 1..12),
    ) {
        let author = actor("2", Role::SocAnalyst);
        let admin = actor("1", Role::Admin);
        let cfg = EffectiveConfig::default();
        let mut r = report(
            "RPT-2024-002",
            "2",
            Role::SocAnalyst,
            Visibility::Internal,
            ReportStatus::Draft,
        );

        for (i, (transition, as_admin)) in steps.into_iter().enumerate() {
            let who = if as_admin { &admin } else { &author };
            let before = r.status;
            let log_len = r.activity_log.len();

            if check_transition(&r, transition, who, &cfg).is_ok() {
                prop_assert!(before.can_transition_to(transition.target()));
                let at = T0 + Duration::minutes(i as i64 + 1);
                apply_transition(&mut r, transition, who, at, format!("a{}", i + 2));
                prop_assert_eq!(r.activity_log.len(), log_len + 1);
            } else {
                prop_assert_eq!(r.status, before);
                prop_assert_eq!(r.activity_log.len(), log_len);
            }
        }

        let stamps: Vec<_> = r.activity_log.iter().map(|e| e.timestamp).collect();
        prop_assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn closed_reports_never_move(
        transition in arb_transition(),
        enforcement in arb_enforcement(),
        role in arb_role(),
    ) {
        let cfg = EffectiveConfig { enforcement, ..EffectiveConfig::default() };
        let who = actor("2", role);
        let r = report("RPT-2024-002", "2", role, Visibility::Internal, ReportStatus::Closed);
        // Trust-caller review is the one unguarded edge.
        let unguarded = enforcement == Enforcement::TrustCaller
            && matches!(transition, Transition::Approve | Transition::Reject);
        prop_assert_eq!(check_transition(&r, transition, &who, &cfg).is_ok(), unguarded);
    }
}
