//! End-to-end workflow behaviour of `ReportService` over the seed collection.

use time::Duration;
use time::macros::datetime;
use zerosight_app::{ActorDirectory, ManualClock, ReportService, SequentialIds, initial_reports};
use zerosight_domain::access::can_view;
use zerosight_domain::{EffectiveConfig, Enforcement, ReportNumbering, ReportQuery, WorkflowError};
use zerosight_types::{
    Actor, NewReport, ReportPatch, ReportSeverity, ReportStatus, Role, Visibility, ids,
};

type TestService = ReportService<ManualClock, SequentialIds>;

fn service_with(config: EffectiveConfig) -> TestService {
    let reports = initial_reports();
    let ids = SequentialIds::seeded_from(&config.report_id_prefix, config.numbering, &reports);
    let clock = ManualClock::with_step(datetime!(2024-12-22 09:00 UTC), Duration::minutes(1));
    ReportService::with_parts(config, reports, clock, ids)
}

fn service() -> TestService {
    service_with(EffectiveConfig::default())
}

fn who(email: &str) -> Actor {
    ActorDirectory::default()
        .find_by_email(email)
        .cloned()
        .expect("known actor")
}

fn admin() -> Actor {
    who("admin@zerosight.com")
}
fn analyst() -> Actor {
    who("analyst@zerosight.com")
}
fn pentester() -> Actor {
    who("pentester@zerosight.com")
}
fn client() -> Actor {
    who("client@techcorp.com")
}

fn client_report(title: &str) -> NewReport {
    NewReport {
        title: title.to_string(),
        description: "Found during onboarding".to_string(),
        severity: ReportSeverity::High,
        visibility: Visibility::Client,
        attachments: Vec::new(),
    }
}

fn count_action(svc: &TestService, id: &str, action: &str) -> usize {
    svc.get(id)
        .expect("report")
        .activity_log
        .iter()
        .filter(|e| e.action == action)
        .count()
}

#[test]
fn client_draft_is_hidden_from_analyst() {
    let mut svc = service();
    let created = svc
        .create(client_report("Exposed admin panel"), &client())
        .expect("create");

    assert_eq!(created.id, "RPT-2024-004");
    assert_eq!(created.status, ReportStatus::Draft);
    assert_eq!(created.created_at, datetime!(2024-12-22 09:00 UTC));
    assert!(can_view(&created, "4", Role::Client));
    assert!(!can_view(&created, "2", Role::SocAnalyst));
    assert!(svc.visible_to(&analyst()).iter().all(|r| r.id != created.id));
}

#[test]
fn admin_approval_makes_client_report_visible_to_client() {
    let mut svc = service();
    let id = "RPT-2024-002";
    svc.update(
        id,
        ReportPatch {
            visibility: Some(Visibility::Client),
            ..ReportPatch::default()
        },
        &admin(),
    )
    .expect("admin may edit");

    let outsider = Actor {
        id: "9".to_string(),
        email: "other@techcorp.com".to_string(),
        name: "Other Client".to_string(),
        role: Role::Client,
    };
    assert!(svc.visible_to(&outsider).iter().all(|r| r.id != id));

    svc.review(id, true, &admin()).expect("review");
    let r = svc.get(id).expect("report");
    assert_eq!(r.status, ReportStatus::Approved);
    assert_eq!(r.reviewed_by.as_deref(), Some("System Administrator"));
    assert!(r.reviewed_at.is_some());
    assert!(svc.visible_to(&outsider).iter().any(|r| r.id == id));
}

#[test]
fn submit_twice_logs_once() {
    let mut svc = service();
    let id = svc.create(client_report("Weak TLS"), &client()).unwrap().id;

    svc.submit(&id, &client()).expect("first submit");
    let err = svc.submit(&id, &client()).unwrap_err();

    assert!(matches!(err, WorkflowError::PreconditionNotMet { .. }));
    assert_eq!(count_action(&svc, &id, ids::ACTION_REPORT_SUBMITTED), 1);
    assert_eq!(svc.get(&id).unwrap().status, ReportStatus::Submitted);
}

#[test]
fn review_appends_exactly_one_entry() {
    for (approved, status, action) in [
        (true, ReportStatus::Approved, ids::ACTION_REPORT_APPROVED),
        (false, ReportStatus::Rejected, ids::ACTION_REPORT_REJECTED),
    ] {
        let mut svc = service();
        let before = svc.get("RPT-2024-002").unwrap().activity_log.clone();

        svc.review("RPT-2024-002", approved, &admin()).expect("review");
        let r = svc.get("RPT-2024-002").unwrap();

        assert_eq!(r.status, status);
        assert_eq!(r.activity_log.len(), before.len() + 1);
        assert_eq!(&r.activity_log[..before.len()], before.as_slice());
        let last = r.last_activity().unwrap();
        assert_eq!(last.action, action);
        assert_eq!(last.performed_by_role, Role::Admin);
        assert!(last.details.is_some());
    }
}

#[test]
fn deleted_report_is_not_found_everywhere() {
    let mut svc = service();
    let removed = svc.delete("RPT-2024-003", &client()).expect("author deletes draft");
    assert_eq!(removed.id, "RPT-2024-003");

    let id = "RPT-2024-003";
    let results = [
        svc.update(id, ReportPatch::default(), &admin()),
        svc.submit(id, &client()),
        svc.begin_review(id, &admin()),
        svc.review(id, true, &admin()),
        svc.close(id, &admin()),
        svc.delete(id, &admin()).map(|_| ()),
        svc.add_comment(id, "hello", &admin()).map(|_| ()),
    ];
    for result in results {
        assert_eq!(result, Err(WorkflowError::not_found(id)));
    }
    assert!(svc.get(id).is_none());
    assert!(svc.decisions(id, &admin()).is_err());
}

#[test]
fn full_lifecycle_reaches_closed() {
    let mut svc = service();
    let id = svc.create(client_report("Open S3 bucket"), &pentester()).unwrap().id;

    svc.submit(&id, &pentester()).unwrap();
    svc.begin_review(&id, &admin()).unwrap();
    svc.review(&id, false, &admin()).unwrap();
    svc.close(&id, &admin()).unwrap();

    let r = svc.get(&id).unwrap();
    assert_eq!(r.status, ReportStatus::Closed);
    assert!(r.closed_at.is_some());
    let actions: Vec<_> = r.activity_log.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(
        actions,
        vec![
            ids::ACTION_REPORT_CREATED,
            ids::ACTION_REPORT_SUBMITTED,
            ids::ACTION_REVIEW_STARTED,
            ids::ACTION_REPORT_REJECTED,
            ids::ACTION_REPORT_CLOSED,
        ]
    );
    let stamps: Vec<_> = r.activity_log.iter().map(|e| e.timestamp).collect();
    assert!(stamps.windows(2).all(|w| w[0] < w[1]));

    assert!(svc.close(&id, &admin()).is_err());
}

#[test]
fn strict_failures_leave_collection_untouched() {
    let mut svc = service();
    let before = svc.reports().to_vec();

    assert!(svc.review("RPT-2024-003", true, &admin()).is_err());
    assert!(svc.review("RPT-2024-002", true, &analyst()).is_err());
    assert!(svc.update("RPT-2024-001", ReportPatch::default(), &pentester()).is_err());
    assert!(svc.delete("RPT-2024-002", &analyst()).is_err());
    assert!(svc.add_comment("RPT-2024-002", "hi", &client()).is_err());
    assert!(svc.add_comment("RPT-2024-002", "   ", &pentester()).is_err());
    assert!(svc.create(client_report(" "), &client()).is_err());

    assert_eq!(svc.reports(), before.as_slice());
}

#[test]
fn trust_caller_reproduces_unguarded_review() {
    let mut svc = service_with(EffectiveConfig {
        enforcement: Enforcement::TrustCaller,
        ..EffectiveConfig::default()
    });

    svc.review("RPT-2024-003", true, &analyst()).expect("no guard");
    let r = svc.get("RPT-2024-003").unwrap();
    assert_eq!(r.status, ReportStatus::Approved);
    assert_eq!(r.reviewed_by.as_deref(), Some("Sarah Chen"));

    // Submit keeps its built-in guard.
    assert!(svc.submit("RPT-2024-002", &analyst()).is_err());
}

#[test]
fn collection_size_numbering_stays_unique_after_delete() {
    let mut svc = service_with(EffectiveConfig {
        numbering: ReportNumbering::CollectionSize,
        ..EffectiveConfig::default()
    });

    svc.delete("RPT-2024-001", &admin()).unwrap();
    let id = svc.create(client_report("Reused number?"), &client()).unwrap().id;
    assert_eq!(id, "RPT-2024-004");

    let mut seen: Vec<_> = svc.reports().iter().map(|r| r.id.clone()).collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), svc.reports().len());
}

#[test]
fn audit_flags_add_update_and_comment_entries() {
    let mut quiet = service();
    let mut audited = service_with(EffectiveConfig {
        audit: zerosight_domain::AuditPolicy {
            record_updates: true,
            record_comments: true,
        },
        ..EffectiveConfig::default()
    });

    for svc in [&mut quiet, &mut audited] {
        svc.update(
            "RPT-2024-003",
            ReportPatch {
                severity: Some(ReportSeverity::Critical),
                ..ReportPatch::default()
            },
            &client(),
        )
        .unwrap();
        svc.add_comment("RPT-2024-003", "raised severity", &client()).unwrap();
    }

    assert_eq!(quiet.get("RPT-2024-003").unwrap().activity_log.len(), 1);

    let r = audited.get("RPT-2024-003").unwrap();
    let actions: Vec<_> = r.activity_log.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(
        actions,
        vec![ids::ACTION_REPORT_CREATED, ids::ACTION_REPORT_UPDATED, ids::ACTION_COMMENT_ADDED]
    );
    assert_eq!(r.activity_log[1].details.as_deref(), Some("Changed: severity"));
    assert_eq!(r.comments.len(), 1);
    assert_eq!(r.comments[0].id, "c2");
}

#[test]
fn search_and_summary_respect_visibility() {
    let svc = service();

    let q = ReportQuery {
        text: Some("injection".to_string()),
        ..ReportQuery::default()
    };
    assert_eq!(svc.search(&client(), &q).len(), 1);
    assert!(svc.search(&analyst(), &q).is_empty());

    let admin_summary = svc.summary(&admin());
    assert_eq!(admin_summary.total, 3);
    assert_eq!(admin_summary.pending_review, 1);
    assert_eq!(admin_summary.critical, 1);

    let client_summary = svc.summary(&client());
    assert_eq!(client_summary.total, 2);
    assert_eq!(client_summary.count(ReportStatus::Draft), 1);
}

#[test]
fn visible_reports_outlive_the_actor_borrow() {
    let svc = service();
    let (visible, matches) = {
        let viewer = client();
        let query = ReportQuery {
            text: Some("sql".to_string()),
            ..ReportQuery::default()
        };
        (svc.visible_to(&viewer), svc.search(&viewer, &query))
    };

    let ids: Vec<&str> = visible.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["RPT-2024-001", "RPT-2024-003"]);
    assert_eq!(matches.len(), 1);
}
