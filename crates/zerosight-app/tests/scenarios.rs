//! Replays the scenario fixtures under `tests/fixtures/scenarios`.

use camino::Utf8PathBuf;
use time::Duration;
use time::macros::datetime;
use zerosight_app::{
    ActorDirectory, ManualClock, ReportService, SequentialIds, StepResult, initial_reports,
    parse_scenario_toml, run_scenario,
};
use zerosight_domain::EffectiveConfig;
use zerosight_types::ReportStatus;

fn fixtures_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures/scenarios")
}

fn replay(name: &str) -> zerosight_app::ScenarioOutcome {
    let text = std::fs::read_to_string(fixtures_dir().join(name)).expect("read fixture");
    let scenario = parse_scenario_toml(&text).expect("parse fixture");

    let config = EffectiveConfig::default();
    let reports = initial_reports();
    let ids = SequentialIds::seeded_from(&config.report_id_prefix, config.numbering, &reports);
    let clock = ManualClock::with_step(datetime!(2024-12-22 09:00 UTC), Duration::minutes(1));
    let mut svc = ReportService::with_parts(config, reports, clock, ids);

    run_scenario(&mut svc, &ActorDirectory::default(), &scenario).expect("replay")
}

#[test]
fn every_fixture_meets_its_expectations() {
    let mut names: Vec<_> = std::fs::read_dir(fixtures_dir())
        .expect("fixtures dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".toml"))
        .collect();
    names.sort();
    assert!(!names.is_empty());

    for name in names {
        let outcome = replay(&name);
        let failures: Vec<_> = outcome.failures().collect();
        assert!(failures.is_empty(), "{name}: {failures:#?}");
    }
}

#[test]
fn client_draft_fixture_ends_hidden_from_analyst() {
    let outcome = replay("client_draft_hidden.toml");
    assert_eq!(outcome.steps[0].report_id.as_deref(), Some("RPT-2024-004"));
    assert!(outcome.reports.iter().all(|r| r.id != "RPT-2024-004"));
}

#[test]
fn approval_fixture_ends_visible_to_client() {
    let outcome = replay("admin_approval.toml");
    let r = outcome
        .reports
        .iter()
        .find(|r| r.id == "RPT-2024-004")
        .expect("visible to client");
    assert_eq!(r.status, ReportStatus::Approved);
    assert_eq!(r.reviewed_by.as_deref(), Some("System Administrator"));
    assert!(
        outcome
            .steps
            .iter()
            .any(|s| s.result == StepResult::PreconditionNotMet)
    );
}
