//! Fuzz target for scenario parsing and replay.
//!
//! Goal: replaying any parseable scenario against the seed collection should **never panic**.
//! Steps may fail with workflow errors; the collection must stay consistent.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_scenario_replay
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;
use zerosight_app::{
    ActorDirectory, ManualClock, ReportService, SequentialIds, initial_reports,
    parse_scenario_toml, run_scenario,
};
use time::{Duration, OffsetDateTime};
use zerosight_domain::EffectiveConfig;

fuzz_target!(|data: &[u8]| {
    // Keep inputs small; replay cost grows with step count
    if data.len() > 8 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(scenario) = parse_scenario_toml(text) else {
        return;
    };

    let config = EffectiveConfig::default();
    let reports = initial_reports();
    let ids = SequentialIds::seeded_from(&config.report_id_prefix, config.numbering, &reports);
    let clock = ManualClock::with_step(OffsetDateTime::UNIX_EPOCH, Duration::seconds(1));
    let mut service = ReportService::with_parts(config, reports, clock, ids);
    let directory = ActorDirectory::default();

    if run_scenario(&mut service, &directory, &scenario).is_ok() {
        let mut seen = BTreeSet::new();
        for report in service.reports() {
            assert!(seen.insert(report.id.clone()), "duplicate report id {}", report.id);
        }
    }
});
