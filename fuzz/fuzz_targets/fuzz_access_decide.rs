//! Fuzz target for the access evaluator.
//!
//! Goal: `decide` is total, and the invariants that hold for every role hold for
//! arbitrary report states and actor ids.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_access_decide
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use zerosight_app::initial_reports;
use zerosight_domain::{Capability, decide, decide_all};
use zerosight_types::{ReportStatus, Role, Visibility};

#[derive(Arbitrary, Debug)]
struct AccessInput {
    status: u8,
    visibility: u8,
    role: u8,
    author_id: String,
    actor_id: String,
}

fn pick<T: Copy, const N: usize>(all: [T; N], index: u8) -> T {
    all[usize::from(index) % N]
}

fuzz_target!(|input: AccessInput| {
    let Some(mut report) = initial_reports().into_iter().next() else {
        return;
    };
    report.status = pick(ReportStatus::ALL, input.status);
    report.visibility = pick(Visibility::ALL, input.visibility);
    report.author_id = input.author_id;
    let role = pick(Role::ALL, input.role);

    let decisions = decide_all(&report, &input.actor_id, role);
    assert_eq!(decisions.len(), Capability::ALL.len());

    let view = decide(Capability::View, &report, &input.actor_id, role);
    let comment = decide(Capability::Comment, &report, &input.actor_id, role);
    assert_eq!(view.allowed, comment.allowed);

    if report.author_id == input.actor_id || role == Role::Admin {
        assert!(view.allowed);
    }
    if role != Role::Admin && report.status != ReportStatus::Draft {
        assert!(!decide(Capability::Edit, &report, &input.actor_id, role).allowed);
    }
});
