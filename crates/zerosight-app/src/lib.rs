//! Use case orchestration for zerosight.
//!
//! This crate provides the application layer: the report service that owns the collection, the
//! actor directory, the persisted session, scenario replay and explain output. It delegates every
//! decision to `zerosight-domain`.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod clock;
mod directory;
mod explain;
mod idgen;
mod scenario;
mod seed;
mod service;
mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use directory::{ActorDirectory, AuthError, default_credentials};
pub use explain::{
    ExplainOutput, format_decisions, format_explanation, format_not_found, run_explain,
};
pub use idgen::{IdGenerator, SequentialIds};
pub use scenario::{
    LAST_CREATED, Scenario, ScenarioOutcome, Step, StepOp, StepOutcome, StepResult,
    parse_scenario_toml, run_scenario,
};
pub use seed::initial_reports;
pub use service::ReportService;
pub use session::{JsonFileStore, KeyValueStore, MemoryStore, SessionManager};
