//! Pure access and workflow evaluation (no IO).
//!
//! Input: reports and the acting identity, constructed elsewhere.
//! Output: access decisions, transition guards and in-place report effects.

#![forbid(unsafe_code)]

pub mod access;
pub mod error;
pub mod policy;
pub mod report;
pub mod sections;
pub mod workflow;

pub use access::{AccessDecision, Capability, decide, decide_all, visible_reports};
pub use error::WorkflowError;
pub use policy::{AuditPolicy, EffectiveConfig, Enforcement, ReportNumbering};
pub use report::{ReportQuery, ReportSummary};
pub use sections::{Section, sections_for};
pub use workflow::Transition;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod proptest;
