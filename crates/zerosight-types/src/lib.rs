//! Stable DTOs and IDs used across the zerosight workspace.
//!
//! This crate is intentionally boring:
//! - data types for actors, reports, comments and the activity log
//! - stable rule IDs and activity action strings
//! - explain registry for access rules

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod model;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use model::{
    ActivityEntry, Actor, Comment, Credential, NewReport, ParseEnumError, Report, ReportPatch,
    ReportSeverity, ReportStatus, Role, Visibility,
};
