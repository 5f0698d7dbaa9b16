//! Report, activity and comment id allocation.

use std::collections::BTreeSet;
use zerosight_domain::policy::ReportNumbering;
use zerosight_types::Report;

pub trait IdGenerator {
    /// Allocate a report id not present in `existing`.
    fn report_id(&mut self, year: i32, existing: &[Report]) -> String;
    fn activity_id(&mut self) -> String;
    fn comment_id(&mut self) -> String;
}

/// Counter-based ids: `{prefix}-{year}-{NNN}`, `a{n}`, `c{n}`.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    numbering: ReportNumbering,
    next_report: u32,
    next_activity: u64,
    next_comment: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>, numbering: ReportNumbering) -> Self {
        Self {
            prefix: prefix.into(),
            numbering,
            next_report: 1,
            next_activity: 1,
            next_comment: 1,
        }
    }

    /// Start every counter past the highest number already used in `reports`.
    pub fn seeded_from(
        prefix: impl Into<String>,
        numbering: ReportNumbering,
        reports: &[Report],
    ) -> Self {
        let mut ids = Self::new(prefix, numbering);
        for r in reports {
            if let Some(n) = trailing_number(&r.id) {
                ids.next_report = ids.next_report.max(n + 1);
            }
            for entry in &r.activity_log {
                if let Some(n) = entry.id.strip_prefix('a').and_then(|s| s.parse::<u64>().ok()) {
                    ids.next_activity = ids.next_activity.max(n + 1);
                }
            }
            for comment in &r.comments {
                if let Some(n) = comment.id.strip_prefix('c').and_then(|s| s.parse::<u64>().ok()) {
                    ids.next_comment = ids.next_comment.max(n + 1);
                }
            }
        }
        ids
    }

    fn format(&self, year: i32, n: u32) -> String {
        format!("{}-{}-{:03}", self.prefix, year, n)
    }
}

impl IdGenerator for SequentialIds {
    fn report_id(&mut self, year: i32, existing: &[Report]) -> String {
        let taken: BTreeSet<&str> = existing.iter().map(|r| r.id.as_str()).collect();
        let mut n = match self.numbering {
            ReportNumbering::Monotonic => self.next_report,
            ReportNumbering::CollectionSize => existing.len() as u32 + 1,
        };
        while taken.contains(self.format(year, n).as_str()) {
            n += 1;
        }
        self.next_report = self.next_report.max(n + 1);
        self.format(year, n)
    }

    fn activity_id(&mut self) -> String {
        let id = format!("a{}", self.next_activity);
        self.next_activity += 1;
        id
    }

    fn comment_id(&mut self) -> String {
        let id = format!("c{}", self.next_comment);
        self.next_comment += 1;
        id
    }
}

fn trailing_number(id: &str) -> Option<u32> {
    id.rsplit('-').next()?.parse().ok()
}
