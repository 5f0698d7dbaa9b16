use std::collections::BTreeMap;
use zerosight_types::{Report, ReportSeverity, ReportStatus};

/// Filter over a report list. Empty fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub text: Option<String>,
    pub status: Option<ReportStatus>,
    pub severity: Option<ReportSeverity>,
}

impl ReportQuery {
    pub fn matches(&self, report: &Report) -> bool {
        if self.status.is_some_and(|s| s != report.status) {
            return false;
        }
        if self.severity.is_some_and(|s| s != report.severity) {
            return false;
        }
        match self.text.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                [&report.title, &report.description, &report.id]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }
}

/// Dashboard counts over a set of reports.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub total: u32,
    pub pending_review: u32,
    pub critical: u32,
    pub by_status: BTreeMap<ReportStatus, u32>,
}

impl ReportSummary {
    pub fn from_reports<'a>(reports: impl IntoIterator<Item = &'a Report>) -> Self {
        let mut summary = ReportSummary::default();
        for r in reports {
            summary.total += 1;
            if r.status.is_pending_review() {
                summary.pending_review += 1;
            }
            if r.severity == ReportSeverity::Critical {
                summary.critical += 1;
            }
            *summary.by_status.entry(r.status).or_insert(0) += 1;
        }
        summary
    }

    pub fn count(&self, status: ReportStatus) -> u32 {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}
