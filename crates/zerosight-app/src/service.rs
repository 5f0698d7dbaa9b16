//! `ReportService`: the report collection and every mutation on it.
//!
//! Guards run before any id is minted or any field is touched, so a failed operation leaves the
//! collection exactly as it was.

use crate::clock::{Clock, SystemClock};
use crate::idgen::{IdGenerator, SequentialIds};
use zerosight_domain::access::{self, AccessDecision};
use zerosight_domain::workflow::{self, Transition};
use zerosight_domain::{EffectiveConfig, ReportQuery, ReportSummary, WorkflowError};
use zerosight_types::{Actor, Comment, NewReport, Report, ReportPatch, ids};

pub struct ReportService<C = SystemClock, G = SequentialIds> {
    reports: Vec<Report>,
    config: EffectiveConfig,
    clock: C,
    ids: G,
}

impl ReportService<SystemClock, SequentialIds> {
    /// Service on the wall clock, with id counters continuing from `reports`.
    pub fn new(config: EffectiveConfig, reports: Vec<Report>) -> Self {
        let ids = SequentialIds::seeded_from(&config.report_id_prefix, config.numbering, &reports);
        Self::with_parts(config, reports, SystemClock, ids)
    }
}

impl<C: Clock, G: IdGenerator> ReportService<C, G> {
    pub fn with_parts(config: EffectiveConfig, reports: Vec<Report>, clock: C, ids: G) -> Self {
        Self {
            reports,
            config,
            clock,
            ids,
        }
    }

    pub fn config(&self) -> &EffectiveConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Whole collection, in insertion order.
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn get(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    pub fn visible_to(&self, actor: &Actor) -> Vec<&Report> {
        access::visible_reports(&self.reports, &actor.id, actor.role).collect()
    }

    pub fn search(&self, actor: &Actor, query: &ReportQuery) -> Vec<&Report> {
        access::visible_reports(&self.reports, &actor.id, actor.role)
            .filter(|r| query.matches(r))
            .collect()
    }

    pub fn summary(&self, actor: &Actor) -> ReportSummary {
        ReportSummary::from_reports(access::visible_reports(&self.reports, &actor.id, actor.role))
    }

    /// Every capability decision for `actor` on report `id`.
    pub fn decisions(&self, id: &str, actor: &Actor) -> Result<Vec<AccessDecision>, WorkflowError> {
        let report = self.get(id).ok_or_else(|| WorkflowError::not_found(id))?;
        Ok(access::decide_all(report, &actor.id, actor.role))
    }

    pub fn create(&mut self, input: NewReport, author: &Actor) -> Result<Report, WorkflowError> {
        workflow::validate_new_report(&input).inspect_err(|e| rejected(e, author))?;

        let now = self.clock.now();
        let id = self.ids.report_id(now.year(), &self.reports);
        let entry_id = self.ids.activity_id();
        let report = workflow::new_report(id, input, author, now, entry_id);

        tracing::info!(
            report_id = %report.id,
            actor_id = %author.id,
            action = ids::ACTION_REPORT_CREATED,
            "report created"
        );
        self.reports.push(report.clone());
        Ok(report)
    }

    pub fn update(
        &mut self,
        id: &str,
        patch: ReportPatch,
        actor: &Actor,
    ) -> Result<(), WorkflowError> {
        let idx = self.position(id, actor)?;
        workflow::check_update(&self.reports[idx], &patch, actor, &self.config)
            .inspect_err(|e| rejected(e, actor))?;

        let now = self.clock.now();
        let changed = workflow::apply_patch(&mut self.reports[idx], patch, now);
        if self.config.audit.record_updates {
            let entry_id = self.ids.activity_id();
            let details = (!changed.is_empty()).then(|| format!("Changed: {}", changed.join(", ")));
            workflow::record_activity(
                &mut self.reports[idx],
                ids::ACTION_REPORT_UPDATED,
                actor,
                now,
                entry_id,
                details,
            );
        }

        tracing::info!(report_id = %id, actor_id = %actor.id, changed = ?changed, "report updated");
        Ok(())
    }

    pub fn submit(&mut self, id: &str, actor: &Actor) -> Result<(), WorkflowError> {
        self.transition(id, Transition::Submit, actor)
    }

    pub fn begin_review(&mut self, id: &str, reviewer: &Actor) -> Result<(), WorkflowError> {
        self.transition(id, Transition::BeginReview, reviewer)
    }

    pub fn review(
        &mut self,
        id: &str,
        approved: bool,
        reviewer: &Actor,
    ) -> Result<(), WorkflowError> {
        self.transition(id, Transition::review(approved), reviewer)
    }

    pub fn close(&mut self, id: &str, actor: &Actor) -> Result<(), WorkflowError> {
        self.transition(id, Transition::Close, actor)
    }

    /// Remove the report with its comments and activity log.
    pub fn delete(&mut self, id: &str, actor: &Actor) -> Result<Report, WorkflowError> {
        let idx = self.position(id, actor)?;
        workflow::check_delete(&self.reports[idx], actor, &self.config)
            .inspect_err(|e| rejected(e, actor))?;

        let removed = self.reports.remove(idx);
        tracing::info!(report_id = %id, actor_id = %actor.id, "report deleted");
        Ok(removed)
    }

    pub fn add_comment(
        &mut self,
        id: &str,
        content: &str,
        author: &Actor,
    ) -> Result<Comment, WorkflowError> {
        let idx = self.position(id, author)?;
        workflow::check_comment(&self.reports[idx], content, author, &self.config)
            .inspect_err(|e| rejected(e, author))?;

        let now = self.clock.now();
        let comment = workflow::new_comment(self.ids.comment_id(), author, content, now);
        workflow::append_comment(&mut self.reports[idx], comment.clone());
        if self.config.audit.record_comments {
            let entry_id = self.ids.activity_id();
            workflow::record_activity(
                &mut self.reports[idx],
                ids::ACTION_COMMENT_ADDED,
                author,
                now,
                entry_id,
                None,
            );
        }

        tracing::info!(
            report_id = %id,
            actor_id = %author.id,
            comment_id = %comment.id,
            "comment added"
        );
        Ok(comment)
    }

    fn transition(
        &mut self,
        id: &str,
        transition: Transition,
        actor: &Actor,
    ) -> Result<(), WorkflowError> {
        let idx = self.position(id, actor)?;
        workflow::check_transition(&self.reports[idx], transition, actor, &self.config)
            .inspect_err(|e| rejected(e, actor))?;

        let now = self.clock.now();
        let entry_id = self.ids.activity_id();
        workflow::apply_transition(&mut self.reports[idx], transition, actor, now, entry_id);

        tracing::info!(
            report_id = %id,
            actor_id = %actor.id,
            action = transition.action(),
            "report transition"
        );
        Ok(())
    }

    fn position(&self, id: &str, actor: &Actor) -> Result<usize, WorkflowError> {
        self.reports
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| WorkflowError::not_found(id))
            .inspect_err(|e| rejected(e, actor))
    }
}

fn rejected(err: &WorkflowError, actor: &Actor) {
    tracing::debug!(actor_id = %actor.id, code = err.code(), error = %err, "operation rejected");
}
