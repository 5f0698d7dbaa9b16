//! Scenario scripts: TOML lists of workflow steps replayed against a [`ReportService`].
//!
//! ```toml
//! view_as = "client@techcorp.com"
//!
//! [[step]]
//! as = "client@techcorp.com"
//! op = "create"
//! title = "Exposed admin panel"
//! severity = "high"
//! visibility = "client"
//!
//! [[step]]
//! as = "analyst@zerosight.com"
//! op = "submit"
//! report = "$last"
//! expect = "precondition_not_met"
//! ```

use crate::clock::Clock;
use crate::directory::ActorDirectory;
use crate::idgen::IdGenerator;
use crate::service::ReportService;
use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use zerosight_domain::WorkflowError;
use zerosight_types::{NewReport, Report, ReportPatch};

/// Stands for the id of the most recent successful `create`.
pub const LAST_CREATED: &str = "$last";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Scenario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email of the actor whose visible collection ends the outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_as: Option<String>,

    #[serde(rename = "step", default)]
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Step {
    /// Email of the acting user; must exist in the directory.
    #[serde(rename = "as")]
    pub actor: String,

    #[serde(flatten)]
    pub op: StepOp,

    /// Expected result; defaults to `ok`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<StepResult>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum StepOp {
    Create(NewReport),
    Update {
        report: String,
        #[serde(flatten)]
        patch: ReportPatch,
    },
    Submit {
        report: String,
    },
    BeginReview {
        report: String,
    },
    Review {
        report: String,
        approved: bool,
    },
    Close {
        report: String,
    },
    Delete {
        report: String,
    },
    Comment {
        report: String,
        content: String,
    },
}

impl StepOp {
    pub fn name(&self) -> &'static str {
        match self {
            StepOp::Create(_) => "create",
            StepOp::Update { .. } => "update",
            StepOp::Submit { .. } => "submit",
            StepOp::BeginReview { .. } => "begin-review",
            StepOp::Review { .. } => "review",
            StepOp::Close { .. } => "close",
            StepOp::Delete { .. } => "delete",
            StepOp::Comment { .. } => "comment",
        }
    }

    fn report_ref(&self) -> Option<&str> {
        match self {
            StepOp::Create(_) => None,
            StepOp::Update { report, .. }
            | StepOp::Submit { report }
            | StepOp::BeginReview { report }
            | StepOp::Review { report, .. }
            | StepOp::Close { report }
            | StepOp::Delete { report }
            | StepOp::Comment { report, .. } => Some(report.as_str()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StepResult {
    Ok,
    NotFound,
    PreconditionNotMet,
}

impl StepResult {
    pub fn as_str(self) -> &'static str {
        match self {
            StepResult::Ok => "ok",
            StepResult::NotFound => "not_found",
            StepResult::PreconditionNotMet => "precondition_not_met",
        }
    }
}

impl From<&WorkflowError> for StepResult {
    fn from(err: &WorkflowError) -> Self {
        match err {
            WorkflowError::NotFound { .. } => StepResult::NotFound,
            WorkflowError::PreconditionNotMet { .. } => StepResult::PreconditionNotMet,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepOutcome {
    pub index: usize,
    pub op: &'static str,
    pub actor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    pub result: StepResult,
    pub expected: StepResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StepOutcome {
    pub fn matched(&self) -> bool {
        self.result == self.expected
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub steps: Vec<StepOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_as: Option<String>,
    /// Reports visible to `view_as` (or the whole collection when unset) after the last step.
    pub reports: Vec<Report>,
}

impl ScenarioOutcome {
    /// Steps whose result differs from their expectation.
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|s| !s.matched())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

pub fn parse_scenario_toml(input: &str) -> anyhow::Result<Scenario> {
    let scenario: Scenario = toml::from_str(input)?;
    Ok(scenario)
}

/// Replay every step in order. Workflow errors are recorded per step; only script errors
/// (unknown actor, `$last` before any create) abort the run.
pub fn run_scenario<C: Clock, G: IdGenerator>(
    service: &mut ReportService<C, G>,
    directory: &ActorDirectory,
    scenario: &Scenario,
) -> anyhow::Result<ScenarioOutcome> {
    let mut last_created: Option<String> = None;
    let mut steps = Vec::with_capacity(scenario.steps.len());

    for (index, step) in scenario.steps.iter().enumerate() {
        let actor = directory
            .find_by_email(&step.actor)
            .cloned()
            .with_context(|| format!("step {}: unknown actor {}", index + 1, step.actor))?;

        let report_id = match step.op.report_ref() {
            Some(LAST_CREATED) => Some(last_created.clone().with_context(|| {
                format!("step {}: {LAST_CREATED} used before any create", index + 1)
            })?),
            Some(id) => Some(id.to_string()),
            None => None,
        };
        let target = report_id.as_deref().unwrap_or_default();

        let result = match step.op.clone() {
            StepOp::Create(input) => service.create(input, &actor).map(|r| {
                last_created = Some(r.id.clone());
                Some(r.id)
            }),
            StepOp::Update { patch, .. } => service.update(target, patch, &actor).map(|_| None),
            StepOp::Submit { .. } => service.submit(target, &actor).map(|_| None),
            StepOp::BeginReview { .. } => service.begin_review(target, &actor).map(|_| None),
            StepOp::Review { approved, .. } => {
                service.review(target, approved, &actor).map(|_| None)
            }
            StepOp::Close { .. } => service.close(target, &actor).map(|_| None),
            StepOp::Delete { .. } => service.delete(target, &actor).map(|_| None),
            StepOp::Comment { content, .. } => {
                service.add_comment(target, &content, &actor).map(|_| None)
            }
        };

        let (created_id, result, message) = match result {
            Ok(created) => (created, StepResult::Ok, None),
            Err(e) => (None, StepResult::from(&e), Some(e.to_string())),
        };

        steps.push(StepOutcome {
            index: index + 1,
            op: step.op.name(),
            actor: actor.email.clone(),
            report_id: created_id.or(report_id),
            result,
            expected: step.expect.unwrap_or(StepResult::Ok),
            message,
        });
    }

    let reports = match scenario.view_as.as_deref() {
        Some(email) => {
            let viewer = directory
                .find_by_email(email)
                .with_context(|| format!("view_as: unknown actor {email}"))?;
            service.visible_to(viewer).into_iter().cloned().collect()
        }
        None => service.reports().to_vec(),
    };

    Ok(ScenarioOutcome {
        steps,
        view_as: scenario.view_as.clone(),
        reports,
    })
}
