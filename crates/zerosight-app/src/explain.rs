//! The `explain` use case: look up access-rule documentation, and render decision tables.

use zerosight_domain::AccessDecision;
use zerosight_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found an explanation for the rule id.
    Found(Explanation),
    /// Unknown identifier; includes every known rule id.
    NotFound {
        identifier: String,
        available_rule_ids: &'static [&'static str],
    },
}

/// Look up an explanation for a rule id.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_rule_ids: explain::all_rule_ids(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\n");
    out.push_str("Examples\n");
    out.push_str("--------\n");
    out.push_str(&format!("Allowed: {}\n", exp.examples.allowed));
    out.push_str(&format!("Denied:  {}\n", exp.examples.denied));

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, rule_ids: &[&'static str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown rule id: {}\n\n", identifier));
    out.push_str("Available rule ids:\n");
    for id in rule_ids {
        out.push_str(&format!("  - {}\n", id));
    }

    out
}

/// One line per capability: `capability  allow|deny  rule_id`.
pub fn format_decisions(decisions: &[AccessDecision]) -> String {
    let width = decisions
        .iter()
        .map(|d| d.capability.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for d in decisions {
        let verdict = if d.allowed { "allow" } else { "deny" };
        out.push_str(&format!(
            "  {:<width$}  {:<5}  {}\n",
            d.capability.as_str(),
            verdict,
            d.rule_id
        ));
    }
    out
}
