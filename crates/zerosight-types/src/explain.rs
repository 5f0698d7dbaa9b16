//! Explain registry for access rules.
//!
//! Maps rule IDs to human-readable explanations of who the clause admits.

use crate::ids;

/// Explanation entry for an access rule.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule.
    pub title: &'static str,
    /// What the clause checks and where it sits in the evaluation order.
    pub description: &'static str,
    /// What an actor can do to be admitted when the rule does not match.
    pub remediation: &'static str,
    /// A matching and a non-matching case.
    pub examples: ExamplePair,
}

/// A case the rule admits and one it does not.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    pub allowed: &'static str,
    pub denied: &'static str,
}

/// Look up an explanation by rule ID.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(rule_id: &str) -> Option<Explanation> {
    match rule_id {
        ids::RULE_VIEW_ADMIN => Some(explain_view_admin()),
        ids::RULE_VIEW_AUTHOR => Some(explain_view_author()),
        ids::RULE_VIEW_SOC_ANALYST => Some(explain_view_soc_analyst()),
        ids::RULE_VIEW_PENTESTER_INTERNAL => Some(explain_view_pentester_internal()),
        ids::RULE_VIEW_PENTESTER_APPROVED_CLIENT => Some(explain_view_pentester_approved_client()),
        ids::RULE_VIEW_CLIENT_APPROVED => Some(explain_view_client_approved()),
        ids::RULE_EDIT_ADMIN => Some(explain_edit_admin()),
        ids::RULE_EDIT_AUTHOR_DRAFT => Some(explain_edit_author_draft()),
        ids::RULE_DELETE_ADMIN => Some(explain_delete_admin()),
        ids::RULE_DELETE_AUTHOR_DRAFT => Some(explain_delete_author_draft()),
        ids::RULE_SUBMIT_AUTHOR_DRAFT => Some(explain_submit_author_draft()),
        ids::RULE_REVIEW_ADMIN_PENDING => Some(explain_review_admin_pending()),
        ids::RULE_BEGIN_REVIEW_ADMIN_SUBMITTED => Some(explain_begin_review()),
        ids::RULE_CLOSE_ADMIN_DECIDED => Some(explain_close()),
        ids::RULE_COMMENT_VIEWER => Some(explain_comment_viewer()),
        ids::RULE_DENY => Some(explain_deny()),
        _ => None,
    }
}

/// List all known rule IDs, in evaluation order per capability.
pub fn all_rule_ids() -> &'static [&'static str] {
    &[
        ids::RULE_VIEW_ADMIN,
        ids::RULE_VIEW_AUTHOR,
        ids::RULE_VIEW_SOC_ANALYST,
        ids::RULE_VIEW_PENTESTER_INTERNAL,
        ids::RULE_VIEW_PENTESTER_APPROVED_CLIENT,
        ids::RULE_VIEW_CLIENT_APPROVED,
        ids::RULE_EDIT_ADMIN,
        ids::RULE_EDIT_AUTHOR_DRAFT,
        ids::RULE_DELETE_ADMIN,
        ids::RULE_DELETE_AUTHOR_DRAFT,
        ids::RULE_SUBMIT_AUTHOR_DRAFT,
        ids::RULE_REVIEW_ADMIN_PENDING,
        ids::RULE_BEGIN_REVIEW_ADMIN_SUBMITTED,
        ids::RULE_CLOSE_ADMIN_DECIDED,
        ids::RULE_COMMENT_VIEWER,
        ids::RULE_DENY,
    ]
}

// --- View ---

fn explain_view_admin() -> Explanation {
    Explanation {
        title: "Admins See Everything",
        description: "\
First view clause. An actor with the admin role can view every report regardless of
author, visibility or status.",
        remediation: "Only admins match this clause; other roles fall through to the next rule.",
        examples: ExamplePair {
            allowed: "admin viewing a draft with visibility=admin written by a pentester",
            denied: "soc-analyst viewing the same report (falls through)",
        },
    }
}

fn explain_view_author() -> Explanation {
    Explanation {
        title: "Authors See Their Own Reports",
        description: "\
Second view clause. The author of a report can always view it, whatever its
visibility or status. This holds for every role, including client.",
        remediation: "Ask the author or an admin to share the content.",
        examples: ExamplePair {
            allowed: "client 4 viewing its own draft with visibility=client",
            denied: "client 5 viewing client 4's draft",
        },
    }
}

fn explain_view_soc_analyst() -> Explanation {
    Explanation {
        title: "SOC Analysts See Internal and Admin Reports",
        description: "\
Third view clause. SOC analysts can view any report whose visibility is internal or
admin, in any status. Client-visibility reports are not covered by this clause.",
        remediation: "Change the report's visibility to internal or admin.",
        examples: ExamplePair {
            allowed: "soc-analyst viewing a submitted report with visibility=internal",
            denied: "soc-analyst viewing a draft with visibility=client",
        },
    }
}

fn explain_view_pentester_internal() -> Explanation {
    Explanation {
        title: "Pentesters See Internal Reports",
        description: "\
Fourth view clause (first half). Pentesters can view any report with internal
visibility, in any status.",
        remediation: "Change the report's visibility to internal.",
        examples: ExamplePair {
            allowed: "pentester viewing a draft with visibility=internal",
            denied: "pentester viewing a report with visibility=admin",
        },
    }
}

fn explain_view_pentester_approved_client() -> Explanation {
    Explanation {
        title: "Pentesters See Approved Client Reports",
        description: "\
Fourth view clause (second half). Pentesters can view client-visibility reports once
they are approved.",
        remediation: "Wait for an admin to approve the report.",
        examples: ExamplePair {
            allowed: "pentester viewing an approved report with visibility=client",
            denied: "pentester viewing a submitted report with visibility=client",
        },
    }
}

fn explain_view_client_approved() -> Explanation {
    Explanation {
        title: "Clients See Approved Client Reports",
        description: "\
Fifth view clause. Clients can view reports with client visibility once they are
approved. Internal and admin visibility are never shown to clients they did not author.",
        remediation: "Set visibility to client and have an admin approve the report.",
        examples: ExamplePair {
            allowed: "client viewing an approved report with visibility=client",
            denied: "client viewing an approved report with visibility=internal",
        },
    }
}

// --- Edit / delete ---

fn explain_edit_admin() -> Explanation {
    Explanation {
        title: "Admins Edit Any Report",
        description: "An actor with the admin role can edit any report in any status.",
        remediation: "Only admins match this clause.",
        examples: ExamplePair {
            allowed: "admin editing an approved report",
            denied: "pentester editing an approved report",
        },
    }
}

fn explain_edit_author_draft() -> Explanation {
    Explanation {
        title: "Authors Edit Their Own Drafts",
        description: "\
The author of a report can edit it while it is still a draft. Submission locks the
report for everyone except admins.",
        remediation: "Edit before submitting, or ask an admin.",
        examples: ExamplePair {
            allowed: "pentester editing its own draft",
            denied: "pentester editing its own submitted report",
        },
    }
}

fn explain_delete_admin() -> Explanation {
    Explanation {
        title: "Admins Delete Any Report",
        description: "\
An actor with the admin role can delete any report. Deletion removes the report with
its comments and activity log.",
        remediation: "Only admins match this clause.",
        examples: ExamplePair {
            allowed: "admin deleting a closed report",
            denied: "soc-analyst deleting a closed report",
        },
    }
}

fn explain_delete_author_draft() -> Explanation {
    Explanation {
        title: "Authors Delete Their Own Drafts",
        description: "The author of a draft can delete it. Once submitted it can only be deleted \
                      by an admin.",
        remediation: "Ask an admin to delete a submitted report.",
        examples: ExamplePair {
            allowed: "client deleting its own draft",
            denied: "client deleting its own approved report",
        },
    }
}

// --- Workflow ---

fn explain_submit_author_draft() -> Explanation {
    Explanation {
        title: "Authors Submit Their Own Drafts",
        description: "\
Only the author can submit a report, and only from draft. Submitting twice is rejected
and leaves a single submission entry in the activity log.",
        remediation: "Log in as the author; the report must still be a draft.",
        examples: ExamplePair {
            allowed: "soc-analyst submitting its own draft",
            denied: "admin submitting someone else's draft",
        },
    }
}

fn explain_review_admin_pending() -> Explanation {
    Explanation {
        title: "Admins Review Pending Reports",
        description: "\
Only admins can approve or reject, and only reports that are submitted or under review.
Under the trust-caller enforcement setting the engine skips this check.",
        remediation: "Submit the report first, then have an admin review it.",
        examples: ExamplePair {
            allowed: "admin approving an under-review report",
            denied: "admin approving a draft",
        },
    }
}

fn explain_begin_review() -> Explanation {
    Explanation {
        title: "Admins Start Review of Submitted Reports",
        description: "An admin moves a submitted report to under-review.",
        remediation: "The report must be submitted and the actor must be an admin.",
        examples: ExamplePair {
            allowed: "admin starting review of a submitted report",
            denied: "admin starting review of a draft",
        },
    }
}

fn explain_close() -> Explanation {
    Explanation {
        title: "Admins Close Decided Reports",
        description: "An admin closes a report once it is approved or rejected. Closed is \
                      terminal.",
        remediation: "Review the report first.",
        examples: ExamplePair {
            allowed: "admin closing a rejected report",
            denied: "admin closing a submitted report",
        },
    }
}

fn explain_comment_viewer() -> Explanation {
    Explanation {
        title: "Viewers Can Comment",
        description: "Any actor who can view a report can add a comment to it.",
        remediation: "Gain view access first (see the access.view.* rules).",
        examples: ExamplePair {
            allowed: "soc-analyst commenting on an internal report",
            denied: "client commenting on an internal report it did not write",
        },
    }
}

fn explain_deny() -> Explanation {
    Explanation {
        title: "Default Deny",
        description: "No clause admitted the actor for the requested capability.",
        remediation: "Run `zerosight show <report-id>` to see which capability was denied.",
        examples: ExamplePair {
            allowed: "(never allows)",
            denied: "client viewing a submitted report with visibility=client",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_id_has_an_explanation() {
        for id in all_rule_ids() {
            assert!(lookup_explanation(id).is_some(), "missing explanation for {id}");
        }
    }

    #[test]
    fn unknown_rule_id_is_none() {
        assert!(lookup_explanation("access.view.everyone").is_none());
    }
}
