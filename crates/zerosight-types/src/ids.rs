//! Stable identifiers for access rules, activity actions and storage keys.
//!
//! `rule_id` is a dotted namespace: `access.<capability>.<clause>`.

// Rules: view
pub const RULE_VIEW_ADMIN: &str = "access.view.admin";
pub const RULE_VIEW_AUTHOR: &str = "access.view.author";
pub const RULE_VIEW_SOC_ANALYST: &str = "access.view.soc_analyst";
pub const RULE_VIEW_PENTESTER_INTERNAL: &str = "access.view.pentester_internal";
pub const RULE_VIEW_PENTESTER_APPROVED_CLIENT: &str = "access.view.pentester_approved_client";
pub const RULE_VIEW_CLIENT_APPROVED: &str = "access.view.client_approved";

// Rules: edit / delete
pub const RULE_EDIT_ADMIN: &str = "access.edit.admin";
pub const RULE_EDIT_AUTHOR_DRAFT: &str = "access.edit.author_draft";
pub const RULE_DELETE_ADMIN: &str = "access.delete.admin";
pub const RULE_DELETE_AUTHOR_DRAFT: &str = "access.delete.author_draft";

// Rules: workflow
pub const RULE_SUBMIT_AUTHOR_DRAFT: &str = "access.submit.author_draft";
pub const RULE_REVIEW_ADMIN_PENDING: &str = "access.review.admin_pending";
pub const RULE_BEGIN_REVIEW_ADMIN_SUBMITTED: &str = "access.begin_review.admin_submitted";
pub const RULE_CLOSE_ADMIN_DECIDED: &str = "access.close.admin_decided";
pub const RULE_COMMENT_VIEWER: &str = "access.comment.viewer";

// Fallback when no clause matched.
pub const RULE_DENY: &str = "access.deny";

// Activity log actions
pub const ACTION_REPORT_CREATED: &str = "Report Created";
pub const ACTION_REPORT_SUBMITTED: &str = "Report Submitted";
pub const ACTION_REVIEW_STARTED: &str = "Review Started";
pub const ACTION_REPORT_APPROVED: &str = "Report Approved";
pub const ACTION_REPORT_REJECTED: &str = "Report Rejected";
pub const ACTION_REPORT_CLOSED: &str = "Report Closed";
pub const ACTION_REPORT_UPDATED: &str = "Report Updated";
pub const ACTION_COMMENT_ADDED: &str = "Comment Added";

// Activity log details
pub const DETAILS_APPROVED: &str =
    "Report has been approved and is now visible per visibility settings";
pub const DETAILS_REJECTED: &str = "Report requires revisions";

// Schemas
pub const SCHEMA_CONFIG_V1: &str = "zerosight.config.v1";

// Storage
pub const SESSION_KEY: &str = "bgs_user";
pub const REPORT_ID_PREFIX: &str = "RPT";
