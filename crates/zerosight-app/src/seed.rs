//! Demo collection loaded into every fresh service.

use time::macros::datetime;
use zerosight_types::{
    ActivityEntry, Comment, Report, ReportSeverity, ReportStatus, Role, Visibility, ids,
};

pub fn initial_reports() -> Vec<Report> {
    vec![sql_injection(), phishing_analysis(), network_assessment()]
}

fn sql_injection() -> Report {
    let author = "Alex Rodriguez";
    let admin = "System Administrator";
    Report {
        id: "RPT-2024-001".to_string(),
        title: "SQL Injection Vulnerability in Login Portal".to_string(),
        description: "Critical SQL injection vulnerability discovered in the authentication \
                      system. Multiple injection points identified that could lead to \
                      unauthorized access and data exfiltration."
            .to_string(),
        severity: ReportSeverity::Critical,
        status: ReportStatus::Approved,
        visibility: Visibility::Client,
        author_id: "3".to_string(),
        author_name: author.to_string(),
        author_role: Role::Pentester,
        created_at: datetime!(2024-12-20 10:30 UTC),
        updated_at: datetime!(2024-12-21 14:45 UTC),
        submitted_at: Some(datetime!(2024-12-20 15:00 UTC)),
        reviewed_at: Some(datetime!(2024-12-21 14:45 UTC)),
        reviewed_by: Some(admin.to_string()),
        closed_at: None,
        comments: vec![Comment {
            id: "c1".to_string(),
            author_id: "1".to_string(),
            author_name: admin.to_string(),
            author_role: Role::Admin,
            content: "Excellent findings. Approved for client visibility.".to_string(),
            created_at: datetime!(2024-12-21 14:45 UTC),
        }],
        activity_log: vec![
            entry(
                "a1",
                ids::ACTION_REPORT_CREATED,
                author,
                Role::Pentester,
                datetime!(2024-12-20 10:30 UTC),
            ),
            entry(
                "a2",
                ids::ACTION_REPORT_SUBMITTED,
                author,
                Role::Pentester,
                datetime!(2024-12-20 15:00 UTC),
            ),
            entry(
                "a3",
                ids::ACTION_REPORT_APPROVED,
                admin,
                Role::Admin,
                datetime!(2024-12-21 14:45 UTC),
            ),
        ],
        attachments: Vec::new(),
    }
}

fn phishing_analysis() -> Report {
    let author = "Sarah Chen";
    Report {
        id: "RPT-2024-002".to_string(),
        title: "Phishing Campaign Analysis Report".to_string(),
        description: "Detailed analysis of recent phishing campaign targeting employees. Email \
                      templates, indicators of compromise, and recommended mitigation \
                      strategies included."
            .to_string(),
        severity: ReportSeverity::High,
        status: ReportStatus::UnderReview,
        visibility: Visibility::Internal,
        author_id: "2".to_string(),
        author_name: author.to_string(),
        author_role: Role::SocAnalyst,
        created_at: datetime!(2024-12-21 09:00 UTC),
        updated_at: datetime!(2024-12-21 11:30 UTC),
        submitted_at: Some(datetime!(2024-12-21 11:30 UTC)),
        reviewed_at: None,
        reviewed_by: None,
        closed_at: None,
        comments: Vec::new(),
        activity_log: vec![
            entry(
                "a4",
                ids::ACTION_REPORT_CREATED,
                author,
                Role::SocAnalyst,
                datetime!(2024-12-21 09:00 UTC),
            ),
            entry(
                "a5",
                ids::ACTION_REPORT_SUBMITTED,
                author,
                Role::SocAnalyst,
                datetime!(2024-12-21 11:30 UTC),
            ),
        ],
        attachments: Vec::new(),
    }
}

fn network_assessment() -> Report {
    let author = "John Smith";
    Report {
        id: "RPT-2024-003".to_string(),
        title: "Network Vulnerability Assessment - Q4 2024".to_string(),
        description: "Comprehensive assessment of network infrastructure identifying potential \
                      security weaknesses and configuration issues."
            .to_string(),
        severity: ReportSeverity::Medium,
        status: ReportStatus::Draft,
        visibility: Visibility::Internal,
        author_id: "4".to_string(),
        author_name: author.to_string(),
        author_role: Role::Client,
        created_at: datetime!(2024-12-21 08:00 UTC),
        updated_at: datetime!(2024-12-21 08:00 UTC),
        submitted_at: None,
        reviewed_at: None,
        reviewed_by: None,
        closed_at: None,
        comments: Vec::new(),
        activity_log: vec![entry(
            "a6",
            ids::ACTION_REPORT_CREATED,
            author,
            Role::Client,
            datetime!(2024-12-21 08:00 UTC),
        )],
        attachments: Vec::new(),
    }
}

fn entry(
    id: &str,
    action: &str,
    performed_by: &str,
    role: Role,
    timestamp: time::OffsetDateTime,
) -> ActivityEntry {
    ActivityEntry {
        id: id.to_string(),
        action: action.to_string(),
        performed_by: performed_by.to_string(),
        performed_by_role: role,
        timestamp,
        details: None,
    }
}
