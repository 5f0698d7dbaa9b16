use time::OffsetDateTime;
use time::macros::datetime;
use zerosight_types::{
    ActivityEntry, Actor, Report, ReportSeverity, ReportStatus, Role, Visibility, ids,
};

pub const T0: OffsetDateTime = datetime!(2024-12-20 10:30 UTC);

pub fn actor(id: &str, role: Role) -> Actor {
    Actor {
        id: id.to_string(),
        email: format!("{}@zerosight.test", role.as_str()),
        name: format!("{} {}", role.as_str(), id),
        role,
    }
}

pub fn report(
    id: &str,
    author_id: &str,
    author_role: Role,
    visibility: Visibility,
    status: ReportStatus,
) -> Report {
    let author_name = format!("{} {}", author_role.as_str(), author_id);
    Report {
        id: id.to_string(),
        title: format!("title of {id}"),
        description: String::new(),
        severity: ReportSeverity::Medium,
        status,
        visibility,
        author_id: author_id.to_string(),
        author_name: author_name.clone(),
        author_role,
        created_at: T0,
        updated_at: T0,
        submitted_at: None,
        reviewed_at: None,
        reviewed_by: None,
        closed_at: None,
        comments: Vec::new(),
        activity_log: vec![ActivityEntry {
            id: "a1".to_string(),
            action: ids::ACTION_REPORT_CREATED.to_string(),
            performed_by: author_name,
            performed_by_role: author_role,
            timestamp: T0,
            details: None,
        }],
        attachments: Vec::new(),
    }
}
