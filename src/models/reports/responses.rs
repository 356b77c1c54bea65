use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::admin::entities::{Course, Semester};
use crate::models::tickets::responses::TicketDetail;

/// 导出文件的列，顺序固定
pub const REPORT_HEADERS: [&str; 17] = [
    "URL",
    "Student Email",
    "Student First Name",
    "Student Last Name",
    "Assignment",
    "Question",
    "Problem Type",
    "Status",
    "Time Created",
    "Time Closed",
    "Was Successful",
    "Primary Tutor",
    "Assistant Tutor",
    "Semester",
    "Course Number",
    "Section Number",
    "Professor",
];

/// 报表页面数据
#[derive(Debug, Clone, Serialize)]
pub struct ReportPage {
    pub tickets: Vec<TicketDetail>,
    pub semesters: Vec<Semester>,
    pub courses: Vec<Course>,
}

/// 工单详情页路径
pub fn ticket_detail_path(id: i64) -> String {
    format!("/reports/ticket/{id}")
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// 一张工单对应的导出行
pub fn report_row(detail: &TicketDetail) -> [String; 17] {
    let ticket = &detail.ticket;
    let text = |v: &Option<String>| v.clone().unwrap_or_default();

    [
        ticket_detail_path(ticket.id),
        ticket.student_email.clone(),
        text(&ticket.student_fname),
        text(&ticket.student_lname),
        text(&ticket.assignment),
        text(&ticket.question),
        detail
            .problem_type
            .as_ref()
            .map(|p| p.description.clone())
            .unwrap_or_default(),
        ticket.status.to_string(),
        format_time(&ticket.time_created),
        ticket.time_closed.as_ref().map(format_time).unwrap_or_default(),
        ticket
            .was_successful
            .map(|b| b.to_string())
            .unwrap_or_default(),
        text(&ticket.tutor_email),
        text(&ticket.assistant_tutor_email),
        detail
            .semester
            .as_ref()
            .map(Semester::title)
            .unwrap_or_default(),
        detail
            .course
            .as_ref()
            .map(|c| c.number.clone())
            .unwrap_or_default(),
        detail
            .section
            .as_ref()
            .map(|s| s.number.to_string())
            .unwrap_or_default(),
        detail
            .professor
            .as_ref()
            .map(|p| p.last_first())
            .unwrap_or_default(),
    ]
}
