use serde::Serialize;

use super::entities::{Ticket, TicketStatus};
use crate::models::admin::entities::{
    Course, ProblemType, Professor, Section, Semester, section_label,
};
use crate::models::tutors::entities::Tutor;

/// 关联信息全部解析后的工单
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TicketDetail {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub label: Option<String>,
    pub section: Option<Section>,
    pub course: Option<Course>,
    pub semester: Option<Semester>,
    pub professor: Option<Professor>,
    pub problem_type: Option<ProblemType>,
    pub tutor: Option<Tutor>,
    pub assistant_tutor: Option<Tutor>,
}

impl TicketDetail {
    /// 只有工单本身，关联对象留空
    pub fn bare(ticket: Ticket) -> Self {
        Self {
            ticket,
            label: None,
            section: None,
            course: None,
            semester: None,
            professor: None,
            problem_type: None,
            tutor: None,
            assistant_tutor: None,
        }
    }

    pub fn compute_label(&mut self) {
        self.label = match (&self.course, &self.section) {
            (Some(course), Some(section)) => Some(section_label(&course.number, section.number)),
            _ => None,
        };
    }
}

/// 工单看板：今天创建、今天关闭或仍在处理中的工单，按状态分组
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketBoard {
    pub open: Vec<TicketDetail>,
    pub claimed: Vec<TicketDetail>,
    pub closed: Vec<TicketDetail>,
}

impl TicketBoard {
    /// 按状态分组，保持输入顺序
    pub fn from_tickets(tickets: Vec<TicketDetail>) -> Self {
        let mut board = TicketBoard::default();
        for detail in tickets {
            match detail.ticket.status {
                TicketStatus::Open => board.open.push(detail),
                TicketStatus::Claimed => board.claimed.push(detail),
                TicketStatus::Closed => board.closed.push(detail),
            }
        }
        board
    }
}

/// 当前学期开放的课程及其班次
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OpenCourse {
    pub course: Course,
    pub sections: Vec<Section>,
}

/// 提交/关闭工单表单的选项
#[derive(Debug, Clone, Serialize)]
pub struct TicketFormResponse {
    pub ticket: Option<TicketDetail>,
    pub courses: Vec<OpenCourse>,
    pub problems: Vec<ProblemType>,
    pub tutors: Vec<Tutor>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn detail(id: i64, status: TicketStatus) -> TicketDetail {
        TicketDetail::bare(Ticket {
            id,
            student_email: "s@example.edu".into(),
            student_fname: None,
            student_lname: None,
            assignment: None,
            question: None,
            status,
            time_created: Utc::now(),
            time_closed: None,
            was_successful: None,
            tutor_email: None,
            assistant_tutor_email: None,
            section_id: None,
            problem_type_id: None,
        })
    }

    #[test]
    fn test_board_buckets_preserve_order() {
        let board = TicketBoard::from_tickets(vec![
            detail(1, TicketStatus::Open),
            detail(2, TicketStatus::Claimed),
            detail(3, TicketStatus::Open),
            detail(4, TicketStatus::Closed),
        ]);
        let ids = |v: &Vec<TicketDetail>| v.iter().map(|d| d.ticket.id).collect::<Vec<_>>();
        assert_eq!(ids(&board.open), vec![1, 3]);
        assert_eq!(ids(&board.claimed), vec![2]);
        assert_eq!(ids(&board.closed), vec![4]);
    }

    #[test]
    fn test_label_requires_course_and_section() {
        let mut d = detail(1, TicketStatus::Open);
        d.compute_label();
        assert_eq!(d.label, None);

        d.course = Some(Course {
            id: 1,
            number: "CS1410".into(),
            name: None,
            on_display: true,
        });
        d.section = Some(Section {
            id: 2,
            number: 3,
            time: None,
            course_id: 1,
            semester_id: None,
            professor_id: None,
        });
        d.compute_label();
        assert_eq!(d.label.as_deref(), Some("CS1410-003"));
    }
}
