use serde::Serialize;

use crate::models::admin::entities::{Course, Message, Section};
use crate::models::tickets::responses::TicketDetail;
use crate::models::tutors::entities::Tutor;

/// 单门课程的实时状态（只读，按需计算）
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CourseStatus {
    pub course: Course,
    /// 有待处理工单的班次
    pub current_sections: Vec<Section>,
    /// 上述班次中待处理工单的总数
    pub current_tickets: u64,
    /// 能辅导该课程且正在值班的辅导员
    pub current_tutors: Vec<Tutor>,
}

/// 状态页
#[derive(Debug, Clone, Serialize)]
pub struct StatusBoard {
    pub courses: Vec<CourseStatus>,
    pub messages: Vec<Message>,
    /// 只对已登录的辅导员返回
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_tickets: Option<Vec<TicketDetail>>,
}
