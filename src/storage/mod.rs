use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::{
    admin::{
        catalog::{EntityKind, FieldMap},
        entities::{AdminEntity, Message},
    },
    reports::requests::ReportFilter,
    settings::entities::Setting,
    status::responses::CourseStatus,
    tickets::{
        entities::{Ticket, TicketClosure, TransitionOutcome},
        requests::OpenTicketRequest,
        responses::{OpenCourse, TicketDetail},
    },
    tutors::entities::Tutor,
};

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 管理实体（六种），按 EntityKind 分发
    // 通过ID获取实体
    async fn get_entity(&self, kind: EntityKind, id: i64) -> Result<Option<AdminEntity>>;
    // 按默认排序列出实体
    async fn list_entities(&self, kind: EntityKind) -> Result<Vec<AdminEntity>>;
    // 创建实体
    async fn create_entity(&self, kind: EntityKind, fields: FieldMap) -> Result<AdminEntity>;
    // 更新实体，只写入有变化的字段
    async fn update_entity(
        &self,
        kind: EntityKind,
        id: i64,
        fields: FieldMap,
    ) -> Result<Option<AdminEntity>>;
    // 删除实体，引用它的外键置空（课程会连带删除班次）
    async fn delete_entity(&self, kind: EntityKind, id: i64) -> Result<bool>;

    /// 工单
    // 创建工单
    async fn create_ticket(
        &self,
        request: OpenTicketRequest,
        created_at: DateTime<Utc>,
    ) -> Result<Ticket>;
    // 通过ID获取工单
    async fn get_ticket(&self, id: i64) -> Result<Option<Ticket>>;
    // 获取工单及其关联信息
    async fn get_ticket_detail(&self, id: i64) -> Result<Option<TicketDetail>>;
    // 认领工单（Open → Claimed，比较并交换）
    async fn claim_ticket(&self, id: i64, tutor_email: &str) -> Result<Option<TransitionOutcome>>;
    // 关闭工单
    async fn close_ticket(
        &self,
        id: i64,
        closure: TicketClosure,
    ) -> Result<Option<TransitionOutcome>>;
    // 重新打开工单（Closed → Claimed）
    async fn reopen_ticket(&self, id: i64) -> Result<Option<TransitionOutcome>>;
    // 看板工单：指定时间之后创建或关闭的，以及仍在处理中的
    async fn list_board_tickets(&self, since: i64) -> Result<Vec<TicketDetail>>;
    // 所有 Open 状态的工单
    async fn list_open_tickets(&self) -> Result<Vec<TicketDetail>>;
    // 报表筛选
    async fn filter_tickets(&self, filter: ReportFilter) -> Result<Vec<TicketDetail>>;

    /// 辅导员
    async fn get_tutor(&self, email: &str) -> Result<Option<Tutor>>;
    // 按姓、名排序
    async fn list_tutors(&self) -> Result<Vec<Tutor>>;
    async fn count_tutors(&self) -> Result<u64>;
    // 辅导员可以辅导的课程
    async fn tutor_course_ids(&self, email: &str) -> Result<BTreeSet<i64>>;
    async fn create_tutor(&self, tutor: &Tutor, courses: &BTreeSet<i64>) -> Result<Tutor>;
    // 更新辅导员，`courses` 为 None 时不改动课程
    async fn update_tutor(
        &self,
        tutor: &Tutor,
        courses: Option<&BTreeSet<i64>>,
    ) -> Result<Option<Tutor>>;
    async fn delete_tutor(&self, email: &str) -> Result<bool>;

    /// 状态页
    // 当前学期开放课程的实时状态
    async fn course_statuses(&self, today: NaiveDate) -> Result<Vec<CourseStatus>>;
    // 当天展示的公告
    async fn active_messages(&self, today: NaiveDate) -> Result<Vec<Message>>;
    // 当前学期有班次的课程
    async fn open_courses(&self, today: NaiveDate) -> Result<Vec<OpenCourse>>;

    /// 持久化设置
    async fn get_setting(&self, name: &str) -> Result<Option<Setting>>;
    // 不存在时写入默认值，已存在的值不会被覆盖
    async fn ensure_setting(&self, name: &str, default: &str) -> Result<Setting>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
