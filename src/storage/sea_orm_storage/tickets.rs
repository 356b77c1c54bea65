//! 工单存储实现

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::{SeaOrmStorage, map_db_err};
use crate::entity::prelude::{ProblemTypes, Professors, Sections, Semesters, Tutors};
use crate::entity::tickets::{ActiveModel, Column, Entity as Tickets, Model};
use crate::entity::{courses, problem_types, professors, sections, semesters, tutors};
use crate::errors::{PortalError, Result};
use crate::models::reports::requests::ReportFilter;
use crate::models::tickets::{
    entities::{Ticket, TicketClosure, TicketStatus, TransitionOutcome},
    requests::OpenTicketRequest,
    responses::TicketDetail,
};

/// 仍在处理中的状态值；空串是早期数据里未设置的状态
fn active_status_values() -> Vec<&'static str> {
    let mut values: Vec<&'static str> = TicketStatus::active_statuses()
        .iter()
        .map(TicketStatus::as_str)
        .collect();
    values.push("");
    values
}

impl SeaOrmStorage {
    /// 创建工单
    pub(crate) async fn create_ticket_impl(
        &self,
        req: OpenTicketRequest,
        created_at: DateTime<Utc>,
    ) -> Result<Ticket> {
        let section_id = req
            .section_id
            .ok_or_else(|| PortalError::validation("Section is required"))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| map_db_err("创建工单失败", e))?;

        let section_exists = Sections::find_by_id(section_id)
            .one(&txn)
            .await
            .map_err(|e| map_db_err("查询班次失败", e))?
            .is_some();
        if !section_exists {
            return Err(PortalError::validation(format!(
                "Section #{section_id} does not exist"
            )));
        }

        if let Some(problem_type_id) = req.problem_type_id {
            let exists = ProblemTypes::find_by_id(problem_type_id)
                .one(&txn)
                .await
                .map_err(|e| map_db_err("查询问题类型失败", e))?
                .is_some();
            if !exists {
                return Err(PortalError::validation(format!(
                    "Problem type #{problem_type_id} does not exist"
                )));
            }
        }

        let model = ActiveModel {
            student_email: Set(req.student_email),
            student_fname: Set(req.student_fname),
            student_lname: Set(req.student_lname),
            assignment: Set(req.assignment),
            question: Set(req.question),
            status: Set(TicketStatus::Open.to_string()),
            time_created: Set(created_at.timestamp()),
            time_closed: Set(None),
            was_successful: Set(None),
            tutor_email: Set(None),
            assistant_tutor_email: Set(None),
            section_id: Set(Some(section_id)),
            problem_type_id: Set(req.problem_type_id),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| map_db_err("创建工单失败", e))?;

        txn.commit()
            .await
            .map_err(|e| map_db_err("创建工单失败", e))?;

        Ok(result.into_ticket())
    }

    /// 通过 ID 获取工单
    pub(crate) async fn get_ticket_impl(&self, id: i64) -> Result<Option<Ticket>> {
        let result = Tickets::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询工单失败", e))?;

        Ok(result.map(|m| m.into_ticket()))
    }

    /// 获取工单及关联信息
    pub(crate) async fn get_ticket_detail_impl(&self, id: i64) -> Result<Option<TicketDetail>> {
        let Some(model) = Tickets::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("查询工单失败", e))?
        else {
            return Ok(None);
        };

        Ok(self.resolve_details(vec![model]).await?.pop())
    }

    /// 认领工单
    ///
    /// 条件更新只在状态仍为 Open 时生效，并发认领只有一个能成功，
    /// 其余调用者拿到工单的当前状态。
    pub(crate) async fn claim_ticket_impl(
        &self,
        id: i64,
        tutor_email: &str,
    ) -> Result<Option<TransitionOutcome>> {
        let Some(current) = self.get_ticket_impl(id).await? else {
            return Ok(None);
        };
        if !current.can_claim() {
            return Ok(Some(TransitionOutcome::Superseded(current)));
        }

        let result = Tickets::update_many()
            .col_expr(Column::Status, Expr::value(TicketStatus::Claimed.as_str()))
            .col_expr(Column::TutorEmail, Expr::value(tutor_email.to_string()))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.is_in([TicketStatus::OPEN, ""]))
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err("认领工单失败", e))?;

        let applied = result.rows_affected > 0;
        Ok(self.get_ticket_impl(id).await?.map(|ticket| {
            if applied {
                TransitionOutcome::Applied(ticket)
            } else {
                TransitionOutcome::Superseded(ticket)
            }
        }))
    }

    /// 关闭工单：任意状态都可以关闭，同时写入修正的字段
    pub(crate) async fn close_ticket_impl(
        &self,
        id: i64,
        closure: TicketClosure,
    ) -> Result<Option<TransitionOutcome>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| map_db_err("关闭工单失败", e))?;

        let Some(existing) = Tickets::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| map_db_err("查询工单失败", e))?
        else {
            return Ok(None);
        };

        let mut ticket = existing.clone().into_ticket();
        ticket.apply_closure(&closure);

        let mut model: ActiveModel = existing.into();
        model.assignment = Set(ticket.assignment.clone());
        model.question = Set(ticket.question.clone());
        model.status = Set(ticket.status.to_string());
        model.time_closed = Set(ticket.time_closed.map(|t| t.timestamp()));
        model.was_successful = Set(ticket.was_successful);
        model.tutor_email = Set(ticket.tutor_email.clone());
        model.assistant_tutor_email = Set(ticket.assistant_tutor_email.clone());
        model.section_id = Set(ticket.section_id);
        model.problem_type_id = Set(ticket.problem_type_id);

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| map_db_err("关闭工单失败", e))?;

        txn.commit()
            .await
            .map_err(|e| map_db_err("关闭工单失败", e))?;

        Ok(Some(TransitionOutcome::Applied(updated.into_ticket())))
    }

    /// 重新打开工单：只有 Closed 状态会被修改
    pub(crate) async fn reopen_ticket_impl(&self, id: i64) -> Result<Option<TransitionOutcome>> {
        let Some(current) = self.get_ticket_impl(id).await? else {
            return Ok(None);
        };
        if !current.can_reopen() {
            return Ok(Some(TransitionOutcome::Superseded(current)));
        }

        let mut reopened = current;
        reopened.apply_reopen();

        let result = Tickets::update_many()
            .col_expr(Column::Status, Expr::value(reopened.status.as_str()))
            .col_expr(
                Column::TimeClosed,
                Expr::value(reopened.time_closed.map(|t| t.timestamp())),
            )
            .col_expr(Column::WasSuccessful, Expr::value(reopened.was_successful))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(TicketStatus::CLOSED))
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err("重新打开工单失败", e))?;

        let applied = result.rows_affected > 0;
        Ok(self.get_ticket_impl(id).await?.map(|ticket| {
            if applied {
                TransitionOutcome::Applied(ticket)
            } else {
                TransitionOutcome::Superseded(ticket)
            }
        }))
    }

    /// 看板工单，按创建时间排序
    pub(crate) async fn list_board_tickets_impl(&self, since: i64) -> Result<Vec<TicketDetail>> {
        let models = Tickets::find()
            .filter(
                Condition::any()
                    .add(Column::TimeCreated.gte(since))
                    .add(Column::TimeClosed.gte(since))
                    .add(Column::Status.is_in(active_status_values())),
            )
            .order_by_asc(Column::TimeCreated)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("获取工单看板失败", e))?;

        self.resolve_details(models).await
    }

    /// 所有 Open 工单，按创建时间排序
    pub(crate) async fn list_open_tickets_impl(&self) -> Result<Vec<TicketDetail>> {
        let models = Tickets::find()
            .filter(Column::Status.is_in([TicketStatus::OPEN, ""]))
            .order_by_asc(Column::TimeCreated)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("获取待处理工单失败", e))?;

        self.resolve_details(models).await
    }

    /// 报表筛选：总是通过班次关联，按创建时间倒序
    pub(crate) async fn filter_tickets_impl(
        &self,
        filter: ReportFilter,
    ) -> Result<Vec<TicketDetail>> {
        let mut select = Tickets::find().inner_join(Sections);

        if let Some(min) = filter.min_created() {
            select = select.filter(Column::TimeCreated.gte(min));
        }
        if let Some(max) = filter.max_created_exclusive() {
            select = select.filter(Column::TimeCreated.lt(max));
        }
        if let Some(semester_id) = filter.semester_id {
            select = select.filter(sections::Column::SemesterId.eq(semester_id));
        }
        if let Some(course_id) = filter.course_id {
            select = select.filter(sections::Column::CourseId.eq(course_id));
        }

        let models = select
            .order_by_desc(Column::TimeCreated)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("筛选工单失败", e))?;

        self.resolve_details(models).await
    }

    /// 批量加载工单的关联对象，缺失的关联留空
    async fn resolve_details(&self, models: Vec<Model>) -> Result<Vec<TicketDetail>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let context = "加载工单关联信息失败";

        let section_ids: BTreeSet<i64> = models.iter().filter_map(|m| m.section_id).collect();
        let sections: HashMap<i64, sections::Model> = Sections::find()
            .filter(sections::Column::Id.is_in(section_ids))
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(context, e))?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let course_ids: BTreeSet<i64> = sections.values().map(|s| s.course_id).collect();
        let courses: HashMap<i64, courses::Model> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(context, e))?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let semester_ids: BTreeSet<i64> = sections.values().filter_map(|s| s.semester_id).collect();
        let semesters: HashMap<i64, semesters::Model> = Semesters::find()
            .filter(semesters::Column::Id.is_in(semester_ids))
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(context, e))?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let professor_ids: BTreeSet<i64> =
            sections.values().filter_map(|s| s.professor_id).collect();
        let professors: HashMap<i64, professors::Model> = Professors::find()
            .filter(professors::Column::Id.is_in(professor_ids))
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(context, e))?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let problem_ids: BTreeSet<i64> = models.iter().filter_map(|m| m.problem_type_id).collect();
        let problems: HashMap<i64, problem_types::Model> = ProblemTypes::find()
            .filter(problem_types::Column::Id.is_in(problem_ids))
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(context, e))?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let tutor_emails: BTreeSet<String> = models
            .iter()
            .flat_map(|m| [m.tutor_email.clone(), m.assistant_tutor_email.clone()])
            .flatten()
            .collect();
        let tutors: HashMap<String, tutors::Model> = Tutors::find()
            .filter(tutors::Column::Email.is_in(tutor_emails))
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(context, e))?
            .into_iter()
            .map(|t| (t.email.clone(), t))
            .collect();

        let details = models
            .into_iter()
            .map(|model| {
                let section = model.section_id.and_then(|id| sections.get(&id));
                let tutor = model.tutor_email.as_ref().and_then(|e| tutors.get(e));
                let assistant = model
                    .assistant_tutor_email
                    .as_ref()
                    .and_then(|e| tutors.get(e));
                let problem = model.problem_type_id.and_then(|id| problems.get(&id));

                let mut detail = TicketDetail {
                    course: section
                        .and_then(|s| courses.get(&s.course_id))
                        .map(|c| c.clone().into_course()),
                    semester: section
                        .and_then(|s| s.semester_id)
                        .and_then(|id| semesters.get(&id))
                        .map(|s| s.clone().into_semester()),
                    professor: section
                        .and_then(|s| s.professor_id)
                        .and_then(|id| professors.get(&id))
                        .map(|p| p.clone().into_professor()),
                    section: section.map(|s| s.clone().into_section()),
                    problem_type: problem.map(|p| p.clone().into_problem_type()),
                    tutor: tutor.map(|t| t.clone().into_tutor()),
                    assistant_tutor: assistant.map(|t| t.clone().into_tutor()),
                    ..TicketDetail::bare(model.into_ticket())
                };
                detail.compute_label();
                detail
            })
            .collect();

        Ok(details)
    }
}
