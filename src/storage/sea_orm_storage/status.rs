//! 状态页和工单表单的只读查询

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use super::{SeaOrmStorage, map_db_err};
use crate::entity::prelude::{CanTutor, Courses, Messages, Sections, Semesters, Tickets, Tutors};
use crate::entity::{can_tutor, courses, messages, sections, semesters, tickets, tutors};
use crate::errors::Result;
use crate::models::admin::entities::Message;
use crate::models::status::responses::CourseStatus;
use crate::models::tickets::entities::TicketStatus;
use crate::models::tickets::responses::OpenCourse;

impl SeaOrmStorage {
    /// 当前学期（开始 ≤ 今天 ≤ 结束）的所有班次，按课程分组
    async fn active_sections(
        &self,
        today: NaiveDate,
    ) -> Result<BTreeMap<i64, Vec<sections::Model>>> {
        let context = "查询当前学期班次失败";
        let semester_ids: Vec<i64> = Semesters::find()
            .filter(semesters::Column::StartDate.lte(today))
            .filter(semesters::Column::EndDate.gte(today))
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(context, e))?
            .into_iter()
            .map(|s| s.id)
            .collect();

        if semester_ids.is_empty() {
            return Ok(BTreeMap::new());
        }

        let sections = Sections::find()
            .filter(sections::Column::SemesterId.is_in(semester_ids))
            .order_by_asc(sections::Column::Number)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(context, e))?;

        let mut by_course: BTreeMap<i64, Vec<sections::Model>> = BTreeMap::new();
        for section in sections {
            by_course.entry(section.course_id).or_default().push(section);
        }
        Ok(by_course)
    }

    /// 展示中的课程的实时状态
    pub(crate) async fn course_statuses_impl(&self, today: NaiveDate) -> Result<Vec<CourseStatus>> {
        let context = "计算课程状态失败";
        let mut active = self.active_sections(today).await?;
        if active.is_empty() {
            return Ok(Vec::new());
        }

        let courses = Courses::find()
            .filter(courses::Column::OnDisplay.eq(true))
            .filter(courses::Column::Id.is_in(active.keys().copied().collect::<Vec<_>>()))
            .order_by_asc(courses::Column::Number)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(context, e))?;

        // 每个班次中仍在处理的工单数
        let section_ids: Vec<i64> = active.values().flatten().map(|s| s.id).collect();
        let mut ticket_counts: HashMap<i64, u64> = HashMap::new();
        let pending = Tickets::find()
            .filter(tickets::Column::SectionId.is_in(section_ids))
            .filter(tickets::Column::Status.is_in([
                TicketStatus::OPEN,
                TicketStatus::CLAIMED,
                "",
            ]))
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(context, e))?;
        for ticket in pending {
            if let Some(section_id) = ticket.section_id {
                *ticket_counts.entry(section_id).or_default() += 1;
            }
        }

        // 正在值班的辅导员及其课程
        let working: Vec<tutors::Model> = Tutors::find()
            .filter(tutors::Column::IsActive.eq(true))
            .filter(tutors::Column::IsWorking.eq(true))
            .order_by_asc(tutors::Column::Lname)
            .order_by_asc(tutors::Column::Fname)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(context, e))?;
        let emails: Vec<String> = working.iter().map(|t| t.email.clone()).collect();
        let assignments: BTreeSet<(String, i64)> = if emails.is_empty() {
            BTreeSet::new()
        } else {
            CanTutor::find()
                .filter(can_tutor::Column::TutorEmail.is_in(emails))
                .all(&self.db)
                .await
                .map_err(|e| map_db_err(context, e))?
                .into_iter()
                .map(|row| (row.tutor_email, row.course_id))
                .collect()
        };

        let statuses = courses
            .into_iter()
            .map(|course| {
                let sections = active.remove(&course.id).unwrap_or_default();
                let current_sections: Vec<_> = sections
                    .into_iter()
                    .filter(|s| ticket_counts.contains_key(&s.id))
                    .collect();
                let current_tickets = current_sections
                    .iter()
                    .map(|s| ticket_counts.get(&s.id).copied().unwrap_or_default())
                    .sum();
                let current_tutors = working
                    .iter()
                    .filter(|t| assignments.contains(&(t.email.clone(), course.id)))
                    .map(|t| t.clone().into_tutor())
                    .filter(|t| t.is_assignable())
                    .collect();

                CourseStatus {
                    course: course.into_course(),
                    current_sections: current_sections
                        .into_iter()
                        .map(|s| s.into_section())
                        .collect(),
                    current_tickets,
                    current_tutors,
                }
            })
            .collect();

        Ok(statuses)
    }

    /// 当天展示的公告，结束日期倒序
    pub(crate) async fn active_messages_impl(&self, today: NaiveDate) -> Result<Vec<Message>> {
        let messages = Messages::find()
            .order_by_desc(messages::Column::EndDate)
            .order_by_asc(messages::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("获取公告失败", e))?;

        Ok(messages
            .into_iter()
            .map(|m| m.into_message())
            .filter(|m| m.is_visible_on(today))
            .collect())
    }

    /// 当前学期有班次的课程，课程号排序，班次按编号排序
    pub(crate) async fn open_courses_impl(&self, today: NaiveDate) -> Result<Vec<OpenCourse>> {
        let mut active = self.active_sections(today).await?;
        if active.is_empty() {
            return Ok(Vec::new());
        }

        let courses = Courses::find()
            .filter(courses::Column::Id.is_in(active.keys().copied().collect::<Vec<_>>()))
            .order_by_asc(courses::Column::Number)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("获取开放课程失败", e))?;

        Ok(courses
            .into_iter()
            .map(|course| OpenCourse {
                sections: active
                    .remove(&course.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|s| s.into_section())
                    .collect(),
                course: course.into_course(),
            })
            .collect())
    }
}
