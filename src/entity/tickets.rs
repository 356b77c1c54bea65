//! 工单实体

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::models::tickets::entities::{Ticket, TicketStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_email: String,
    pub student_fname: Option<String>,
    pub student_lname: Option<String>,
    pub assignment: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub question: Option<String>,
    pub status: String,
    pub time_created: i64,
    pub time_closed: Option<i64>,
    pub was_successful: Option<bool>,
    pub tutor_email: Option<String>,
    pub assistant_tutor_email: Option<String>,
    pub section_id: Option<i64>,
    pub problem_type_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tutors::Entity",
        from = "Column::TutorEmail",
        to = "super::tutors::Column::Email",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Tutor,
    #[sea_orm(
        belongs_to = "super::tutors::Entity",
        from = "Column::AssistantTutorEmail",
        to = "super::tutors::Column::Email",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    AssistantTutor,
    #[sea_orm(
        belongs_to = "super::sections::Entity",
        from = "Column::SectionId",
        to = "super::sections::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Sections,
    #[sea_orm(
        belongs_to = "super::problem_types::Entity",
        from = "Column::ProblemTypeId",
        to = "super::problem_types::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    ProblemTypes,
}

impl Related<super::sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sections.def()
    }
}

impl Related<super::problem_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProblemTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn from_timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_ticket(self) -> Ticket {
        Ticket {
            id: self.id,
            student_email: self.student_email,
            student_fname: self.student_fname,
            student_lname: self.student_lname,
            assignment: self.assignment,
            question: self.question,
            status: TicketStatus::from_db(Some(&self.status)),
            time_created: from_timestamp(self.time_created),
            time_closed: self.time_closed.map(from_timestamp),
            was_successful: self.was_successful,
            tutor_email: self.tutor_email,
            assistant_tutor_email: self.assistant_tutor_email,
            section_id: self.section_id,
            problem_type_id: self.problem_type_id,
        }
    }
}
