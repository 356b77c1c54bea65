//! 课程班次实体

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::models::admin::catalog::{EntityKind, FieldValue};
use crate::models::admin::entities::{AdminEntity, Section};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub number: i64,
    pub time: Option<String>,
    pub course_id: i64,
    pub semester_id: Option<i64>,
    pub professor_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Courses,
    #[sea_orm(
        belongs_to = "super::semesters::Entity",
        from = "Column::SemesterId",
        to = "super::semesters::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Semesters,
    #[sea_orm(
        belongs_to = "super::professors::Entity",
        from = "Column::ProfessorId",
        to = "super::professors::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Professors,
    #[sea_orm(has_many = "super::tickets::Entity")]
    Tickets,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl Related<super::semesters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Semesters.def()
    }
}

impl Related<super::professors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professors.def()
    }
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tickets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn apply_field(&mut self, name: &str, value: &FieldValue) -> crate::errors::Result<()> {
        match name {
            "number" => self.number = Set(value.as_int()?),
            "time" => self.time = Set(value.as_opt_text()?),
            "course_id" => self.course_id = Set(value.as_int()?),
            "semester_id" => self.semester_id = Set(value.as_opt_int()?),
            "professor_id" => self.professor_id = Set(value.as_opt_int()?),
            other => return Err(super::unknown_field(EntityKind::Section, other)),
        }
        Ok(())
    }
}

impl Model {
    pub fn into_section(self) -> Section {
        Section {
            id: self.id,
            number: self.number,
            time: self.time,
            course_id: self.course_id,
            semester_id: self.semester_id,
            professor_id: self.professor_id,
        }
    }

    pub fn into_admin(self) -> AdminEntity {
        AdminEntity::Section(self.into_section())
    }
}
