//! 课程实体

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::models::admin::catalog::{EntityKind, FieldValue};
use crate::models::admin::entities::{AdminEntity, Course};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub number: String,
    pub name: Option<String>,
    pub on_display: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sections::Entity")]
    Sections,
    #[sea_orm(has_many = "super::can_tutor::Entity")]
    CanTutor,
}

impl Related<super::sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sections.def()
    }
}

impl Related<super::can_tutor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CanTutor.def()
    }
}

impl Related<super::tutors::Entity> for Entity {
    fn to() -> RelationDef {
        super::can_tutor::Relation::Tutors.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::can_tutor::Relation::Courses.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn apply_field(&mut self, name: &str, value: &FieldValue) -> crate::errors::Result<()> {
        match name {
            "number" => self.number = Set(value.as_text()?),
            "name" => self.name = Set(value.as_opt_text()?),
            "on_display" => self.on_display = Set(value.as_bool()?),
            other => return Err(super::unknown_field(EntityKind::Course, other)),
        }
        Ok(())
    }
}

impl Model {
    pub fn into_course(self) -> Course {
        Course {
            id: self.id,
            number: self.number,
            name: self.name,
            on_display: self.on_display,
        }
    }

    pub fn into_admin(self) -> AdminEntity {
        AdminEntity::Course(self.into_course())
    }
}
