//! 教授实体

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::models::admin::catalog::{EntityKind, FieldValue};
use crate::models::admin::entities::{AdminEntity, Professor};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "professors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub fname: String,
    pub lname: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sections::Entity")]
    Sections,
}

impl Related<super::sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sections.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn apply_field(&mut self, name: &str, value: &FieldValue) -> crate::errors::Result<()> {
        match name {
            "fname" => self.fname = Set(value.as_text()?),
            "lname" => self.lname = Set(value.as_text()?),
            other => return Err(super::unknown_field(EntityKind::Professor, other)),
        }
        Ok(())
    }
}

impl Model {
    pub fn into_professor(self) -> Professor {
        Professor {
            id: self.id,
            fname: self.fname,
            lname: self.lname,
        }
    }

    pub fn into_admin(self) -> AdminEntity {
        AdminEntity::Professor(self.into_professor())
    }
}
