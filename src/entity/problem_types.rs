//! 问题类型实体

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::models::admin::catalog::{EntityKind, FieldValue};
use crate::models::admin::entities::{AdminEntity, ProblemType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "problem_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tickets::Entity")]
    Tickets,
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
            "description" => self.description = Set(value.as_text()?),
            other => return Err(super::unknown_field(EntityKind::ProblemType, other)),
        }
        Ok(())
    }
}

impl Model {
    pub fn into_problem_type(self) -> ProblemType {
        ProblemType {
            id: self.id,
            description: self.description,
        }
    }

    pub fn into_admin(self) -> AdminEntity {
        AdminEntity::ProblemType(self.into_problem_type())
    }
}
