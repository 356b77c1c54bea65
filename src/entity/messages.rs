//! 公告实体

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::models::admin::catalog::{EntityKind, FieldValue};
use crate::models::admin::entities::{AdminEntity, Message};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn apply_field(&mut self, name: &str, value: &FieldValue) -> crate::errors::Result<()> {
        match name {
            "message" => self.message = Set(value.as_text()?),
            "start_date" => self.start_date = Set(value.as_opt_date()?),
            "end_date" => self.end_date = Set(value.as_opt_date()?),
            other => return Err(super::unknown_field(EntityKind::Message, other)),
        }
        Ok(())
    }
}

impl Model {
    pub fn into_message(self) -> Message {
        Message {
            id: self.id,
            message: self.message,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    pub fn into_admin(self) -> AdminEntity {
        AdminEntity::Message(self.into_message())
    }
}
