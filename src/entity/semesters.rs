//! 学期实体

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::models::admin::catalog::{EntityKind, FieldValue};
use crate::models::admin::entities::{AdminEntity, Season, Semester};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "semesters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub year: i64,
    pub season: String,
    pub start_date: Date,
    pub end_date: Date,
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
    /// 按目录字段名写入列
    pub fn apply_field(&mut self, name: &str, value: &FieldValue) -> crate::errors::Result<()> {
        match name {
            "year" => self.year = Set(value.as_int()?),
            "season" => self.season = Set(value.as_season()?.to_string()),
            "start_date" => self.start_date = Set(value.as_date()?),
            "end_date" => self.end_date = Set(value.as_date()?),
            other => return Err(super::unknown_field(EntityKind::Semester, other)),
        }
        Ok(())
    }
}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_semester(self) -> Semester {
        Semester {
            id: self.id,
            year: self.year,
            season: self.season.parse::<Season>().unwrap_or(Season::Spring),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    pub fn into_admin(self) -> AdminEntity {
        AdminEntity::Semester(self.into_semester())
    }
}
