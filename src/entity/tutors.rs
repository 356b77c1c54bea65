//! 辅导员实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tutors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub email: String,
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_working: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::can_tutor::Entity")]
    CanTutor,
}

impl Related<super::can_tutor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CanTutor.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        super::can_tutor::Relation::Courses.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::can_tutor::Relation::Tutors.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_tutor(self) -> crate::models::tutors::entities::Tutor {
        crate::models::tutors::entities::Tutor {
            email: self.email,
            fname: self.fname,
            lname: self.lname,
            password_hash: self.password_hash,
            is_active: self.is_active,
            is_superuser: self.is_superuser,
            is_working: self.is_working,
        }
    }
}
