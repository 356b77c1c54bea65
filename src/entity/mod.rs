//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod can_tutor;
pub mod configuration;
pub mod courses;
pub mod messages;
pub mod problem_types;
pub mod professors;
pub mod sections;
pub mod semesters;
pub mod tickets;
pub mod tutors;

use crate::errors::PortalError;
use crate::models::admin::catalog::EntityKind;

pub(crate) fn unknown_field(kind: EntityKind, name: &str) -> PortalError {
    PortalError::validation(format!("Unknown field '{name}' for {}", kind.title()))
}
