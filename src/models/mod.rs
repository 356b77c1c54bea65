//! 业务数据模型
//!
//! 与 `entity` 中的数据库实体分离，服务层和路由层只使用这里的类型。

pub mod admin;
pub mod auth;
pub mod common;
pub mod reports;
pub mod settings;
pub mod status;
pub mod tickets;
pub mod tutors;

pub use common::{ApiResponse, ErrorCode};

/// 程序启动时间
#[derive(Debug, Clone, Copy)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
