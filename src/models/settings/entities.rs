use chrono::{DateTime, Utc};
use serde::Serialize;

/// 持久化的进程级配置项
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Setting {
    pub name: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// 会话签名密钥
pub const SECRET_KEY: &str = "SECRET_KEY";
/// 会话有效期（分钟）
pub const PERMANENT_SESSION_LIFETIME: &str = "PERMANENT_SESSION_LIFETIME";

pub const SECRET_KEY_LENGTH: usize = 48;
pub const DEFAULT_SESSION_LIFETIME_MINUTES: i64 = 30;
