use std::sync::Arc;

use crate::config::Argon2Config;
use crate::storage::Storage;
use crate::utils::Clock;

/// 会话令牌参数，启动时从持久化设置读取
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub secret: String,
    pub lifetime_minutes: i64,
}

impl SessionSettings {
    pub fn lifetime(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.lifetime_minutes)
    }
}

/// 应用上下文：启动时构建一次，显式传给所有服务
#[derive(Clone)]
pub struct AppContext {
    pub storage: Arc<dyn Storage>,
    pub clock: Arc<dyn Clock>,
    pub session: SessionSettings,
    pub argon2: Argon2Config,
}
