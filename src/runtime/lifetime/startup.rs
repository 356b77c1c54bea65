use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::settings::entities::{
    DEFAULT_SESSION_LIFETIME_MINUTES, PERMANENT_SESSION_LIFETIME, SECRET_KEY, SECRET_KEY_LENGTH,
};
use crate::models::tutors::entities::Tutor;
use crate::runtime::{AppContext, SessionSettings};
use crate::storage::Storage;
use crate::utils::SystemClock;
use crate::utils::password::hash_password;
use crate::utils::random_code::{generate_random_password, generate_secret_key};

/// 读取会话参数，缺失的设置写入默认值；已有值不会被覆盖
pub async fn bootstrap_session(storage: &Arc<dyn Storage>) -> Result<SessionSettings> {
    let secret = storage
        .ensure_setting(SECRET_KEY, &generate_secret_key(SECRET_KEY_LENGTH))
        .await?;

    let lifetime = storage
        .ensure_setting(
            PERMANENT_SESSION_LIFETIME,
            &DEFAULT_SESSION_LIFETIME_MINUTES.to_string(),
        )
        .await?;
    let lifetime_minutes = match lifetime.value.trim().parse::<i64>() {
        Ok(minutes) if minutes > 0 => minutes,
        _ => {
            warn!(
                "Invalid {} value '{}', using {} minutes",
                PERMANENT_SESSION_LIFETIME, lifetime.value, DEFAULT_SESSION_LIFETIME_MINUTES
            );
            DEFAULT_SESSION_LIFETIME_MINUTES
        }
    };

    Ok(SessionSettings {
        secret: secret.value,
        lifetime_minutes,
    })
}

/// 没有任何辅导员时创建默认管理员
pub async fn seed_admin(storage: &Arc<dyn Storage>, config: &AppConfig) -> Result<Option<Tutor>> {
    let count = storage.count_tutors().await?;
    if count > 0 {
        debug!("Database already has {} tutor(s), skipping admin seed", count);
        return Ok(None);
    }

    info!("No tutors found in database, creating default administrator...");

    // 优先使用环境变量中的密码
    let password = std::env::var("ADMIN_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| {
            let generated = generate_random_password(16);
            warn!("==========================================================");
            warn!("  ADMIN_PASSWORD NOT SET - USING GENERATED PASSWORD");
            warn!("  Generated administrator password: {}", generated);
            warn!("  Please save this password or set ADMIN_PASSWORD env var");
            warn!("==========================================================");
            generated
        });

    let mut admin = Tutor::new(config.bootstrap.admin_email.trim().to_lowercase());
    admin.fname = Some("Administrator".to_string());
    admin.is_superuser = true;
    admin.password_hash = Some(hash_password(&password, &config.argon2)?);

    let created = storage.create_tutor(&admin, &Default::default()).await?;
    info!("Default administrator {} created", created.email);
    Ok(Some(created))
}

/// 准备服务器启动的上下文：连接存储、读取会话设置、初始化管理员
pub async fn prepare_server_startup(config: &AppConfig) -> Result<AppContext> {
    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    let session = bootstrap_session(&storage).await?;
    debug!(
        "Session tokens live for {} minutes",
        session.lifetime_minutes
    );

    if let Err(e) = seed_admin(&storage, config).await {
        warn!("Failed to seed administrator: {}", e);
    }

    Ok(AppContext {
        storage,
        clock: Arc::new(SystemClock),
        session,
        argon2: config.argon2.clone(),
    })
}
