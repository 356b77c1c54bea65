use tracing::info;

use crate::errors::{PortalError, Result};
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::runtime::AppContext;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;
use crate::utils::validate::normalize_email;

const LOGIN_FAILED: &str = "Email or password is incorrect";

/// 邮箱 + 密码登录，签发会话令牌
///
/// 未启用或没有设置密码的辅导员不能登录。
pub async fn handle_login(ctx: &AppContext, request: LoginRequest) -> Result<LoginResponse> {
    let email = normalize_email(&request.email);

    let tutor = ctx
        .storage
        .get_tutor(&email)
        .await?
        .filter(|t| t.is_active)
        .ok_or_else(|| PortalError::authentication(LOGIN_FAILED))?;

    let verified = tutor
        .password_hash
        .as_deref()
        .is_some_and(|hash| verify_password(&request.password, hash));
    if !verified {
        info!("Failed login attempt for {}", email);
        return Err(PortalError::authentication(LOGIN_FAILED));
    }

    let now = ctx.clock.now();
    let access_token =
        JwtUtils::issue_session_token(&tutor.email, &ctx.session.secret, now, ctx.session.lifetime())
            .map_err(|e| PortalError::serialization(format!("签发令牌失败: {e}")))?;

    info!("Tutor {} logged in successfully", tutor.email);

    Ok(LoginResponse {
        access_token,
        expires_in: ctx.session.lifetime_minutes * 60,
        tutor,
        created_at: now,
    })
}
