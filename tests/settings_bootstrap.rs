mod common;

use chrono::Utc;

use common::{ADMIN_EMAIL, TUTOR_EMAIL, TestApp, cheap_argon2, memory_storage};
use rust_tutor_portal::config::AppConfig;
use rust_tutor_portal::errors::PortalError;
use rust_tutor_portal::models::auth::{Caller, LoginRequest};
use rust_tutor_portal::models::settings::entities::{
    DEFAULT_SESSION_LIFETIME_MINUTES, PERMANENT_SESSION_LIFETIME, SECRET_KEY, SECRET_KEY_LENGTH,
};
use rust_tutor_portal::models::tutors::requests::TutorSaveRequest;
use rust_tutor_portal::runtime::lifetime::startup::{bootstrap_session, seed_admin};
use rust_tutor_portal::services::{AuthService, TutorService};
use rust_tutor_portal::utils::jwt::JwtUtils;

fn test_config() -> AppConfig {
    let mut config = AppConfig::load().expect("default config");
    config.bootstrap.admin_email = " Root@Example.EDU ".to_string();
    config.argon2 = cheap_argon2();
    config
}

#[tokio::test]
async fn test_session_settings_are_generated_once() {
    let storage = memory_storage().await;

    let first = bootstrap_session(&storage).await.unwrap();
    assert_eq!(first.secret.len(), SECRET_KEY_LENGTH);
    assert_eq!(first.lifetime_minutes, DEFAULT_SESSION_LIFETIME_MINUTES);

    let second = bootstrap_session(&storage).await.unwrap();
    assert_eq!(second.secret, first.secret);

    let stored = storage.get_setting(SECRET_KEY).await.unwrap().unwrap();
    assert_eq!(stored.value, first.secret);
}

#[tokio::test]
async fn test_existing_settings_are_kept() {
    let storage = memory_storage().await;
    storage
        .ensure_setting(PERMANENT_SESSION_LIFETIME, "90")
        .await
        .unwrap();
    storage
        .ensure_setting(SECRET_KEY, "configured-secret")
        .await
        .unwrap();

    let session = bootstrap_session(&storage).await.unwrap();
    assert_eq!(session.secret, "configured-secret");
    assert_eq!(session.lifetime_minutes, 90);
}

#[tokio::test]
async fn test_invalid_lifetime_falls_back_to_default() {
    let storage = memory_storage().await;
    storage
        .ensure_setting(PERMANENT_SESSION_LIFETIME, "forever")
        .await
        .unwrap();

    let session = bootstrap_session(&storage).await.unwrap();
    assert_eq!(session.lifetime_minutes, DEFAULT_SESSION_LIFETIME_MINUTES);

    // 原值保留
    let stored = storage
        .get_setting(PERMANENT_SESSION_LIFETIME)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.value, "forever");
}

#[tokio::test]
async fn test_admin_seeded_only_into_empty_table() {
    let storage = memory_storage().await;
    let config = test_config();

    let admin = seed_admin(&storage, &config).await.unwrap().unwrap();
    assert_eq!(admin.email, "root@example.edu");
    assert!(admin.is_superuser);
    assert!(admin.is_active);
    assert!(admin.password_hash.is_some());

    assert!(seed_admin(&storage, &config).await.unwrap().is_none());
    assert_eq!(storage.count_tutors().await.unwrap(), 1);
}

#[tokio::test]
async fn test_admin_not_seeded_when_tutors_exist() {
    let app = TestApp::new().await;
    app.tutor(TUTOR_EMAIL).await;

    let seeded = seed_admin(app.storage(), &test_config()).await.unwrap();
    assert!(seeded.is_none());
    assert!(
        app.storage()
            .get_tutor("root@example.edu")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_login_issues_verifiable_token() {
    let app = TestApp::new().await;
    // 令牌校验使用真实时间
    app.clock.set(Utc::now());
    let admin = app.admin().await;
    app.tutor(TUTOR_EMAIL).await;
    TutorService::new(&app.ctx)
        .save(
            &admin,
            TutorSaveRequest {
                email: TUTOR_EMAIL.to_string(),
                password: Some("Tutoring2024".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let auth = AuthService::new(&app.ctx);
    let login = auth
        .login(LoginRequest {
            email: " TUTOR@example.edu".to_string(),
            password: "Tutoring2024".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(login.expires_in, 30 * 60);
    assert_eq!(login.tutor.email, TUTOR_EMAIL);

    let claims =
        JwtUtils::verify_session_token(&login.access_token, &app.ctx.session.secret).unwrap();
    assert_eq!(claims.sub, TUTOR_EMAIL);
    assert_eq!(claims.exp - claims.iat, 30 * 60);

    let wrong = auth
        .login(LoginRequest {
            email: TUTOR_EMAIL.to_string(),
            password: "Tutoring2025".to_string(),
        })
        .await;
    assert!(matches!(wrong, Err(PortalError::Authentication(_))));

    // 没有设置密码的账号不能登录
    let no_password = auth
        .login(LoginRequest {
            email: ADMIN_EMAIL.to_string(),
            password: String::new(),
        })
        .await;
    assert!(matches!(no_password, Err(PortalError::Authentication(_))));
}

#[tokio::test]
async fn test_me_returns_caller() {
    let app = TestApp::new().await;
    let tutor = app.tutor(TUTOR_EMAIL).await;
    let auth = AuthService::new(&app.ctx);

    assert_eq!(auth.me(&tutor).unwrap().tutor.email, TUTOR_EMAIL);
    assert!(matches!(
        auth.me(&Caller::anonymous()),
        Err(PortalError::Forbidden(_))
    ));
}
