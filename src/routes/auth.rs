use actix_web::{HttpResponse, Result as ActixResult, web};

use super::reply;
use crate::middlewares::RateLimit;
use crate::models::auth::{Caller, LoginRequest};
use crate::runtime::AppContext;
use crate::services::AuthService;

pub async fn login(
    ctx: web::Data<AppContext>,
    body: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    let result = AuthService::new(&ctx).login(body.into_inner()).await;
    reply::json(result, "Login successful")
}

pub async fn me(ctx: web::Data<AppContext>, caller: Caller) -> ActixResult<HttpResponse> {
    reply::json(AuthService::new(&ctx).me(&caller), "Current tutor")
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(
                web::resource("/login")
                    .wrap(RateLimit::login())
                    .route(web::post().to(login)),
            )
            .route("/me", web::get().to(me)),
    );
}
