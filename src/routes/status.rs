use actix_web::{HttpResponse, Result as ActixResult, web};

use super::reply;
use crate::models::auth::Caller;
use crate::runtime::AppContext;
use crate::services::StatusService;

// 公开状态页，登录后额外包含待处理工单
pub async fn status_board(ctx: web::Data<AppContext>, caller: Caller) -> ActixResult<HttpResponse> {
    let result = StatusService::new(&ctx).board(&caller).await;
    reply::json(result, "Status board")
}

pub fn configure_status_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/status", web::get().to(status_board));
}
