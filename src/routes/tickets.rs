use actix_web::{HttpResponse, Result as ActixResult, web};

use super::reply;
use crate::middlewares::RateLimit;
use crate::models::auth::Caller;
use crate::models::tickets::requests::{CloseTicketRequest, OpenTicketRequest};
use crate::runtime::AppContext;
use crate::services::TicketService;

// 学生提交工单，不需要登录
pub async fn open_ticket(
    ctx: web::Data<AppContext>,
    body: web::Json<OpenTicketRequest>,
) -> ActixResult<HttpResponse> {
    let result = TicketService::new(&ctx).open(body.into_inner()).await;
    reply::json(result, "Ticket opened")
}

pub async fn open_form(ctx: web::Data<AppContext>) -> ActixResult<HttpResponse> {
    reply::json(TicketService::new(&ctx).open_form().await, "Ticket form")
}

pub async fn ticket_board(ctx: web::Data<AppContext>, caller: Caller) -> ActixResult<HttpResponse> {
    reply::json(TicketService::new(&ctx).board(&caller).await, "Tickets")
}

pub async fn ticket_detail(
    ctx: web::Data<AppContext>,
    caller: Caller,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let result = TicketService::new(&ctx)
        .detail(&caller, path.into_inner())
        .await;
    reply::json(result, "Ticket")
}

pub async fn claim_ticket(
    ctx: web::Data<AppContext>,
    caller: Caller,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let result = TicketService::new(&ctx)
        .claim(&caller, path.into_inner())
        .await;
    reply::transition(result, "Ticket claimed", "Ticket was already claimed")
}

pub async fn close_form(
    ctx: web::Data<AppContext>,
    caller: Caller,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let result = TicketService::new(&ctx)
        .close_form(&caller, path.into_inner())
        .await;
    reply::json(result, "Close ticket form")
}

pub async fn close_ticket(
    ctx: web::Data<AppContext>,
    caller: Caller,
    path: web::Path<i64>,
    body: web::Json<CloseTicketRequest>,
) -> ActixResult<HttpResponse> {
    let result = TicketService::new(&ctx)
        .close(&caller, path.into_inner(), body.into_inner())
        .await;
    reply::json(result, "Ticket closed")
}

pub async fn reopen_ticket(
    ctx: web::Data<AppContext>,
    caller: Caller,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let result = TicketService::new(&ctx)
        .reopen(&caller, path.into_inner())
        .await;
    reply::transition(result, "Ticket reopened", "Ticket is not closed")
}

// 配置路由
pub fn configure_ticket_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tickets")
            .route("", web::get().to(ticket_board))
            .service(
                web::resource("/open")
                    .wrap(RateLimit::open_ticket())
                    .route(web::post().to(open_ticket)),
            )
            .route("/form", web::get().to(open_form))
            .route("/{id}", web::get().to(ticket_detail))
            .route("/{id}/claim", web::post().to(claim_ticket))
            .service(
                web::resource("/{id}/close")
                    .route(web::get().to(close_form))
                    .route(web::post().to(close_ticket)),
            )
            .route("/{id}/reopen", web::post().to(reopen_ticket)),
    );
}
