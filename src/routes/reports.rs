use actix_web::{
    HttpResponse, Result as ActixResult,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web,
};

use super::reply;
use crate::models::auth::Caller;
use crate::models::reports::requests::ReportQuery;
use crate::runtime::AppContext;
use crate::services::ReportService;

pub async fn reports(
    ctx: web::Data<AppContext>,
    caller: Caller,
    query: web::Query<ReportQuery>,
) -> ActixResult<HttpResponse> {
    let result = ReportService::new(&ctx).reports(&caller, &query).await;
    reply::json(result, "Report")
}

// 以 CSV 下载筛选结果
pub async fn report_file(
    ctx: web::Data<AppContext>,
    caller: Caller,
    query: web::Query<ReportQuery>,
) -> ActixResult<HttpResponse> {
    match ReportService::new(&ctx).export_csv(&caller, &query).await {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename("report.csv".to_string())],
            })
            .body(bytes)),
        Err(err) => Ok(reply::error_response(&err)),
    }
}

pub async fn report_ticket(
    ctx: web::Data<AppContext>,
    caller: Caller,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let result = ReportService::new(&ctx)
        .ticket(&caller, path.into_inner())
        .await;
    reply::json(result, "Ticket")
}

// 配置路由
pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reports")
            .route("", web::get().to(reports))
            .route("/file", web::get().to(report_file))
            .route("/ticket/{id}", web::get().to(report_ticket)),
    );
}
