use actix_web::{HttpResponse, Result as ActixResult, web};

use super::reply;
use crate::models::auth::Caller;
use crate::models::tutors::requests::TutorSaveRequest;
use crate::runtime::AppContext;
use crate::services::TutorService;

pub async fn list_tutors(ctx: web::Data<AppContext>, caller: Caller) -> ActixResult<HttpResponse> {
    reply::json(TutorService::new(&ctx).list(&caller).await, "Tutors")
}

pub async fn new_tutor(ctx: web::Data<AppContext>, caller: Caller) -> ActixResult<HttpResponse> {
    reply::json(TutorService::new(&ctx).edit(&caller, None).await, "Tutor")
}

pub async fn edit_tutor(
    ctx: web::Data<AppContext>,
    caller: Caller,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let result = TutorService::new(&ctx)
        .edit(&caller, Some(path.as_str()))
        .await;
    reply::json(result, "Tutor")
}

pub async fn save_tutor(
    ctx: web::Data<AppContext>,
    caller: Caller,
    body: web::Json<TutorSaveRequest>,
) -> ActixResult<HttpResponse> {
    let result = TutorService::new(&ctx)
        .save(&caller, body.into_inner())
        .await;
    reply::json(result, "Saved")
}

/// 挂在 `/api/v1/admin` 下，与通用实体路由共用前缀
pub fn tutor_scope() -> actix_web::Scope {
    web::scope("/tutors")
        .service(
            web::resource("")
                .route(web::get().to(list_tutors))
                .route(web::post().to(save_tutor)),
        )
        .route("/new", web::get().to(new_tutor))
        .route("/{email}", web::get().to(edit_tutor))
}
