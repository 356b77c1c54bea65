//! 通用管理路由
//!
//! 每种实体各有一个 `/api/v1/admin/{slug}` 作用域，作用域通过 `app_data` 携带自己的
//! [`EntityKind`]，处理程序对六种实体共用。辅导员有自己的作用域，见 [`super::tutors`]。

use actix_web::{HttpResponse, Result as ActixResult, web};

use super::reply;
use crate::models::admin::catalog::{EntityKind, RawForm};
use crate::models::auth::Caller;
use crate::runtime::AppContext;
use crate::services::AdminService;

pub async fn admin_index(ctx: web::Data<AppContext>, caller: Caller) -> ActixResult<HttpResponse> {
    reply::json(AdminService::new(&ctx).index(&caller), "Admin")
}

pub async fn list_entities(
    ctx: web::Data<AppContext>,
    caller: Caller,
    kind: web::Data<EntityKind>,
) -> ActixResult<HttpResponse> {
    let result = AdminService::new(&ctx).list(&caller, **kind).await;
    reply::json(result, kind.title())
}

pub async fn new_entity(
    ctx: web::Data<AppContext>,
    caller: Caller,
    kind: web::Data<EntityKind>,
) -> ActixResult<HttpResponse> {
    let result = AdminService::new(&ctx).edit(&caller, **kind, None).await;
    reply::json(result, kind.title())
}

pub async fn edit_entity(
    ctx: web::Data<AppContext>,
    caller: Caller,
    kind: web::Data<EntityKind>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let result = AdminService::new(&ctx)
        .edit(&caller, **kind, Some(path.into_inner()))
        .await;
    reply::json(result, kind.title())
}

// 表单提交：`action=delete` 删除，否则按 id 更新或新建
pub async fn save_entity(
    ctx: web::Data<AppContext>,
    caller: Caller,
    kind: web::Data<EntityKind>,
    form: web::Form<RawForm>,
) -> ActixResult<HttpResponse> {
    let result = AdminService::new(&ctx)
        .save(&caller, **kind, form.into_inner())
        .await;
    reply::json(result, "Saved")
}

fn entity_scope(kind: EntityKind) -> actix_web::Scope {
    web::scope(&format!("/{}", kind.slug()))
        .app_data(web::Data::new(kind))
        .service(
            web::resource("")
                .route(web::get().to(list_entities))
                .route(web::post().to(save_entity)),
        )
        .route("/new", web::get().to(new_entity))
        .route("/{id}", web::get().to(edit_entity))
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    let mut scope = web::scope("/api/v1/admin")
        .route("", web::get().to(admin_index))
        .service(super::tutors::tutor_scope());
    for kind in EntityKind::ALL {
        scope = scope.service(entity_scope(kind));
    }
    cfg.service(scope);
}
