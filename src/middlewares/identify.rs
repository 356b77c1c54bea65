/*!
 * 身份识别中间件
 *
 * 解析 `Authorization: Bearer <token>` 请求头，把 [`Caller`] 写入请求扩展。
 * 令牌缺失、无效或过期，以及辅导员不存在或未启用时，调用者为匿名，请求照常继续；
 * 是否需要登录由服务层决定。
 *
 * ```rust,ignore
 * App::new()
 *     .app_data(web::Data::new(ctx))
 *     .wrap(IdentifyCaller)
 * ```
 *
 * 处理程序中直接把 `Caller` 作为参数提取即可。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{ServiceRequest, ServiceResponse},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::models::auth::caller::Caller;
use crate::runtime::AppContext;
use crate::utils::jwt::JwtUtils;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct IdentifyCaller;

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// 根据令牌解析调用者，任何失败都退化为匿名
async fn resolve_caller(ctx: &AppContext, token: &str) -> Caller {
    let claims = match JwtUtils::verify_session_token(token, &ctx.session.secret) {
        Ok(claims) => claims,
        Err(err) => {
            info!("Session token rejected: {}", err);
            return Caller::anonymous();
        }
    };

    match ctx.storage.get_tutor(&claims.sub).await {
        Ok(Some(tutor)) => Caller::from_tutor(tutor),
        Ok(None) => {
            info!("Session token refers to unknown tutor {}", claims.sub);
            Caller::anonymous()
        }
        Err(err) => {
            warn!("Failed to load tutor for session: {}", err);
            Caller::anonymous()
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for IdentifyCaller
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = IdentifyCallerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IdentifyCallerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct IdentifyCallerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for IdentifyCallerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            let caller = match (
                bearer_token(&req),
                req.app_data::<web::Data<AppContext>>().cloned(),
            ) {
                (Some(token), Some(ctx)) => resolve_caller(&ctx, &token).await,
                (Some(_), None) => {
                    warn!("AppContext missing from app data, treating caller as anonymous");
                    Caller::anonymous()
                }
                (None, _) => Caller::anonymous(),
            };

            if let Some(email) = caller.email() {
                debug!("Request to {} identified as {}", req.path(), email);
            }
            req.extensions_mut().insert(caller);

            srv.call(req).await
        })
    }
}
