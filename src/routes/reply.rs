//! 服务层结果到 HTTP 响应的转换

use actix_web::{HttpResponse, Result as ActixResult, http::StatusCode};
use serde::Serialize;
use tracing::error;

use crate::errors::{PortalError, Result};
use crate::models::tickets::entities::TransitionOutcome;
use crate::models::{ApiResponse, ErrorCode};

pub fn status_of(err: &PortalError) -> StatusCode {
    match err {
        PortalError::NotFound(_) => StatusCode::NOT_FOUND,
        PortalError::Forbidden(_) => StatusCode::FORBIDDEN,
        PortalError::Validation(_) | PortalError::DateParse(_) => StatusCode::BAD_REQUEST,
        PortalError::Authentication(_) => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 错误响应；服务端错误不向客户端暴露细节
pub fn error_response(err: &PortalError) -> HttpResponse {
    let status = status_of(err);
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Request failed: {}", err);
        "Internal server error".to_string()
    } else {
        err.message().to_string()
    };

    HttpResponse::build(status).json(ApiResponse::error_empty(ErrorCode::from(err), message))
}

pub fn json<T: Serialize>(result: Result<T>, message: &str) -> ActixResult<HttpResponse> {
    Ok(match result {
        Ok(data) => HttpResponse::Ok().json(ApiResponse::success(data, message)),
        Err(err) => error_response(&err),
    })
}

/// 状态迁移：竞争失败仍返回 200，`applied` 为 false
pub fn transition(
    result: Result<TransitionOutcome>,
    applied: &str,
    superseded: &str,
) -> ActixResult<HttpResponse> {
    let message = match &result {
        Ok(outcome) if outcome.applied() => applied,
        _ => superseded,
    };
    json(result, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(&PortalError::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(&PortalError::forbidden("x")), StatusCode::FORBIDDEN);
        assert_eq!(status_of(&PortalError::validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(&PortalError::authentication("x")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(&PortalError::unknown_entity_kind("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let response = error_response(&PortalError::database_operation("disk I/O error"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
