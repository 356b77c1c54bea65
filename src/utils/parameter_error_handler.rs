//! 请求参数解析失败时的统一响应

use actix_web::{
    Error, HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError, UrlencodedError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(err: impl std::fmt::Display + std::fmt::Debug + 'static, message: String) -> Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("JSON payload rejected for {}: {}", req.path(), err);
    let message = format!("Invalid JSON body: {err}");
    bad_request(err, message)
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Query string rejected for {}: {}", req.path(), err);
    let message = format!("Invalid query parameters: {err}");
    bad_request(err, message)
}

pub fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> Error {
    debug!("Form payload rejected for {}: {}", req.path(), err);
    let message = format!("Invalid form body: {err}");
    bad_request(err, message)
}
