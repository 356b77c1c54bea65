use crate::errors::PortalError;

/// 响应信封中的业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 请求错误
    BadRequest = 1000,
    ValidationFailed = 1001,

    // 认证授权
    Unauthorized = 2000,
    AuthFailed = 2001,
    Forbidden = 2003,

    // 资源
    NotFound = 3000,

    // 限流
    RateLimitExceeded = 4290,

    // 服务器错误
    InternalServerError = 5000,
    DatabaseError = 5001,
}

impl From<&PortalError> for ErrorCode {
    fn from(err: &PortalError) -> Self {
        match err {
            PortalError::NotFound(_) => ErrorCode::NotFound,
            PortalError::Forbidden(_) => ErrorCode::Forbidden,
            PortalError::Validation(_) | PortalError::DateParse(_) => ErrorCode::ValidationFailed,
            PortalError::Authentication(_) => ErrorCode::AuthFailed,
            PortalError::DatabaseConfig(_)
            | PortalError::DatabaseConnection(_)
            | PortalError::DatabaseOperation(_) => ErrorCode::DatabaseError,
            PortalError::UnknownEntityKind(_)
            | PortalError::FileOperation(_)
            | PortalError::Serialization(_) => ErrorCode::InternalServerError,
        }
    }
}
