//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_portal_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum PortalError {
            $($variant(String),)*
        }

        impl PortalError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PortalError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PortalError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PortalError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_portal_errors! {
    NotFound("E001", "Resource Not Found"),
    Forbidden("E002", "Access Denied"),
    Validation("E003", "Validation Error"),
    UnknownEntityKind("E004", "Unknown Entity Kind"),
    Authentication("E005", "Authentication Error"),
    DatabaseConfig("E006", "Database Configuration Error"),
    DatabaseConnection("E007", "Database Connection Error"),
    DatabaseOperation("E008", "Database Operation Error"),
    FileOperation("E009", "File Operation Error"),
    Serialization("E010", "Serialization Error"),
    DateParse("E011", "Date Parse Error"),
}

impl PortalError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为用户可修正的错误（在请求边界转换为提示信息，而非 500）
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            PortalError::NotFound(_)
                | PortalError::Forbidden(_)
                | PortalError::Validation(_)
                | PortalError::Authentication(_)
        )
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PortalError {
    fn from(err: sea_orm::DbErr) -> Self {
        PortalError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        PortalError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for PortalError {
    fn from(err: csv::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for PortalError {
    fn from(err: chrono::ParseError) -> Self {
        PortalError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PortalError::not_found("test").code(), "E001");
        assert_eq!(PortalError::forbidden("test").code(), "E002");
        assert_eq!(PortalError::validation("test").code(), "E003");
        assert_eq!(PortalError::unknown_entity_kind("test").code(), "E004");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            PortalError::forbidden("test").error_type(),
            "Access Denied"
        );
        assert_eq!(
            PortalError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = PortalError::validation("Student email is required");
        assert_eq!(err.message(), "Student email is required");
    }

    #[test]
    fn test_user_facing_kinds() {
        assert!(PortalError::not_found("x").is_user_facing());
        assert!(PortalError::validation("x").is_user_facing());
        assert!(!PortalError::unknown_entity_kind("x").is_user_facing());
        assert!(!PortalError::database_operation("x").is_user_facing());
    }

    #[test]
    fn test_format_simple() {
        let err = PortalError::validation("Invalid date");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid date"));
    }
}
