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
macro_rules! define_pocketbuddy_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum PocketBuddyError {
            $($variant(String),)*
        }

        impl PocketBuddyError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PocketBuddyError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PocketBuddyError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PocketBuddyError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PocketBuddyError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PocketBuddyError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_pocketbuddy_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
    LlmRequest("E012", "LLM Request Error"),
    LlmResponse("E013", "LLM Response Error"),
}

impl PocketBuddyError {
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
}

impl fmt::Display for PocketBuddyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PocketBuddyError {}

impl From<sea_orm::DbErr> for PocketBuddyError {
    fn from(err: sea_orm::DbErr) -> Self {
        PocketBuddyError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PocketBuddyError {
    fn from(err: std::io::Error) -> Self {
        PocketBuddyError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PocketBuddyError {
    fn from(err: serde_json::Error) -> Self {
        PocketBuddyError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for PocketBuddyError {
    fn from(err: reqwest::Error) -> Self {
        PocketBuddyError::LlmRequest(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PocketBuddyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PocketBuddyError::cache_connection("test").code(), "E001");
        assert_eq!(PocketBuddyError::database_config("test").code(), "E003");
        assert_eq!(PocketBuddyError::validation("test").code(), "E007");
        assert_eq!(PocketBuddyError::llm_request("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            PocketBuddyError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            PocketBuddyError::llm_response("test").error_type(),
            "LLM Response Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = PocketBuddyError::file_operation("disk full");
        let formatted = err.format_simple();
        assert!(formatted.contains("File Operation Error"));
        assert!(formatted.contains("disk full"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PocketBuddyError = io.into();
        assert_eq!(err.code(), "E006");
        assert_eq!(err.message(), "missing");
    }
}
