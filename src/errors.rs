//! 统一错误处理模块
//!
//! 使用宏生成错误枚举，每个变体带有错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() / error_type() / message() 方法
/// - snake_case 便捷构造函数
macro_rules! define_classroom_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ClassroomError {
            $($variant(String),)*
        }

        impl ClassroomError {
            /// 错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ClassroomError::$variant(_) => $code,)*
                }
            }

            /// 错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ClassroomError::$variant(_) => $type_name,)*
                }
            }

            /// 错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ClassroomError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl ClassroomError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ClassroomError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_classroom_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    FileOperation("E005", "File Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Conflict("E008", "Conflict"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    Export("E013", "Report Export Error"),
}

impl ClassroomError {
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

    /// 是否为唯一约束冲突等可由客户端修正的错误
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ClassroomError::Validation(_)
                | ClassroomError::NotFound(_)
                | ClassroomError::Conflict(_)
                | ClassroomError::Authentication(_)
                | ClassroomError::Authorization(_)
        )
    }
}

impl fmt::Display for ClassroomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClassroomError {}

impl From<sea_orm::DbErr> for ClassroomError {
    fn from(err: sea_orm::DbErr) -> Self {
        ClassroomError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ClassroomError {
    fn from(err: std::io::Error) -> Self {
        ClassroomError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ClassroomError {
    fn from(err: serde_json::Error) -> Self {
        ClassroomError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ClassroomError {
    fn from(err: chrono::ParseError) -> Self {
        ClassroomError::DateParse(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ClassroomError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ClassroomError::Export(err.to_string())
    }
}

impl From<csv::Error> for ClassroomError {
    fn from(err: csv::Error) -> Self {
        ClassroomError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClassroomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ClassroomError::cache_connection("test").code(), "E001");
        assert_eq!(ClassroomError::database_operation("test").code(), "E004");
        assert_eq!(ClassroomError::validation("test").code(), "E006");
        assert_eq!(ClassroomError::conflict("test").code(), "E008");
        assert_eq!(ClassroomError::export("test").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ClassroomError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            ClassroomError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = ClassroomError::validation("Mark at least one answer as correct.");
        assert_eq!(err.message(), "Mark at least one answer as correct.");
    }

    #[test]
    fn test_format_simple() {
        let err = ClassroomError::conflict("quiz already taken");
        assert_eq!(err.format_simple(), "Conflict: quiz already taken");
        assert_eq!(err.to_string(), err.format_simple());
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ClassroomError::validation("x").is_client_error());
        assert!(ClassroomError::conflict("x").is_client_error());
        assert!(!ClassroomError::database_operation("x").is_client_error());
    }

    #[test]
    fn test_db_err_conversion() {
        let err: ClassroomError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E004");
        assert!(err.message().contains("boom"));
    }
}
