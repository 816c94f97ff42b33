//! 客户端错误类型
//!
//! 每种错误带固定的错误码（E001 起）和类型名。
//! 服务端返回的 `{error}` 文本原样保存在 `message()` 中，供界面直接展示。

use std::fmt;

/// 由 `变体(错误码, 类型名)` 列表生成 `PortalError`，
/// 以及 `code()`、`error_type()`、`message()` 和同名蛇形构造函数
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
    Network("E001", "Network Error"),
    Validation("E002", "Validation Error"),
    Rejected("E003", "Request Rejected"),
    Conflict("E004", "Conflict"),
    NotFound("E005", "Resource Not Found"),
    Authentication("E006", "Authentication Error"),
    Authorization("E007", "Authorization Error"),
    Server("E008", "Server Error"),
    Serialization("E009", "Serialization Error"),
    Configuration("E010", "Configuration Error"),
    Busy("E011", "Action In Progress"),
    AssignmentLocked("E012", "Assignment Locked"),
    DateParse("E013", "Date Parse Error"),
}

impl PortalError {
    /// 根据 HTTP 状态码归类服务端拒绝
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => PortalError::Authentication(message),
            403 => PortalError::Authorization(message),
            404 => PortalError::NotFound(message),
            409 => PortalError::Conflict(message),
            500..=599 => PortalError::Server(message),
            _ => PortalError::Rejected(message),
        }
    }

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

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

// 为常见的错误类型实现 From trait
impl From<reqwest::Error> for PortalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PortalError::Serialization(err.to_string())
        } else {
            PortalError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for PortalError {
    fn from(err: chrono::ParseError) -> Self {
        PortalError::DateParse(err.to_string())
    }
}

impl From<config::ConfigError> for PortalError {
    fn from(err: config::ConfigError) -> Self {
        PortalError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;
