//! 统一错误模型
//! 定义控制台所有错误类型及其面向用户的提示文案

use thiserror::Error;

/// 业务失败且服务端未给出 message 时的兜底提示
pub const FALLBACK_MESSAGE: &str = "请求失败";

/// 控制台错误类型
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsoleError {
    /// 信封 code 不是成功值
    #[error("Business error {code}: {message}")]
    Business { code: i64, message: String },

    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    #[error("Server error")]
    Server,

    /// 其余 HTTP 状态码
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// 未收到响应（连接失败、超时）
    #[error("Network error: {0}")]
    Network(String),

    /// 请求无法构造（URL、请求体、上传文件）
    #[error("Request configuration error: {0}")]
    RequestConfig(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Route not found: {0}")]
    RouteNotFound(String),
}

impl ConsoleError {
    /// 由 HTTP 状态码归类错误
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ConsoleError::Unauthorized,
            403 => ConsoleError::Forbidden,
            404 => ConsoleError::NotFound,
            500 => ConsoleError::Server,
            other => ConsoleError::HttpStatus(other),
        }
    }

    /// 对应的 HTTP 状态码（非 HTTP 错误返回 None）
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ConsoleError::Unauthorized => Some(401),
            ConsoleError::Forbidden => Some(403),
            ConsoleError::NotFound => Some(404),
            ConsoleError::Server => Some(500),
            ConsoleError::HttpStatus(status) => Some(*status),
            _ => None,
        }
    }

    /// 获取展示给用户的提示文案
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Business { message, .. } => message.clone(),
            ConsoleError::Unauthorized => "登录已过期，请重新登录".to_string(),
            ConsoleError::Forbidden => "没有权限访问该资源".to_string(),
            ConsoleError::NotFound => "请求的资源不存在".to_string(),
            ConsoleError::Server => "服务器错误".to_string(),
            ConsoleError::HttpStatus(_) => "网络错误".to_string(),
            ConsoleError::Network(_) => "网络连接失败，请检查网络".to_string(),
            ConsoleError::RequestConfig(_) => "请求配置错误".to_string(),
            ConsoleError::Storage(_) => "本地存储错误".to_string(),
            ConsoleError::Config(_) => "配置错误".to_string(),
            ConsoleError::Validation(msg) => msg.clone(),
            ConsoleError::RouteNotFound(_) => "页面不存在".to_string(),
        }
    }

    /// 是否需要清理会话并跳转登录页
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ConsoleError::Unauthorized)
    }

    /// 构造业务错误，message 缺失时使用兜底文案
    pub fn business(code: i64, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        ConsoleError::Business { code, message }
    }
}

impl From<config::ConfigError> for ConsoleError {
    fn from(e: config::ConfigError) -> Self {
        ConsoleError::Config(e.to_string())
    }
}

impl From<std::io::Error> for ConsoleError {
    fn from(e: std::io::Error) -> Self {
        ConsoleError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(e: serde_json::Error) -> Self {
        ConsoleError::Storage(e.to_string())
    }
}

impl From<validator::ValidationErrors> for ConsoleError {
    fn from(e: validator::ValidationErrors) -> Self {
        ConsoleError::Validation(crate::validation::first_message(&e))
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
