//! 翻译模块统一错误处理
//!
//! 错误分类对应提供商调用边界上的四种正常失败模式：服务不可用、
//! 响应畸形、配额用尽、无译文。它们全部在编排器内部被吸收并转化为
//! "推进到链中下一个提供商"，从不以异常形式到达UI。

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 提供商不可用（网络失败、连接拒绝、HTTP错误状态）
    #[error("提供商不可用: {0}")]
    ProviderUnavailable(String),

    /// 响应格式异常（载荷形状不符合预期）
    #[error("响应格式异常: {0}")]
    MalformedResponse(String),

    /// 提供商配额已用尽
    #[error("配额已用尽: {0}")]
    QuotaExhausted(String),

    /// 提供商未返回任何译文
    #[error("未找到译文")]
    NoTranslationFound,

    /// 超时错误
    #[error("操作超时: {0}")]
    Timeout(String),

    /// 输入验证错误
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 缓存错误
    #[error("缓存错误: {0}")]
    CacheError(String),
}

impl TranslationError {
    /// 检查错误是否可通过换一个提供商重试
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslationError::ProviderUnavailable(_) => true,
            TranslationError::MalformedResponse(_) => true,
            TranslationError::QuotaExhausted(_) => true,
            TranslationError::NoTranslationFound => true,
            TranslationError::Timeout(_) => true,
            TranslationError::ConfigError(_) => false,
            TranslationError::InvalidInput(_) => false,
            TranslationError::CacheError(_) => false,
        }
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::ProviderUnavailable(_) => ErrorSeverity::Warning,
            TranslationError::MalformedResponse(_) => ErrorSeverity::Warning,
            TranslationError::QuotaExhausted(_) => ErrorSeverity::Warning,
            TranslationError::NoTranslationFound => ErrorSeverity::Info,
            TranslationError::Timeout(_) => ErrorSeverity::Warning,
            TranslationError::InvalidInput(_) => ErrorSeverity::Info,
            TranslationError::CacheError(_) => ErrorSeverity::Error,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::ConfigError(_) => ErrorCategory::Configuration,
            TranslationError::ProviderUnavailable(_) => ErrorCategory::Network,
            TranslationError::MalformedResponse(_) => ErrorCategory::Parsing,
            TranslationError::QuotaExhausted(_) => ErrorCategory::Quota,
            TranslationError::NoTranslationFound => ErrorCategory::Service,
            TranslationError::Timeout(_) => ErrorCategory::Timeout,
            TranslationError::InvalidInput(_) => ErrorCategory::Input,
            TranslationError::CacheError(_) => ErrorCategory::Cache,
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Parsing,
    Quota,
    Service,
    Timeout,
    Input,
    Cache,
}

/// 标准错误转换
impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TranslationError::Timeout(error.to_string())
        } else {
            TranslationError::ProviderUnavailable(error.to_string())
        }
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::MalformedResponse(format!("JSON解析错误: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::ConfigError(format!("TOML解析错误: {}", error))
    }
}

impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::ConfigError(format!("IO错误: {}", error))
    }
}

impl From<tokio::time::error::Elapsed> for TranslationError {
    fn from(error: tokio::time::error::Elapsed) -> Self {
        TranslationError::Timeout(format!("异步操作超时: {}", error))
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 按严重程度记录并返回错误
    pub fn log_error<T>(error: TranslationError) -> TranslationResult<T> {
        match error.severity() {
            ErrorSeverity::Info => tracing::info!("翻译信息: {}", error),
            ErrorSeverity::Warning => tracing::warn!("翻译警告: {}", error),
            ErrorSeverity::Error => tracing::error!("翻译错误: {}", error),
            ErrorSeverity::Critical => tracing::error!("翻译严重错误: {}", error),
        }

        Err(error)
    }
}
