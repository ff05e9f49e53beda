//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问，所有变量以 `LINGREADER_` 为前缀

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Environment variable '{}': {}",
            self.variable, self.message
        )
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => Err(EnvError {
                variable: Self::NAME.to_string(),
                message: "Environment variable not set".to_string(),
            }),
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

fn parse_bool(value: &str, name: &str) -> EnvResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(EnvError {
            variable: name.to_string(),
            message: format!("Invalid boolean '{}'. Use: true/false, 1/0, yes/no", value),
        }),
    }
}

fn parse_usize(value: &str, name: &str) -> EnvResult<usize> {
    value.parse().map_err(|_| EnvError {
        variable: name.to_string(),
        message: format!("Invalid number '{}'", value),
    })
}

fn parse_duration_secs(value: &str, name: &str) -> EnvResult<Duration> {
    let secs: u64 = value.parse().map_err(|_| EnvError {
        variable: name.to_string(),
        message: format!("Invalid duration in seconds '{}'", value),
    })?;
    Ok(Duration::from_secs(secs))
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "LINGREADER_LOG_LEVEL";
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 全局默认目标语言
    pub struct DefaultLanguage;
    impl EnvVar<String> for DefaultLanguage {
        const NAME: &'static str = "LINGREADER_DEFAULT_LANGUAGE";
        const DESCRIPTION: &'static str = "Fallback target language when a document has no stored preference";

        fn parse(value: &str) -> EnvResult<String> {
            if value.trim().is_empty() {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Language must not be empty".to_string(),
                })
            } else {
                Ok(value.trim().to_string())
            }
        }
    }
}

/// 翻译相关环境变量
pub mod translation {
    use super::*;

    /// 生成式模型端点的API密钥
    pub struct AiApiKey;
    impl EnvVar<String> for AiApiKey {
        const NAME: &'static str = "LINGREADER_AI_API_KEY";
        const DESCRIPTION: &'static str = "API key for the generative-model translation endpoint";

        fn parse(value: &str) -> EnvResult<String> {
            if value.trim().is_empty() {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API key must not be empty".to_string(),
                })
            } else {
                Ok(value.trim().to_string())
            }
        }
    }

    /// 生成式模型端点URL
    pub struct AiApiUrl;
    impl EnvVar<String> for AiApiUrl {
        const NAME: &'static str = "LINGREADER_AI_API_URL";
        const DESCRIPTION: &'static str = "Base URL of the generative-model translation endpoint";

        fn parse(value: &str) -> EnvResult<String> {
            if value.starts_with("http://") || value.starts_with("https://") {
                Ok(value.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid URL '{}'", value),
                })
            }
        }
    }

    /// 单次文本请求超时（秒）
    pub struct TextTimeout;
    impl EnvVar<Duration> for TextTimeout {
        const NAME: &'static str = "LINGREADER_TEXT_TIMEOUT_SECS";
        const DESCRIPTION: &'static str = "Per-call timeout for text translation requests, in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_duration_secs(value, Self::NAME)
        }
    }

    /// 单次查词请求超时（秒）
    pub struct WordTimeout;
    impl EnvVar<Duration> for WordTimeout {
        const NAME: &'static str = "LINGREADER_WORD_TIMEOUT_SECS";
        const DESCRIPTION: &'static str = "Per-call timeout for word translation requests, in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_duration_secs(value, Self::NAME)
        }
    }
}

/// 缓存相关环境变量
pub mod cache {
    use super::*;

    /// 缓存启用状态
    pub struct Enabled;
    impl EnvVar<bool> for Enabled {
        const NAME: &'static str = "LINGREADER_CACHE_ENABLED";
        const DESCRIPTION: &'static str = "Enable the in-memory provider result cache";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    /// 缓存容量
    pub struct Capacity;
    impl EnvVar<usize> for Capacity {
        const NAME: &'static str = "LINGREADER_CACHE_CAPACITY";
        const DESCRIPTION: &'static str = "Maximum number of cached provider results";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_usize(value, Self::NAME)
        }
    }
}
