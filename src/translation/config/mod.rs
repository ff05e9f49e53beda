//! 翻译配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

pub use manager::{ConfigManager, TranslationConfig};

/// 配置常量
pub mod constants {
    use std::time::Duration;

    // 生成式模型端点
    pub const DEFAULT_AI_API_URL: &str = "https://api.aimlapi.com/v1";
    pub const AI_MODEL_PRIORITY: &[&str] = &["gemini-2.0-flash", "gemini-pro", "gemini-1.0-pro"];
    pub const DEFAULT_MAX_TOKENS: u32 = 4096;

    // 无密钥REST端点
    pub const DEFAULT_LIBRE_URLS: &[&str] = &[
        "https://libretranslate.com/translate",
        "https://translate.argosopentech.com/translate",
    ];
    pub const DEFAULT_MYMEMORY_URL: &str = "https://api.mymemory.translated.net/get";

    // 超时：整段翻译允许更久，查词要求即时反馈
    pub const DEFAULT_TEXT_TIMEOUT: Duration = Duration::from_secs(15);
    pub const DEFAULT_WORD_TIMEOUT: Duration = Duration::from_secs(10);

    // 缓存设置
    pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

    // 默认目标语言
    pub const DEFAULT_TARGET_LANGUAGE: &str = "English";

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "lingreader-config.toml",
        "config.toml",
        ".lingreader-config.toml",
        "~/.config/lingreader/config.toml",
        "/etc/lingreader/config.toml",
    ];
}

/// 便利函数
pub fn config_file_exists() -> bool {
    constants::CONFIG_PATHS
        .iter()
        .any(|path| std::path::Path::new(shellexpand::tilde(path).as_ref()).exists())
}
