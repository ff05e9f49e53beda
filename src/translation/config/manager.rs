//! 简化的配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::translation::error::{TranslationError, TranslationResult};

/// 翻译编排配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationConfig {
    // 生成式模型端点
    pub ai_api_key: String,
    pub ai_api_url: String,
    pub ai_models: Vec<String>,
    pub max_tokens: u32,

    // 无密钥REST端点
    pub libre_urls: Vec<String>,
    pub mymemory_url: String,

    // 超时配置
    pub text_timeout_secs: u64,
    pub word_timeout_secs: u64,

    // 缓存配置
    pub cache_enabled: bool,
    pub cache_capacity: usize,

    // 默认目标语言
    pub default_target_language: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            ai_api_key: String::new(),
            ai_api_url: constants::DEFAULT_AI_API_URL.to_string(),
            ai_models: constants::AI_MODEL_PRIORITY
                .iter()
                .map(|m| m.to_string())
                .collect(),
            max_tokens: constants::DEFAULT_MAX_TOKENS,

            libre_urls: constants::DEFAULT_LIBRE_URLS
                .iter()
                .map(|u| u.to_string())
                .collect(),
            mymemory_url: constants::DEFAULT_MYMEMORY_URL.to_string(),

            text_timeout_secs: constants::DEFAULT_TEXT_TIMEOUT.as_secs(),
            word_timeout_secs: constants::DEFAULT_WORD_TIMEOUT.as_secs(),

            cache_enabled: true,
            cache_capacity: constants::DEFAULT_CACHE_CAPACITY,

            default_target_language: constants::DEFAULT_TARGET_LANGUAGE.to_string(),
        }
    }
}

impl TranslationConfig {
    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if self.ai_models.is_empty() {
            return Err(TranslationError::ConfigError(
                "模型优先级列表不能为空".to_string(),
            ));
        }

        if self.text_timeout_secs == 0 || self.word_timeout_secs == 0 {
            return Err(TranslationError::ConfigError(
                "超时必须大于0秒".to_string(),
            ));
        }

        if self.cache_enabled && self.cache_capacity == 0 {
            return Err(TranslationError::ConfigError(
                "启用缓存时容量不能为0".to_string(),
            ));
        }

        Ok(())
    }

    /// 应用环境变量覆盖（使用类型安全环境变量系统）
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{cache, core, translation, EnvVar};

        if let Ok(api_key) = translation::AiApiKey::get() {
            self.ai_api_key = api_key;
        }

        if let Ok(api_url) = translation::AiApiUrl::get() {
            tracing::info!("环境变量覆盖模型API URL: {}", api_url);
            self.ai_api_url = api_url;
        }

        if let Ok(timeout) = translation::TextTimeout::get() {
            self.text_timeout_secs = timeout.as_secs();
        }

        if let Ok(timeout) = translation::WordTimeout::get() {
            self.word_timeout_secs = timeout.as_secs();
        }

        if let Ok(cache_enabled) = cache::Enabled::get() {
            self.cache_enabled = cache_enabled;
        }

        if let Ok(capacity) = cache::Capacity::get() {
            self.cache_capacity = capacity;
        }

        if let Ok(language) = core::DefaultLanguage::get() {
            self.default_target_language = language;
        }
    }

    /// 转换为Duration类型
    pub fn text_timeout(&self) -> Duration {
        Duration::from_secs(self.text_timeout_secs)
    }

    pub fn word_timeout(&self) -> Duration {
        Duration::from_secs(self.word_timeout_secs)
    }

    /// 缓存容量，禁用时为0
    pub fn effective_cache_capacity(&self) -> usize {
        if self.cache_enabled {
            self.cache_capacity
        } else {
            0
        }
    }
}

/// 简化的配置管理器
pub struct ConfigManager {
    config: TranslationConfig,
}

impl ConfigManager {
    /// 创建新的配置管理器
    pub fn new() -> TranslationResult<Self> {
        let mut config = Self::load_config()?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    /// 获取配置
    pub fn get_config(&self) -> &TranslationConfig {
        &self.config
    }

    pub fn into_config(self) -> TranslationConfig {
        self.config
    }

    /// 从文件加载配置
    fn load_config() -> TranslationResult<TranslationConfig> {
        Self::load_dotenv();

        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                tracing::info!("加载配置文件: {}", expanded_path);
                return Self::load_from_file(&expanded_path);
            }
        }

        tracing::info!("未找到配置文件，使用默认配置");
        Ok(TranslationConfig::default())
    }

    /// 从指定文件加载配置
    fn load_from_file(path: &str) -> TranslationResult<TranslationConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TranslationError::ConfigError(format!("读取配置文件失败: {}", e)))?;

        if path.ends_with(".toml") {
            toml::from_str(&content)
                .map_err(|e| TranslationError::ConfigError(format!("解析TOML配置失败: {}", e)))
        } else {
            serde_json::from_str(&content)
                .map_err(|e| TranslationError::ConfigError(format!("解析JSON配置失败: {}", e)))
        }
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        let env_files = [".env.local", ".env.development", ".env.production", ".env"];

        for env_file in &env_files {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::info!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: &str) -> TranslationResult<()> {
        let config = TranslationConfig::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| TranslationError::ConfigError(format!("序列化配置失败: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TranslationError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TranslationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_model_list_rejected() {
        let config = TranslationConfig {
            ai_models: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cache_disabled_capacity_is_zero() {
        let config = TranslationConfig {
            cache_enabled: false,
            cache_capacity: 100,
            ..Default::default()
        };
        assert_eq!(config.effective_cache_capacity(), 0);
    }

    #[test]
    fn test_toml_round_trip_with_partial_file() {
        // 配置文件允许只给出部分字段，其余落回默认值
        let config: TranslationConfig =
            toml::from_str("ai_api_key = \"test-key\"\ncache_capacity = 64\n").unwrap();
        assert_eq!(config.ai_api_key, "test-key");
        assert_eq!(config.cache_capacity, 64);
        assert_eq!(config.ai_api_url, constants::DEFAULT_AI_API_URL);
    }
}
