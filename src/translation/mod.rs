//! # 翻译子系统
//!
//! 面向语言学习的翻译编排：多提供商降级链、结果缓存和CEFR等级
//! 适配。链内任何一环失败都静默推进到下一环，链尾是永不失败的
//! 本地规则实现，所以对外的操作从不返回错误。
//!
//! ## 模块组织
//!
//! - `provider` - 降级链的各个提供商实现
//! - `orchestrator` - 链迭代、缓存和后处理
//! - `cache` - 容量受限的LRU结果缓存
//! - `config` - 配置加载（文件 + 环境变量 + 默认值）
//! - `error` - 统一错误类型
//! - `languages` - 语言名称到ISO代码的映射

pub mod cache;
pub mod config;
pub mod error;
pub mod languages;
pub mod orchestrator;
pub mod provider;

pub use cache::{CacheStats, ProviderCache};
pub use config::{ConfigManager, TranslationConfig};
pub use error::{TranslationError, TranslationResult};
pub use orchestrator::{OrchestratorStats, StatsSnapshot, TranslationOrchestrator};
pub use provider::{Operation, Provider, ProviderKind, Translated, TranslationRequest};
