//! # 翻译提供商
//!
//! 降级链中的每一环都实现同一个 `Provider` 能力：
//! `attempt(operation) -> 译文或失败`。编排器按优先级迭代提供商列表，
//! 在第一个成功处停下（责任链模式）。
//!
//! # 模块组织
//!
//! - `ai` - 密钥认证的生成式模型端点，内部带模型优先级降级
//! - `libre` - 无密钥REST端点A（多实例）
//! - `mymemory` - 无密钥REST端点B
//! - `rule_based` - 离线规则降级：词替换、占位文本

pub mod ai;
pub mod libre;
pub mod mymemory;
pub mod rule_based;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cefr::CefrLevel;
use crate::translation::error::TranslationResult;

/// 实际提供结果的服务标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// 生成式模型端点（主力）
    Ai,
    /// 无密钥REST端点A
    Libre,
    /// 无密钥REST端点B
    MyMemory,
    /// 本地规则降级
    RuleBased,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Ai => "ai",
            ProviderKind::Libre => "libretranslate",
            ProviderKind::MyMemory => "mymemory",
            ProviderKind::RuleBased => "fallback",
        };
        write!(f, "{}", name)
    }
}

/// 一次翻译调用的全部参数，不可变，用作缓存键材料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub source_text: String,
    pub target_language: String,
    pub cefr_level: CefrLevel,
    /// 源语言，默认 "auto"
    pub source_language: String,
}

impl TranslationRequest {
    pub fn new(source_text: &str, target_language: &str, cefr_level: CefrLevel) -> Self {
        Self {
            source_text: source_text.to_string(),
            target_language: target_language.to_string(),
            cefr_level,
            source_language: "auto".to_string(),
        }
    }

    pub fn with_source_language(mut self, source_language: &str) -> Self {
        self.source_language = source_language.to_string();
        self
    }
}

/// 提供商可承接的操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// 保持结构的整段翻译
    Translate(TranslationRequest),
    /// 带上下文的单词翻译
    Word {
        word: String,
        target_language: String,
        context: String,
    },
    /// 把文本降到目标CEFR等级
    Simplify {
        text: String,
        language: String,
        target_level: CefrLevel,
    },
}

impl Operation {
    /// 操作种类标签，参与缓存键
    pub fn kind_tag(&self) -> &'static str {
        match self {
            Operation::Translate(_) => "translate",
            Operation::Word { .. } => "word",
            Operation::Simplify { .. } => "simplify",
        }
    }

    /// 由操作种类和全部请求字段导出的确定性缓存键
    pub fn cache_key(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        match self {
            Operation::Translate(req) => {
                hasher.update(req.source_text.as_bytes());
                hasher.update(b"\0");
                hasher.update(req.target_language.as_bytes());
                hasher.update(b"\0");
                hasher.update(req.cefr_level.code().as_bytes());
                hasher.update(b"\0");
                hasher.update(req.source_language.as_bytes());
            }
            Operation::Word {
                word,
                target_language,
                context,
            } => {
                hasher.update(word.as_bytes());
                hasher.update(b"\0");
                hasher.update(target_language.as_bytes());
                hasher.update(b"\0");
                hasher.update(context.as_bytes());
            }
            Operation::Simplify {
                text,
                language,
                target_level,
            } => {
                hasher.update(text.as_bytes());
                hasher.update(b"\0");
                hasher.update(language.as_bytes());
                hasher.update(b"\0");
                hasher.update(target_level.code().as_bytes());
            }
        }
        format!("{}:{}", self.kind_tag(), hasher.finalize().to_hex())
    }
}

/// 翻译结果：可显示的文本和实际提供它的服务
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translated {
    pub text: String,
    pub provider: ProviderKind,
}

/// 降级链中单个提供商的统一能力
#[async_trait]
pub trait Provider: Send + Sync {
    /// 提供商标签
    fn kind(&self) -> ProviderKind;

    /// 尝试承接一次操作
    ///
    /// 网络失败、配额用尽、响应畸形一律以 `TranslationError` 返回，
    /// 由编排器转化为推进到下一个提供商。
    async fn attempt(&self, op: &Operation) -> TranslationResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_deterministic() {
        let op = Operation::Translate(
            TranslationRequest::new("Hallo Welt", "English", CefrLevel::B2)
                .with_source_language("German"),
        );
        assert_eq!(op.cache_key(), op.cache_key());
    }

    #[test]
    fn test_cache_key_separates_operations() {
        // 同样的文本，不同操作种类必须得到不同的键
        let translate = Operation::Translate(TranslationRequest::new(
            "Hallo",
            "English",
            CefrLevel::B1,
        ));
        let simplify = Operation::Simplify {
            text: "Hallo".to_string(),
            language: "English".to_string(),
            target_level: CefrLevel::B1,
        };
        assert_ne!(translate.cache_key(), simplify.cache_key());
    }

    #[test]
    fn test_cache_key_sensitive_to_every_field() {
        let base = TranslationRequest::new("Hallo", "English", CefrLevel::B1);
        let keys = [
            Operation::Translate(base.clone()).cache_key(),
            Operation::Translate(TranslationRequest::new("Hallo", "French", CefrLevel::B1))
                .cache_key(),
            Operation::Translate(TranslationRequest::new("Hallo", "English", CefrLevel::A1))
                .cache_key(),
            Operation::Translate(base.with_source_language("German")).cache_key(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
