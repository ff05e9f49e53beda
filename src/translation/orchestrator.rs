//! 翻译编排器
//!
//! 持有提供商降级链和结果缓存，对外暴露三个永不失败的异步操作：
//! 整段翻译、查词、等级简化。链按优先级迭代，第一个成功的提供商
//! 产出结果；全部失败时退回本地规则实现，调用方总能拿到可显示的
//! 文本。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::cefr::CefrLevel;
use crate::translation::cache::{CacheStats, ProviderCache};
use crate::translation::config::TranslationConfig;
use crate::translation::error::TranslationResult;
use crate::translation::provider::ai::AiProvider;
use crate::translation::provider::libre::LibreProvider;
use crate::translation::provider::mymemory::MyMemoryProvider;
use crate::translation::provider::rule_based::{self, RuleBasedProvider};
use crate::translation::provider::{
    Operation, Provider, ProviderKind, Translated, TranslationRequest,
};

/// 编排器运行统计（原子计数，读取时做快照）
#[derive(Debug, Default)]
pub struct OrchestratorStats {
    total_operations: AtomicU64,
    provider_failures: AtomicU64,
    fallback_results: AtomicU64,
}

/// 统计快照
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub total_operations: u64,
    pub provider_failures: u64,
    pub fallback_results: u64,
    pub cache: CacheStats,
}

impl OrchestratorStats {
    fn record_operation(&self) {
        self.total_operations.fetch_add(1, Ordering::Relaxed);
    }

    fn record_failure(&self) {
        self.provider_failures.fetch_add(1, Ordering::Relaxed);
    }

    fn record_fallback(&self) {
        self.fallback_results.fetch_add(1, Ordering::Relaxed);
    }
}

/// 翻译编排器
pub struct TranslationOrchestrator {
    /// 翻译与查词的降级链，按优先级排列
    text_chain: Vec<Arc<dyn Provider>>,
    /// 等级简化的降级链
    simplify_chain: Vec<Arc<dyn Provider>>,
    cache: ProviderCache,
    current_provider: RwLock<ProviderKind>,
    stats: OrchestratorStats,
}

impl TranslationOrchestrator {
    /// 按配置构建完整的降级链
    pub fn new(config: &TranslationConfig) -> TranslationResult<Self> {
        let ai: Arc<dyn Provider> = Arc::new(AiProvider::new(
            &config.ai_api_url,
            &config.ai_api_key,
            config.ai_models.clone(),
            config.text_timeout(),
            config.max_tokens,
        )?);
        let libre: Arc<dyn Provider> = Arc::new(LibreProvider::new(
            config.libre_urls.clone(),
            config.text_timeout(),
        )?);
        let mymemory: Arc<dyn Provider> = Arc::new(MyMemoryProvider::new(
            &config.mymemory_url,
            config.word_timeout(),
        )?);
        let rule_based: Arc<dyn Provider> = Arc::new(RuleBasedProvider);

        // REST端点不承接简化，简化链只有模型端点加本地规则
        let text_chain = vec![
            Arc::clone(&ai),
            libre,
            mymemory,
            Arc::clone(&rule_based),
        ];
        let simplify_chain = vec![ai, rule_based];

        Ok(Self::with_chains(
            text_chain,
            simplify_chain,
            config.effective_cache_capacity(),
        ))
    }

    /// 用外部给定的链构建，测试注入用
    pub fn with_chains(
        text_chain: Vec<Arc<dyn Provider>>,
        simplify_chain: Vec<Arc<dyn Provider>>,
        cache_capacity: usize,
    ) -> Self {
        Self {
            text_chain,
            simplify_chain,
            cache: ProviderCache::new(cache_capacity),
            current_provider: RwLock::new(ProviderKind::Ai),
            stats: OrchestratorStats::default(),
        }
    }

    /// 保持结构的整段翻译
    ///
    /// 从不失败：链全部耗尽时返回包含原文的占位文本。
    pub async fn translate(
        &self,
        text: &str,
        target_language: &str,
        cefr_level: CefrLevel,
        source_language: Option<&str>,
    ) -> Translated {
        let mut request = TranslationRequest::new(text, target_language, cefr_level);
        if let Some(source) = source_language {
            request = request.with_source_language(source);
        }
        let op = Operation::Translate(request);
        self.run(&op, &self.text_chain).await
    }

    /// 带上下文的查词
    pub async fn translate_word(
        &self,
        word: &str,
        target_language: &str,
        context: &str,
    ) -> Translated {
        let op = Operation::Word {
            word: word.to_string(),
            target_language: target_language.to_string(),
            context: context.to_string(),
        };
        self.run(&op, &self.text_chain).await
    }

    /// 把文本降到目标CEFR等级
    pub async fn simplify(
        &self,
        text: &str,
        language: &str,
        target_level: CefrLevel,
    ) -> Translated {
        let op = Operation::Simplify {
            text: text.to_string(),
            language: language.to_string(),
            target_level,
        };
        self.run(&op, &self.simplify_chain).await
    }

    /// 最近一次成功操作的提供商
    pub fn current_provider(&self) -> ProviderKind {
        *self.current_provider.read().unwrap()
    }

    /// 缓存条目数
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// 清空结果缓存
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// 运行统计快照
    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_operations: self.stats.total_operations.load(Ordering::Relaxed),
            provider_failures: self.stats.provider_failures.load(Ordering::Relaxed),
            fallback_results: self.stats.fallback_results.load(Ordering::Relaxed),
            cache: self.cache.stats(),
        }
    }

    /// 缓存查询→链迭代→后处理→缓存写入
    async fn run(&self, op: &Operation, chain: &[Arc<dyn Provider>]) -> Translated {
        self.stats.record_operation();

        let key = op.cache_key();
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("缓存命中: {}", key);
            return cached;
        }

        for provider in chain {
            let kind = provider.kind();
            match provider.attempt(op).await {
                Ok(raw) => {
                    tracing::debug!("提供商 {} 承接了 {}", kind, op.kind_tag());
                    let result = Translated {
                        text: Self::post_process(op, kind, raw),
                        provider: kind,
                    };
                    *self.current_provider.write().unwrap() = kind;
                    if kind == ProviderKind::RuleBased {
                        self.stats.record_fallback();
                    }
                    self.cache.insert(key, result.clone());
                    return result;
                }
                Err(e) => {
                    self.stats.record_failure();
                    tracing::warn!("提供商 {} 执行 {} 失败: {}", kind, op.kind_tag(), e);
                }
            }
        }

        // 链耗尽（只在测试注入的链里可能发生），给出确定性的本地结果
        self.stats.record_fallback();
        *self.current_provider.write().unwrap() = ProviderKind::RuleBased;
        let result = Translated {
            text: Self::local_terminal_result(op),
            provider: ProviderKind::RuleBased,
        };
        self.cache.insert(key, result.clone());
        result
    }

    /// REST端点的结果补齐缺失的语义
    ///
    /// 无密钥端点既不理解CEFR等级也不会格式化查词结果，用本地规则
    /// 把它们的原始输出调整成和模型端点一致的形状。
    fn post_process(op: &Operation, kind: ProviderKind, raw: String) -> String {
        if !matches!(kind, ProviderKind::Libre | ProviderKind::MyMemory) {
            return raw;
        }

        match op {
            Operation::Translate(req) => {
                rule_based::simplify_for_level(&raw, &req.target_language, req.cefr_level)
            }
            Operation::Word { word, .. } => format!("{} → {}", word, raw),
            Operation::Simplify { .. } => raw,
        }
    }

    fn local_terminal_result(op: &Operation) -> String {
        match op {
            Operation::Translate(req) => rule_based::create_placeholder(
                &req.source_text,
                &req.target_language,
                req.cefr_level,
            ),
            Operation::Word {
                word,
                target_language,
                ..
            } => rule_based::word_unavailable(word, target_language),
            Operation::Simplify {
                text,
                language,
                target_level,
            } => rule_based::simplify_for_level(text, language, *target_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::translation::error::{TranslationError, TranslationResult};

    struct StaticProvider {
        kind: ProviderKind,
        reply: String,
    }

    #[async_trait]
    impl Provider for StaticProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        async fn attempt(&self, _op: &Operation) -> TranslationResult<String> {
            Ok(self.reply.clone())
        }
    }

    struct FailingProvider {
        kind: ProviderKind,
    }

    #[async_trait]
    impl Provider for FailingProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        async fn attempt(&self, _op: &Operation) -> TranslationResult<String> {
            Err(TranslationError::ProviderUnavailable("down".to_string()))
        }
    }

    fn orchestrator(chain: Vec<Arc<dyn Provider>>) -> TranslationOrchestrator {
        TranslationOrchestrator::with_chains(chain.clone(), chain, 64)
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let chain: Vec<Arc<dyn Provider>> = vec![
            Arc::new(StaticProvider {
                kind: ProviderKind::Ai,
                reply: "primary".to_string(),
            }),
            Arc::new(StaticProvider {
                kind: ProviderKind::Libre,
                reply: "secondary".to_string(),
            }),
        ];
        let orch = orchestrator(chain);

        let result = orch
            .translate("Hallo", "English", CefrLevel::B1, None)
            .await;
        assert_eq!(result.text, "primary");
        assert_eq!(result.provider, ProviderKind::Ai);
        assert_eq!(orch.current_provider(), ProviderKind::Ai);
    }

    #[tokio::test]
    async fn test_failure_advances_to_next_provider() {
        let chain: Vec<Arc<dyn Provider>> = vec![
            Arc::new(FailingProvider {
                kind: ProviderKind::Ai,
            }),
            Arc::new(StaticProvider {
                kind: ProviderKind::MyMemory,
                reply: "Hello".to_string(),
            }),
        ];
        let orch = orchestrator(chain);

        let result = orch
            .translate_word("Hallo", "English", "")
            .await;
        // REST端点的查词结果被格式化
        assert_eq!(result.text, "Hallo → Hello");
        assert_eq!(result.provider, ProviderKind::MyMemory);
        assert_eq!(orch.stats().provider_failures, 1);
    }

    #[tokio::test]
    async fn test_exhausted_chain_yields_placeholder() {
        let chain: Vec<Arc<dyn Provider>> = vec![Arc::new(FailingProvider {
            kind: ProviderKind::Ai,
        })];
        let orch = orchestrator(chain);

        let result = orch
            .translate("Hallo Welt", "English", CefrLevel::B2, Some("German"))
            .await;
        assert_eq!(result.provider, ProviderKind::RuleBased);
        // 原文逐字保留在占位文本里
        assert!(result.text.contains("Hallo Welt"));
        assert_eq!(orch.stats().fallback_results, 1);
    }

    #[tokio::test]
    async fn test_rest_translation_gets_level_adjustment() {
        let chain: Vec<Arc<dyn Provider>> = vec![Arc::new(StaticProvider {
            kind: ProviderKind::Libre,
            reply: "We utilize tools.".to_string(),
        })];
        let orch = orchestrator(chain);

        let result = orch
            .translate("Wir benutzen Werkzeuge.", "English", CefrLevel::A2, None)
            .await;
        assert_eq!(result.text, "We use tools.");
    }

    #[tokio::test]
    async fn test_cache_short_circuits_chain() {
        let chain: Vec<Arc<dyn Provider>> = vec![Arc::new(StaticProvider {
            kind: ProviderKind::Ai,
            reply: "cached".to_string(),
        })];
        let orch = orchestrator(chain);

        let first = orch
            .translate("Hallo", "English", CefrLevel::B1, None)
            .await;
        let second = orch
            .translate("Hallo", "English", CefrLevel::B1, None)
            .await;

        assert_eq!(first, second);
        assert_eq!(orch.cache_size(), 1);
        assert_eq!(orch.stats().cache.cache_hits, 1);
    }

    #[tokio::test]
    async fn test_fallback_results_are_cached_with_tag() {
        let chain: Vec<Arc<dyn Provider>> = vec![Arc::new(FailingProvider {
            kind: ProviderKind::Ai,
        })];
        let orch = orchestrator(chain);

        let first = orch.translate("Hallo", "English", CefrLevel::B1, None).await;
        let second = orch.translate("Hallo", "English", CefrLevel::B1, None).await;

        // 占位结果同样被记住，重复请求连失败的提供商也不再触碰
        assert_eq!(orch.cache_size(), 1);
        assert_eq!(second, first);
        assert_eq!(second.provider, ProviderKind::RuleBased);
        assert_eq!(orch.stats().provider_failures, 1);
    }

    #[tokio::test]
    async fn test_simplify_never_fails() {
        let orch = TranslationOrchestrator::with_chains(
            Vec::new(),
            vec![Arc::new(RuleBasedProvider) as Arc<dyn Provider>],
            64,
        );

        let result = orch
            .simplify("We utilize tools.", "English", CefrLevel::A2)
            .await;
        assert_eq!(result.text, "We use tools.");
        assert_eq!(result.provider, ProviderKind::RuleBased);
    }
}
