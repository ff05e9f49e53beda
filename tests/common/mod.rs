// 集成测试公共模块
//
// 提供模拟提供商和会话装配辅助

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use lingreader::cefr::CefrLevel;
use lingreader::reader::{DocumentMetadata, MemoryPreferenceStore, ReaderSession, TextSource};
use lingreader::translation::error::{TranslationError, TranslationResult};
use lingreader::translation::provider::{Operation, Provider, ProviderKind};
use lingreader::translation::TranslationOrchestrator;

/// 总是以固定文本成功的提供商
pub struct StaticProvider {
    pub kind: ProviderKind,
    pub reply: String,
}

impl StaticProvider {
    pub fn new(kind: ProviderKind, reply: &str) -> Arc<dyn Provider> {
        Arc::new(Self {
            kind,
            reply: reply.to_string(),
        })
    }
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

/// 总是失败的提供商
pub struct FailingProvider {
    pub kind: ProviderKind,
    pub error: fn() -> TranslationError,
}

impl FailingProvider {
    pub fn unavailable(kind: ProviderKind) -> Arc<dyn Provider> {
        Arc::new(Self {
            kind,
            error: || TranslationError::ProviderUnavailable("service down".to_string()),
        })
    }

    pub fn quota_exhausted(kind: ProviderKind) -> Arc<dyn Provider> {
        Arc::new(Self {
            kind,
            error: || TranslationError::QuotaExhausted("free tier used up".to_string()),
        })
    }
}

#[async_trait]
impl Provider for FailingProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn attempt(&self, _op: &Operation) -> TranslationResult<String> {
        Err((self.error)())
    }
}

/// 统计被调用次数的成功提供商，验证缓存是否拦截了重复请求
pub struct CountingProvider {
    pub kind: ProviderKind,
    pub reply: String,
    pub calls: AtomicUsize,
}

impl CountingProvider {
    pub fn new(kind: ProviderKind, reply: &str) -> Arc<Self> {
        Arc::new(Self {
            kind,
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for CountingProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn attempt(&self, _op: &Operation) -> TranslationResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// 用给定链装配编排器
pub fn orchestrator_with(chain: Vec<Arc<dyn Provider>>) -> Arc<TranslationOrchestrator> {
    Arc::new(TranslationOrchestrator::with_chains(
        chain.clone(),
        chain,
        128,
    ))
}

/// 用给定编排器打开一篇测试文档
pub fn open_session(
    orchestrator: Arc<TranslationOrchestrator>,
    text: &str,
    level: CefrLevel,
) -> ReaderSession {
    let metadata = DocumentMetadata::new("test-doc", "Testdokument", "German", level)
        .with_author("Testautor");
    ReaderSession::open(
        TextSource::Blob(text.to_string()),
        metadata,
        orchestrator,
        Arc::new(MemoryPreferenceStore::new()),
        "English",
    )
    .expect("test document should open")
}
