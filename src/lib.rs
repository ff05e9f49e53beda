//! # Lingreader Library
//!
//! 面向语言学习者的阅读核心库：加载文本并分页，将原始触摸事件序列
//! 识别为高层手势，并通过带降级链的远程翻译服务调整词汇难度。
//!
//! ## 模块组织
//!
//! - `cefr` - CEFR语言等级及其全序运算
//! - `core` - 核心错误类型
//! - `env` - 类型安全的环境变量管理
//! - `gesture` - 触摸手势状态机与异步驱动
//! - `reader` - 阅读会话、文本来源与偏好存储
//! - `text` - 分页和词边界工具
//! - `translation` - 翻译编排器、提供商链与缓存

pub mod cefr;
pub mod core;
pub mod env;
pub mod gesture;
pub mod reader;
pub mod text;
pub mod translation;

// Re-export commonly used items for convenience
pub use cefr::CefrLevel;
pub use core::ReaderError;
pub use gesture::{GestureEvent, GestureRecognizer};
pub use reader::ReaderSession;
pub use translation::{ProviderKind, Translated, TranslationOrchestrator};

/// 初始化 tracing 日志订阅器
///
/// 日志级别来自 `LINGREADER_LOG_LEVEL` 环境变量（默认 `info`），
/// 也可以通过标准的 `RUST_LOG` 过滤指令覆盖。
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    use crate::env::EnvVar;

    let default_level = crate::env::core::LogLevel::get_or_default("info".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
