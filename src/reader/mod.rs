//! # 阅读会话
//!
//! 把文本源、翻译编排器、手势事件和语言偏好装配成一个可操作的
//! 阅读会话：翻页、整页翻译、等级简化和查词。
//!
//! ## 模块组织
//!
//! - `source` - 文本源和文档元数据
//! - `prefs` - 按文档记忆目标语言的偏好存储
//! - `session` - 会话状态机和手势到操作的映射

pub mod prefs;
pub mod session;
pub mod source;

pub use prefs::{JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use session::{ReaderAction, ReaderSession};
pub use source::{DocumentMetadata, TextSource};
