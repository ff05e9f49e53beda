//! # 文本处理模块
//!
//! 这个模块包含阅读核心的纯文本算法：
//!
//! - `pagination` - 按段落边界把整篇文本切分为页
//! - `words` - 词边界解析、句子提取和阅读量统计

pub mod pagination;
pub mod words;

// Re-export commonly used items for convenience
pub use pagination::{split_into_pages, WORDS_PER_PAGE};
pub use words::{count_words, estimate_reading_time, sentence_at_offset, word_at_offset};
