//! 文本源和文档元数据

use serde::{Deserialize, Serialize};

use crate::cefr::CefrLevel;
use crate::core::ReaderError;
use crate::text::{split_into_pages, WORDS_PER_PAGE};

/// 阅读材料的来源形态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// 未分页的整块文本，装入会话时按词数预算分页
    Blob(String),
    /// 已经分好页的文本
    Pages(Vec<String>),
}

impl TextSource {
    /// 转成页列表，空文本报错
    pub fn into_pages(self) -> Result<Vec<String>, ReaderError> {
        let pages = match self {
            TextSource::Blob(text) => split_into_pages(&text, WORDS_PER_PAGE),
            TextSource::Pages(pages) => pages
                .into_iter()
                .filter(|p| !p.trim().is_empty())
                .collect(),
        };

        if pages.is_empty() {
            return Err(ReaderError::new("文本源为空"));
        }
        Ok(pages)
    }
}

/// 文档元数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub id: String,
    pub title: String,
    pub author: String,
    /// 文本本身的语言
    pub language: String,
    /// 作者标注的原始CEFR等级，决定可供降级的等级范围
    pub original_level: CefrLevel,
}

impl DocumentMetadata {
    pub fn new(id: &str, title: &str, language: &str, original_level: CefrLevel) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            author: String::new(),
            language: language.to_string(),
            original_level,
        }
    }

    pub fn with_author(mut self, author: &str) -> Self {
        self.author = author.to_string();
        self
    }
}
