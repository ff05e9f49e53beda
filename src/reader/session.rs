//! 阅读会话状态机
//!
//! 一个会话对应一篇打开的文档：维护当前页、当前CEFR等级和
//! 按`(页, 等级)`键的翻译缓存，并把识别出的手势事件映射成具体的
//! 阅读操作。所有翻译类操作委托给编排器，因此和编排器一样从不
//! 失败。

use std::collections::HashMap;
use std::sync::Arc;

use crate::cefr::CefrLevel;
use crate::core::ReaderError;
use crate::gesture::GestureEvent;
use crate::reader::prefs::PreferenceStore;
use crate::reader::source::{DocumentMetadata, TextSource};
use crate::text::{sentence_at_offset, word_at_offset};
use crate::translation::{Translated, TranslationOrchestrator};

/// 手势映射出的阅读操作，交给展示层执行
#[derive(Debug, Clone, PartialEq)]
pub enum ReaderAction {
    /// 无需响应
    None,
    /// 已翻到指定页
    PageChanged(usize),
    /// 显示整页翻译
    TranslationShown(Translated),
    /// 收起整页翻译
    TranslationHidden,
    /// 临时显示简化一级的文本
    SimplifiedShown(Translated),
    /// 收起临时简化视图
    SimplifiedHidden,
    /// 显示查词结果
    WordLookup(Translated),
}

/// 一篇打开文档的阅读会话
pub struct ReaderSession {
    orchestrator: Arc<TranslationOrchestrator>,
    prefs: Arc<dyn PreferenceStore>,
    metadata: DocumentMetadata,
    pages: Vec<String>,
    current_page: usize,
    /// 文档的原始等级，可选等级范围的上界
    base_level: CefrLevel,
    /// 当前显示等级，只能从base_level往下调
    current_level: CefrLevel,
    target_language: String,
    /// 整页翻译缓存，键为（页号, 等级）
    translation_cache: HashMap<(usize, CefrLevel), Translated>,
    /// 等级简化缓存，键为（页号, 等级），保留产出结果的提供商标签
    simplified_cache: HashMap<(usize, CefrLevel), Translated>,
}

impl ReaderSession {
    /// 打开文档
    ///
    /// 目标语言优先取该文档记忆的偏好，否则用全局默认。
    pub fn open(
        source: TextSource,
        metadata: DocumentMetadata,
        orchestrator: Arc<TranslationOrchestrator>,
        prefs: Arc<dyn PreferenceStore>,
        default_language: &str,
    ) -> Result<Self, ReaderError> {
        let pages = source.into_pages()?;
        let target_language = prefs
            .language_for(&metadata.id)
            .unwrap_or_else(|| default_language.to_string());

        tracing::info!(
            "打开文档 {} ({}页, 等级{}, 目标语言{})",
            metadata.id,
            pages.len(),
            metadata.original_level,
            target_language
        );

        let base_level = metadata.original_level;
        Ok(Self {
            orchestrator,
            prefs,
            metadata,
            pages,
            current_page: 0,
            base_level,
            current_level: base_level,
            target_language,
            translation_cache: HashMap::new(),
            simplified_cache: HashMap::new(),
        })
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn current_level(&self) -> CefrLevel {
        self.current_level
    }

    pub fn base_level(&self) -> CefrLevel {
        self.base_level
    }

    /// 当前页的原始文本
    pub fn original_page_text(&self) -> &str {
        &self.pages[self.current_page]
    }

    /// 当前页在当前等级下应显示的文本
    ///
    /// 等级被降过且简化结果已缓存时显示简化文本，否则显示原文。
    pub fn display_text(&self) -> &str {
        if self.current_level < self.base_level {
            if let Some(simplified) = self
                .simplified_cache
                .get(&(self.current_page, self.current_level))
            {
                return &simplified.text;
            }
        }
        self.original_page_text()
    }

    /// 读者可选的等级范围：A1到文档原始等级
    pub fn offered_levels(&self) -> Vec<CefrLevel> {
        CefrLevel::levels_up_to(self.base_level)
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// 切换目标语言并记住该文档的选择
    pub fn set_target_language(&mut self, language: &str) -> Result<(), ReaderError> {
        self.target_language = language.to_string();
        // 换语言后旧译文全部失效
        self.translation_cache.clear();
        self.prefs.set_language(&self.metadata.id, language)
    }

    /// 翻到下一页，已在末页时返回false
    pub fn next_page(&mut self) -> bool {
        if self.current_page + 1 < self.pages.len() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// 翻到上一页，已在首页时返回false
    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 0 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// 跳到指定页
    pub fn go_to_page(&mut self, page: usize) -> Result<(), ReaderError> {
        if page >= self.pages.len() {
            return Err(ReaderError::new(&format!(
                "页号{}超出范围（共{}页）",
                page,
                self.pages.len()
            )));
        }
        self.current_page = page;
        Ok(())
    }

    /// 翻译当前页到目标语言，结果按（页, 等级）缓存
    pub async fn translate_current_page(&mut self) -> Translated {
        let key = (self.current_page, self.current_level);
        if let Some(cached) = self.translation_cache.get(&key) {
            return cached.clone();
        }

        let text = self.pages[self.current_page].clone();
        let result = self
            .orchestrator
            .translate(
                &text,
                &self.target_language,
                self.current_level,
                Some(&self.metadata.language),
            )
            .await;

        self.translation_cache.insert(key, result.clone());
        result
    }

    /// 把当前等级降低若干级并简化当前页
    ///
    /// 已在最低等级时不做任何事，返回None。
    pub async fn simplify_current(&mut self, steps: u8) -> Option<Translated> {
        let new_level = self.current_level.lower(steps)?;
        let result = self.simplify_to(new_level).await;
        self.current_level = new_level;
        Some(result)
    }

    /// 把当前等级恢复到文档原始等级
    pub fn restore_level(&mut self) {
        self.current_level = self.base_level;
    }

    /// 把当前页简化到指定等级，不改动会话等级
    ///
    /// 缓存命中时连同当初产出该简化的提供商标签一起返回。
    async fn simplify_to(&mut self, level: CefrLevel) -> Translated {
        let key = (self.current_page, level);
        if let Some(cached) = self.simplified_cache.get(&key) {
            return cached.clone();
        }

        let text = self.pages[self.current_page].clone();
        let result = self
            .orchestrator
            .simplify(&text, &self.metadata.language, level)
            .await;

        self.simplified_cache.insert(key, result.clone());
        result
    }

    /// 查询当前页指定字符偏移处的单词
    ///
    /// 上下文取该词所在的句子，帮助提供商消歧义。偏移处不是单词
    /// 时报错。
    pub async fn lookup_word(&self, offset: usize) -> Result<Translated, ReaderError> {
        let page_text = self.original_page_text();
        let word = word_at_offset(page_text, offset)
            .ok_or_else(|| ReaderError::new("该位置没有单词"))?;
        let context = sentence_at_offset(page_text, offset).unwrap_or_default();

        Ok(self
            .orchestrator
            .translate_word(&word.word, &self.target_language, &context)
            .await)
    }

    /// 把识别出的手势事件映射成阅读操作
    pub async fn handle_gesture(&mut self, event: GestureEvent) -> ReaderAction {
        match event {
            GestureEvent::SwipeLeft => {
                if self.next_page() {
                    ReaderAction::PageChanged(self.current_page)
                } else {
                    ReaderAction::None
                }
            }
            GestureEvent::SwipeRight => {
                if self.prev_page() {
                    ReaderAction::PageChanged(self.current_page)
                } else {
                    ReaderAction::None
                }
            }
            GestureEvent::LongPress => {
                let translated = self.translate_current_page().await;
                ReaderAction::TranslationShown(translated)
            }
            GestureEvent::LongPressEnd => ReaderAction::TranslationHidden,
            GestureEvent::DoubleTapLongPress => {
                // 按住期间临时看低一级的版本，不改动会话等级
                match self.current_level.lower(1) {
                    Some(level) => {
                        let simplified = self.simplify_to(level).await;
                        ReaderAction::SimplifiedShown(simplified)
                    }
                    None => ReaderAction::None,
                }
            }
            GestureEvent::DoubleTapLongPressEnd => ReaderAction::SimplifiedHidden,
            GestureEvent::WordTap { start, .. } => match self.lookup_word(start).await {
                Ok(translated) => ReaderAction::WordLookup(translated),
                Err(_) => ReaderAction::None,
            },
            GestureEvent::Tap => ReaderAction::None,
        }
    }
}
