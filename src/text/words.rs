//! 词边界与句子工具
//!
//! 查词手势只携带一个字符偏移；从该偏移向左右扫描词组成字符即可还原
//! 被点中的词。偏移一律按字符计数，不是字节。

/// 默认阅读速度（词/分钟）
pub const WORDS_PER_MINUTE: usize = 200;

/// 从文本中解析出的词及其字符偏移范围
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAt {
    pub word: String,
    /// 词首的字符偏移（含）
    pub start: usize,
    /// 词尾的字符偏移（不含）
    pub end: usize,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '-'
}

/// 统计文本中的词数
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 估算阅读时间（分钟），向上取整
pub fn estimate_reading_time(text: &str, words_per_minute: usize) -> usize {
    if words_per_minute == 0 {
        return 0;
    }
    count_words(text).div_ceil(words_per_minute)
}

/// 解析字符偏移处的词
///
/// 从偏移位置向左右扫描，只要字符是词组成字符就继续；偏移落在
/// 非词字符（空格、标点）上或超出文本时返回 `None`。
pub fn word_at_offset(text: &str, offset: usize) -> Option<WordAt> {
    let chars: Vec<char> = text.chars().collect();
    if offset >= chars.len() || !is_word_char(chars[offset]) {
        return None;
    }

    let mut start = offset;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }

    let mut end = offset;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }

    Some(WordAt {
        word: chars[start..end].iter().collect(),
        start,
        end,
    })
}

/// 提取包含指定字符偏移的句子，作为查词的上下文
///
/// 句子在 `.`、`!`、`?` 之后断开；没有终止标点的尾部整体算一句。
pub fn sentence_at_offset(text: &str, offset: usize) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    if offset >= chars.len() {
        return None;
    }

    let mut sentence_start = 0usize;
    let mut i = 0usize;
    while i < chars.len() {
        let c = chars[i];
        if c == '.' || c == '!' || c == '?' {
            // 连续的终止标点算作同一句的结尾
            while i + 1 < chars.len() && matches!(chars[i + 1], '.' | '!' | '?') {
                i += 1;
            }
            if offset <= i {
                let sentence: String = chars[sentence_start..=i].iter().collect();
                let trimmed = sentence.trim();
                return (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
            sentence_start = i + 1;
        }
        i += 1;
    }

    let sentence: String = chars[sentence_start..].iter().collect();
    let trimmed = sentence.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
