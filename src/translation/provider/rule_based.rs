//! 本地规则降级
//!
//! 链尾的离线提供商，从不失败：简化靠复杂词→简单词的替换表加长句
//! 切分，翻译和查词在远程链全部耗尽时退化为确定性的占位文本。

use async_trait::async_trait;
use regex::RegexBuilder;

use crate::cefr::CefrLevel;
use crate::translation::error::TranslationResult;
use crate::translation::provider::{Operation, Provider, ProviderKind};

/// 英语复杂词→简单词替换表
const SIMPLE_WORDS_EN: &[(&str, &str)] = &[
    ("utilize", "use"),
    ("purchase", "buy"),
    ("approximately", "about"),
    ("commence", "start"),
    ("terminate", "end"),
    ("demonstrate", "show"),
    ("acquire", "get"),
    ("assistance", "help"),
    ("sufficient", "enough"),
    ("prior", "before"),
    ("subsequent", "after"),
    ("additional", "more"),
    ("obtain", "get"),
    ("possess", "have"),
    ("comprehend", "understand"),
    ("endeavor", "try"),
    ("facilitate", "help"),
    ("implement", "do"),
    ("nevertheless", "but"),
    ("consequently", "so"),
    ("therefore", "so"),
    ("furthermore", "also"),
    ("however", "but"),
    ("regarding", "about"),
    ("concerning", "about"),
    ("enormous", "huge"),
    ("minuscule", "tiny"),
    ("substantial", "big"),
    ("diminish", "reduce"),
    ("ascertain", "find out"),
    ("component", "part"),
    ("construct", "build"),
    ("modify", "change"),
];

/// 德语复杂词→简单词替换表
const SIMPLE_WORDS_DE: &[(&str, &str)] = &[
    ("verwenden", "benutzen"),
    ("erwerben", "kaufen"),
    ("ungefähr", "etwa"),
    ("beginnen", "anfangen"),
    ("beenden", "aufhören"),
    ("demonstrieren", "zeigen"),
    ("erhalten", "bekommen"),
    ("Unterstützung", "Hilfe"),
    ("ausreichend", "genug"),
    ("zusätzlich", "mehr"),
    ("besitzen", "haben"),
    ("begreifen", "verstehen"),
    ("versuchen", "probieren"),
    ("dennoch", "aber"),
    ("folglich", "also"),
    ("außerdem", "auch"),
    ("jedoch", "aber"),
    ("bezüglich", "über"),
    ("enorm", "sehr groß"),
    ("erheblich", "groß"),
    ("verringern", "weniger machen"),
];

/// 长句判定阈值（词数）
const LONG_SENTENCE_WORDS: usize = 15;

fn word_replacements(language: &str) -> &'static [(&'static str, &'static str)] {
    let lang = language.to_lowercase();
    if lang.contains("german") || lang.contains("deutsch") || lang == "de" {
        SIMPLE_WORDS_DE
    } else {
        SIMPLE_WORDS_EN
    }
}

/// 用词边界匹配替换复杂词
fn replace_complex_words(text: &str, language: &str) -> String {
    let mut simplified = text.to_string();

    for (complex, simple) in word_replacements(language) {
        let pattern = format!(r"\b{}\b", regex::escape(complex));
        let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(re) => re,
            Err(_) => continue,
        };
        simplified = re.replace_all(&simplified, *simple).into_owned();
    }

    simplified
}

/// 在逗号和并列连词处切开过长的句子
fn split_long_sentences(text: &str) -> String {
    let conjunctions = [
        (r",\s+", ". "),
        (r"\s+and\s+", ". "),
        (r"\s+or\s+", ". "),
        (r"\s+but\s+", ". "),
        (r"\s+und\s+", ". "),
        (r"\s+oder\s+", ". "),
        (r"\s+aber\s+", ". "),
    ];

    text.split(". ")
        .map(|sentence| {
            if sentence.split_whitespace().count() <= LONG_SENTENCE_WORDS {
                return sentence.to_string();
            }
            let mut split = sentence.to_string();
            for (pattern, replacement) in &conjunctions {
                if let Ok(re) = RegexBuilder::new(pattern).case_insensitive(true).build() {
                    split = re.replace_all(&split, *replacement).into_owned();
                }
            }
            split
        })
        .collect::<Vec<_>>()
        .join(". ")
}

/// 按CEFR等级做规则简化
///
/// C1/C2不需要简化，原文原样返回。C1以下替换复杂词；A1/A2另外
/// 切分长句。
pub fn simplify_for_level(text: &str, language: &str, target_level: CefrLevel) -> String {
    if target_level >= CefrLevel::C1 {
        return text.to_string();
    }

    let mut simplified = replace_complex_words(text, language);

    if target_level <= CefrLevel::A2 {
        simplified = split_long_sentences(&simplified);
    }

    simplified
}

/// 所有远程服务都失败时的确定性占位文本，原文逐字保留在其中
pub fn create_placeholder(text: &str, target_language: &str, cefr_level: CefrLevel) -> String {
    format!(
        "[Translation service temporarily unavailable]\n\n\
         Note: We're currently unable to translate this text to {} at {} level.\n\
         Please check your internet connection or try again later.\n\n\
         Original text:\n{}",
        target_language, cefr_level, text
    )
}

/// 查词降级的模板字符串
pub fn word_unavailable(word: &str, target_language: &str) -> String {
    format!("{} = [{} translation unavailable]", word, target_language)
}

/// 链尾提供商：永不失败的本地规则实现
pub struct RuleBasedProvider;

#[async_trait]
impl Provider for RuleBasedProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::RuleBased
    }

    async fn attempt(&self, op: &Operation) -> TranslationResult<String> {
        match op {
            Operation::Translate(req) => Ok(create_placeholder(
                &req.source_text,
                &req.target_language,
                req.cefr_level,
            )),
            Operation::Word {
                word,
                target_language,
                ..
            } => Ok(word_unavailable(word, target_language)),
            Operation::Simplify {
                text,
                language,
                target_level,
            } => Ok(simplify_for_level(text, language, *target_level)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_dictionary_words() {
        let text = "We utilize tools to demonstrate progress.";
        let simplified = simplify_for_level(text, "English", CefrLevel::B1);
        assert_eq!(simplified, "We use tools to show progress.");
    }

    #[test]
    fn test_replacement_is_case_insensitive() {
        let simplified = simplify_for_level("Utilize it. However, wait.", "English", CefrLevel::B1);
        assert!(!simplified.to_lowercase().contains("utilize"));
        assert!(!simplified.to_lowercase().contains("however"));
    }

    #[test]
    fn test_word_boundaries_respected() {
        // "priority" 含有 "prior"，但不是独立词，不得被替换
        let simplified = simplify_for_level("The priority is clear.", "English", CefrLevel::B1);
        assert_eq!(simplified, "The priority is clear.");
    }

    #[test]
    fn test_c1_c2_left_unchanged() {
        let text = "We utilize sophisticated methodology.";
        assert_eq!(simplify_for_level(text, "English", CefrLevel::C1), text);
        assert_eq!(simplify_for_level(text, "English", CefrLevel::C2), text);
    }

    #[test]
    fn test_german_replacements() {
        let simplified = simplify_for_level("Wir besitzen ein Auto.", "German", CefrLevel::B1);
        assert_eq!(simplified, "Wir haben ein Auto.");
    }

    #[test]
    fn test_a1_splits_long_sentences() {
        let text = "The cat sat on the mat and the dog ran through the garden and the bird flew away quickly.";
        let simplified = simplify_for_level(text, "English", CefrLevel::A1);
        // 并列连词处被切开，句子数量增加
        assert!(simplified.matches(". ").count() > 0);
        assert!(!simplified.contains(" and "));
    }

    #[test]
    fn test_b1_keeps_sentence_structure() {
        let text = "The cat sat on the mat and the dog ran through the garden and the bird flew away quickly.";
        let simplified = simplify_for_level(text, "English", CefrLevel::B1);
        // B1只换词不切句
        assert!(simplified.contains(" and "));
    }

    #[test]
    fn test_placeholder_contains_original_verbatim() {
        let placeholder = create_placeholder("Hallo Welt", "English", CefrLevel::B2);
        assert!(placeholder.contains("Hallo Welt"));
        assert!(placeholder.contains("English"));
        assert!(placeholder.contains("B2"));
    }

    #[test]
    fn test_word_unavailable_template() {
        assert_eq!(
            word_unavailable("Katze", "English"),
            "Katze = [English translation unavailable]"
        );
    }

    #[tokio::test]
    async fn test_rule_based_provider_never_fails() {
        let provider = RuleBasedProvider;
        let op = Operation::Simplify {
            text: "We utilize tools.".to_string(),
            language: "English".to_string(),
            target_level: CefrLevel::A2,
        };
        assert_eq!(provider.attempt(&op).await.unwrap(), "We use tools.");
    }
}
