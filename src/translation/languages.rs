//! 语言名称到ISO代码的映射
//!
//! 两个无密钥REST提供商都只接受语言代码；生成式模型端点则直接使用
//! 自然语言名称。未知名称退化为小写前两个字符。

/// 语言名称 → 代码映射表
const LANGUAGE_MAP: &[(&str, &str)] = &[
    ("english", "en"),
    ("german", "de"),
    ("spanish", "es"),
    ("french", "fr"),
    ("italian", "it"),
    ("portuguese", "pt"),
    ("russian", "ru"),
    ("chinese", "zh"),
    ("japanese", "ja"),
    ("korean", "ko"),
    ("arabic", "ar"),
    ("dutch", "nl"),
    ("polish", "pl"),
    ("turkish", "tr"),
];

/// 把语言名称转换为ISO代码
///
/// 已经是代码的输入（两个小写字母）原样通过。
pub fn language_code(language: &str) -> String {
    let normalized = language.trim().to_lowercase();

    for (name, code) in LANGUAGE_MAP {
        if normalized == *name || normalized == *code {
            return (*code).to_string();
        }
    }

    normalized.chars().take(2).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names() {
        assert_eq!(language_code("English"), "en");
        assert_eq!(language_code("german"), "de");
        assert_eq!(language_code(" Chinese "), "zh");
    }

    #[test]
    fn test_codes_pass_through() {
        assert_eq!(language_code("de"), "de");
        assert_eq!(language_code("auto"), "au"); // 未知名称取前两个字符
    }
}
