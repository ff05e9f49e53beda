//! 分页
//!
//! 以空行分隔的段落为最小单位，贪心地把段落累积成页。单个段落从不
//! 跨页拆分，即使它自身超过页预算。

use crate::text::words::count_words;

/// 每页的近似词数
pub const WORDS_PER_PAGE: usize = 300;

/// 页与页之间、以及页内段落之间的分隔符
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// 将文本切分为页
///
/// 不变量：
/// - 每个输出页修剪后非空；
/// - 各页按顺序以段落分隔符连接后，与按段落规范化的输入无损等价；
/// - 没有任何段落超预算的文本恰好产生一页（整篇文本）。
pub fn split_into_pages(text: &str, words_per_page: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let paragraphs = split_paragraphs(text);

    let mut pages: Vec<String> = Vec::new();
    let mut current_page = String::new();
    let mut current_word_count = 0usize;

    for paragraph in paragraphs {
        let paragraph_word_count = count_words(paragraph);

        // 加入该段会超出预算时另起一页；当前页为空则照常接收，
        // 保证超长段落也能独占一页而不被拆分
        if current_word_count + paragraph_word_count > words_per_page && !current_page.is_empty() {
            pages.push(std::mem::take(&mut current_page));
            current_page.push_str(paragraph);
            current_word_count = paragraph_word_count;
        } else {
            if !current_page.is_empty() {
                current_page.push_str(PARAGRAPH_SEPARATOR);
            }
            current_page.push_str(paragraph);
            current_word_count += paragraph_word_count;
        }
    }

    if !current_page.trim().is_empty() {
        pages.push(current_page);
    }

    pages
}

/// 按空行边界切出修剪后的非空段落
fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
