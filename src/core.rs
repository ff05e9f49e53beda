use std::error::Error;
use std::fmt;

/// Represents errors that can occur outside the translation chain
///
/// 翻译链内部的失败从不以错误形式向上传播（见 `translation` 模块）；
/// 此类型只承载需要直接呈现给用户的问题，例如空的提取文本或
/// 无效的文档来源，不做重试。
#[derive(Debug)]
pub struct ReaderError {
    details: String,
}

impl ReaderError {
    /// Creates a new ReaderError with the given message
    pub fn new(msg: &str) -> ReaderError {
        ReaderError {
            details: msg.to_string(),
        }
    }
}

impl fmt::Display for ReaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.details)
    }
}

impl Error for ReaderError {
    fn description(&self) -> &str {
        &self.details
    }
}
