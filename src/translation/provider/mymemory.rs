//! 无密钥REST提供商B
//!
//! GET端点，参数 `q` 与 `langpair=源|目标`，返回
//! `{responseStatus, responseData: {translatedText}}`。长文本按段落
//! 逐段翻译后重新拼接，绕开单次请求的长度限制。

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::languages::language_code;
use crate::translation::provider::{Operation, Provider, ProviderKind};

pub struct MyMemoryProvider {
    client: reqwest::Client,
    api_url: String,
}

impl MyMemoryProvider {
    pub fn new(api_url: &str, timeout: Duration) -> TranslationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslationError::ConfigError(format!("HTTP客户端构建失败: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
        })
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> TranslationResult<String> {
        // 该端点要求具体的语言对，"auto" 退化为英语
        let source_code = if source_language == "auto" {
            "en".to_string()
        } else {
            language_code(source_language)
        };
        let target_code = language_code(target_language);
        let lang_pair = format!("{}|{}", source_code, target_code);

        let paragraphs: Vec<&str> = text
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if paragraphs.len() > 1 {
            let mut translated = Vec::with_capacity(paragraphs.len());
            for paragraph in paragraphs {
                translated.push(self.translate_segment(paragraph, &lang_pair).await?);
            }
            Ok(translated.join("\n\n"))
        } else {
            self.translate_segment(text, &lang_pair).await
        }
    }

    async fn translate_segment(&self, text: &str, lang_pair: &str) -> TranslationResult<String> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| TranslationError::ConfigError(format!("无效的API URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("q", text)
            .append_pair("langpair", lang_pair);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::ProviderUnavailable(format!(
                "HTTP {}",
                status
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

        // responseStatus偶尔以字符串形式返回，两种都接受
        let response_status = payload
            .get("responseStatus")
            .map(|v| v.as_i64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
            .flatten()
            .ok_or_else(|| {
                TranslationError::MalformedResponse("缺少responseStatus".to_string())
            })?;

        if response_status != 200 {
            let details = payload
                .get("responseDetails")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            // 免费额度用尽时端点用责备性的大写警告回复
            if response_status == 403 || response_status == 429 {
                return Err(TranslationError::QuotaExhausted(details));
            }
            return Err(TranslationError::ProviderUnavailable(details));
        }

        payload
            .get("responseData")
            .and_then(|d| d.get("translatedText"))
            .and_then(|t| t.as_str())
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.to_string())
            .ok_or(TranslationError::NoTranslationFound)
    }
}

#[async_trait]
impl Provider for MyMemoryProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::MyMemory
    }

    async fn attempt(&self, op: &Operation) -> TranslationResult<String> {
        match op {
            Operation::Translate(req) => {
                self.translate(&req.source_text, &req.source_language, &req.target_language)
                    .await
            }
            Operation::Word {
                word,
                target_language,
                ..
            } => self.translate(word, "auto", target_language).await,
            Operation::Simplify { .. } => Err(TranslationError::InvalidInput(
                "REST端点不支持等级简化".to_string(),
            )),
        }
    }
}
