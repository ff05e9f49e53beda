//! 无密钥REST提供商A
//!
//! 接受 `{q, source, target, format}` 的POST端点，返回
//! `{translatedText}`。配置里可以列多个实例URL，逐个尝试。

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::languages::language_code;
use crate::translation::provider::{Operation, Provider, ProviderKind};

pub struct LibreProvider {
    client: reqwest::Client,
    urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl LibreProvider {
    pub fn new(urls: Vec<String>, timeout: Duration) -> TranslationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslationError::ConfigError(format!("HTTP客户端构建失败: {}", e)))?;

        Ok(Self { client, urls })
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> TranslationResult<String> {
        let source_code = if source_language == "auto" {
            "auto".to_string()
        } else {
            language_code(source_language)
        };
        let target_code = language_code(target_language);

        let mut last_error =
            TranslationError::ProviderUnavailable("未配置实例URL".to_string());

        for url in &self.urls {
            match self
                .translate_with_instance(url, text, &source_code, &target_code)
                .await
            {
                Ok(result) => return Ok(result),
                Err(e) => {
                    tracing::warn!("实例 {} 失败: {}", url, e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    async fn translate_with_instance(
        &self,
        url: &str,
        text: &str,
        source_code: &str,
        target_code: &str,
    ) -> TranslationResult<String> {
        let body = json!({
            "q": text,
            "source": source_code,
            "target": target_code,
            "format": "text",
        });

        let response = self.client.post(url).json(&body).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranslationError::QuotaExhausted(format!("HTTP {}", status)));
        }
        if !status.is_success() {
            return Err(TranslationError::ProviderUnavailable(format!(
                "HTTP {}",
                status
            )));
        }

        let parsed: LibreResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

        match parsed.translated_text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(TranslationError::NoTranslationFound),
        }
    }
}

#[async_trait]
impl Provider for LibreProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Libre
    }

    async fn attempt(&self, op: &Operation) -> TranslationResult<String> {
        match op {
            Operation::Translate(req) => {
                // REST端点不理解CEFR等级；等级调整由编排器的规则后处理补上
                let source = if req.source_language == "auto" {
                    "en"
                } else {
                    &req.source_language
                };
                self.translate(&req.source_text, source, &req.target_language)
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
