//! 生成式模型提供商
//!
//! 密钥认证的OpenAI兼容聊天端点。链内自带二级降级：按优先级逐个尝试
//! 模型标识，第一个返回有效、格式正确响应的模型获胜；全部失败视为
//! 整个阶段失败，编排器随即推进到下一个提供商。

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::provider::{Operation, Provider, ProviderKind, TranslationRequest};

/// OpenAI兼容聊天端点提供商
pub struct AiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    models: Vec<String>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl AiProvider {
    pub fn new(
        base_url: &str,
        api_key: &str,
        models: Vec<String>,
        timeout: Duration,
        max_tokens: u32,
    ) -> TranslationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslationError::ConfigError(format!("HTTP客户端构建失败: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            models,
            max_tokens,
        })
    }

    /// 带模型降级的聊天调用
    async fn call_chat(&self, prompt: &str, operation: &str) -> TranslationResult<String> {
        if self.api_key.trim().is_empty() {
            return Err(TranslationError::ConfigError(
                "未配置生成式模型API密钥".to_string(),
            ));
        }

        let mut last_error =
            TranslationError::ProviderUnavailable("模型列表为空".to_string());

        for model in &self.models {
            tracing::debug!("尝试模型 {} 执行 {}", model, operation);
            match self.call_model(model, prompt).await {
                Ok(text) => {
                    tracing::debug!("模型 {} 成功完成 {}", model, operation);
                    return Ok(text);
                }
                Err(e) => {
                    tracing::warn!("模型 {} 执行 {} 失败: {}", model, operation, e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    async fn call_model(&self, model: &str, prompt: &str) -> TranslationResult<String> {
        let body = json!({
            "model": model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": self.max_tokens,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranslationError::QuotaExhausted(format!(
                "模型 {} 返回 429",
                model
            )));
        }
        if !status.is_success() {
            return Err(TranslationError::ProviderUnavailable(format!(
                "HTTP {}",
                status
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                TranslationError::MalformedResponse("响应缺少choices".to_string())
            })?;

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(TranslationError::NoTranslationFound);
        }
        Ok(trimmed.to_string())
    }

    fn translate_prompt(req: &TranslationRequest) -> String {
        let source_hint = if req.source_language == "auto" {
            String::new()
        } else {
            format!("Source language: {}\n\n", req.source_language)
        };

        format!(
            "You are a language learning assistant. Translate the following text to {target} at CEFR level {level}.\n\n\
             CRITICAL REQUIREMENTS:\n\
             1. Maintain the EXACT sentence structure of the original text\n\
             2. Each sentence in the original must correspond to exactly one sentence in the translation\n\
             3. Keep word order as close as possible to the original for structural comparison\n\
             4. Only adjust vocabulary complexity to match the {level} level\n\
             5. Preserve paragraph breaks and formatting\n\
             6. Do NOT add explanations, only provide the translation\n\n\
             {source_hint}Text to translate:\n{text}",
            target = req.target_language,
            level = req.cefr_level,
            source_hint = source_hint,
            text = req.source_text,
        )
    }

    fn word_prompt(word: &str, target_language: &str, context: &str) -> String {
        let context_hint = if context.is_empty() {
            String::new()
        } else {
            format!("Context: \"{}\"\n", context)
        };

        format!(
            "Translate the word \"{word}\" to {target}.\n\
             {context_hint}\n\
             Provide:\n\
             1. The translation\n\
             2. A brief explanation (1 sentence) if helpful for understanding\n\n\
             Format: [translation] - [brief explanation if needed]\n\
             Example: \"casa - house, home\"\n\n\
             Keep it concise.",
            word = word,
            target = target_language,
            context_hint = context_hint,
        )
    }

    fn simplify_prompt(text: &str, language: &str, target_level: &str) -> String {
        format!(
            "You are a language learning assistant. Simplify the following {language} text to CEFR level {level}.\n\n\
             CRITICAL REQUIREMENTS:\n\
             1. Maintain the EXACT sentence structure and count\n\
             2. Each sentence must remain one sentence\n\
             3. Keep the same word order as much as possible\n\
             4. Only replace complex vocabulary with simpler alternatives\n\
             5. Preserve all paragraph breaks\n\
             6. Do NOT add explanations\n\n\
             Text to simplify:\n{text}",
            language = language,
            level = target_level,
            text = text,
        )
    }
}

#[async_trait]
impl Provider for AiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ai
    }

    async fn attempt(&self, op: &Operation) -> TranslationResult<String> {
        match op {
            Operation::Translate(req) => {
                self.call_chat(&Self::translate_prompt(req), "translation").await
            }
            Operation::Word {
                word,
                target_language,
                context,
            } => {
                self.call_chat(
                    &Self::word_prompt(word, target_language, context),
                    "word translation",
                )
                .await
            }
            Operation::Simplify {
                text,
                language,
                target_level,
            } => {
                self.call_chat(
                    &Self::simplify_prompt(text, language, target_level.code()),
                    "simplification",
                )
                .await
            }
        }
    }
}
