//! OpenAI兼容翻译后端
//!
//! 定义单次翻译交换的后端契约，并提供基于chat-completions协议的
//! 阻塞HTTP实现。请求超时、状态码和响应体错误映射到收窄的错误
//! 分类上，编排层据此区分"服务不可达"与"服务返回垃圾"。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{TranslationError, TranslationResult};
use crate::config::ApiConfig;
use crate::locale::LocaleTarget;

/// 单次翻译请求
#[derive(Debug, Clone)]
pub struct TranslationRequest<'a> {
    pub key: &'a str,
    pub text: &'a str,
    pub locale: &'a LocaleTarget,
}

/// 翻译后端契约
///
/// 一次请求、一次响应，无重试逻辑；重试由编排层负责。
pub trait TranslationBackend {
    fn translate_raw(&self, request: &TranslationRequest<'_>) -> TranslationResult<String>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    top_p: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// chat-completions协议的阻塞客户端
pub struct LlmClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    /// 创建客户端，`timeout`为单次请求的完整时限
    pub fn new(api: &ApiConfig, timeout: Duration) -> TranslationResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslationError::InvalidConfig(format!("无法创建HTTP客户端: {e}")))?;

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            api_key: api.api_key.clone(),
            model: api.model.clone(),
        })
    }

    fn system_prompt(locale: &LocaleTarget) -> String {
        format!(
            "你是Android string本地化翻译专家。\n\
             请自动识别输入文本语言,并将其翻译为{name}({code})\n\
             \n\
             输入说明:\n\
             - 输入为JSON,包含key(参考)和value\n\
             - 只对value进行翻译\n\
             \n\
             输出规则:\n\
             - 只返回翻译后的value内容\n\
             - 不返回key\n\
             - 不包含任何额外说明\n\
             \n\
             保留规则:\n\
             - 所有格式化占位符必须保持不变(如%s、%d、%1$s等)\n\
             \n\
             翻译要求:\n\
             - 严格按照原文意思翻译，使用最高翻译质量。",
            name = locale.display_name(),
            code = locale.code(),
        )
    }
}

impl TranslationBackend for LlmClient {
    fn translate_raw(&self, request: &TranslationRequest<'_>) -> TranslationResult<String> {
        let system = Self::system_prompt(request.locale);
        let user = serde_json::json!({
            "key": request.key,
            "value": request.text,
        })
        .to_string();

        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            temperature: 0.2,
            top_p: 0.9,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::BadStatus {
                status: status.as_u16(),
            });
        }

        let body: ChatCompletionResponse = response
            .json()
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

        match body.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content),
            None => Err(TranslationError::MalformedResponse(
                "choices为空".to_string(),
            )),
        }
    }
}
