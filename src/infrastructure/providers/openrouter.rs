//! Chat-completions client for OpenRouter-compatible APIs.

use super::{ProviderError, error_message};
use crate::config::Ai;
use serde::{Deserialize, Serialize};

const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub content: Option<String>,
    pub total_tokens: Option<i64>,
}

pub struct OpenRouterClient<'a> {
    http: &'a reqwest::Client,
    settings: &'a Ai,
}

impl<'a> OpenRouterClient<'a> {
    pub fn new(http: &'a reqwest::Client, settings: &'a Ai) -> Self {
        Self { http, settings }
    }

    /// Send one system + user exchange and return the first choice.
    pub async fn complete(
        &self,
        model: &str,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<Completion, ProviderError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ProviderError::NotConfigured("OpenRouter"))?;

        let body = ChatRequest {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens,
        };

        let url = format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.settings.site_url)
            .header("X-Title", &self.settings.app_title)
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<serde_json::Value>().await.unwrap_or_default();
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or_else(|| "AI generation failed".to_string()),
            });
        }

        let parsed = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(Completion {
            content: parsed
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message)
                .and_then(|message| message.content),
            total_tokens: parsed.usage.and_then(|usage| usage.total_tokens),
        })
    }
}

/// Short model name reported to callers: the segment after the last `/`.
pub fn display_model(model: &str) -> &str {
    model.rsplit('/').next().filter(|s| !s.is_empty()).unwrap_or(model)
}
