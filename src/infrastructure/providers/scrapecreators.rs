//! Video transcription client for the ScrapeCreators API.

use super::{ProviderError, error_message};
use crate::config::Transcription;
use crate::domain::entities::transcription::Platform;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct TranscribeRequest<'a> {
    url: &'a str,
    platform: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: Option<String>,
    pub metadata: Value,
}

pub struct ScrapeCreatorsClient<'a> {
    http: &'a reqwest::Client,
    settings: &'a Transcription,
}

impl<'a> ScrapeCreatorsClient<'a> {
    pub fn new(http: &'a reqwest::Client, settings: &'a Transcription) -> Self {
        Self { http, settings }
    }

    pub async fn transcribe(&self, url: &str, platform: Platform) -> Result<Transcript, ProviderError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ProviderError::NotConfigured("ScrapeCreators"))?;

        let endpoint = format!("{}/v1/transcribe", self.settings.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(endpoint)
            .bearer_auth(api_key)
            .timeout(Duration::from_millis(self.settings.timeout_ms))
            .json(&TranscribeRequest {
                url,
                platform: platform.as_str(),
            })
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.unwrap_or_default();
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or_else(|| "Transcription failed".to_string()),
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(Transcript {
            text: transcript_text(&body),
            metadata: body
                .get("metadata")
                .filter(|m| !m.is_null())
                .cloned()
                .unwrap_or_else(|| Value::Object(Default::default())),
        })
    }
}

/// First non-empty of `transcription`, `text`, `content`.
fn transcript_text(body: &Value) -> Option<String> {
    ["transcription", "text", "content"]
        .iter()
        .filter_map(|field| body.get(*field).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::transcript_text;
    use serde_json::json;

    #[test]
    fn given_transcription_field_should_prefer_it() {
        let body = json!({"transcription": "a", "text": "b"});
        assert_eq!(transcript_text(&body).as_deref(), Some("a"));
    }

    #[test]
    fn given_only_content_field_should_use_it() {
        let body = json!({"content": "c"});
        assert_eq!(transcript_text(&body).as_deref(), Some("c"));
    }

    #[test]
    fn given_empty_transcription_should_fall_through_to_text() {
        let body = json!({"transcription": "", "text": "b"});
        assert_eq!(transcript_text(&body).as_deref(), Some("b"));
    }

    #[test]
    fn given_no_known_field_should_return_none() {
        assert_eq!(transcript_text(&json!({"other": 1})), None);
    }
}
