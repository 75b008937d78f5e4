use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub prompt: Option<String>,
    pub content: Option<String>,
    pub context: Option<String>,
    pub model: Option<String>,
    pub tone: Option<String>,
    pub word_count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub content: Option<String>,
    pub model: String,
    pub tokens: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct TranscribeRequest {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub transcription: Option<String>,
    pub platform: &'static str,
    pub url: String,
    pub metadata: Value,
}
