// Use case: transcribe_video.

use crate::application::context::AppContext;
use crate::domain::entities::ai_generation::GenerationKind;
use crate::domain::entities::transcription::Platform;
use crate::infrastructure::db::dto::AiGenerationRow;
use crate::infrastructure::providers::ProviderError;
use crate::infrastructure::providers::scrapecreators::ScrapeCreatorsClient;
use serde_json::Value;
use time::OffsetDateTime;
use tracing::{info, warn};

const PROVIDER_MODEL: &str = "scrapecreators";

/// Transcribes a YouTube or Instagram video through the transcription provider.
pub struct TranscribeVideoUseCase;

#[derive(Debug, PartialEq, Eq)]
pub enum TranscribeVideoError {
    Validation(String),
    Provider(ProviderError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscribeVideoResult {
    pub transcription: Option<String>,
    pub platform: Platform,
    pub url: String,
    pub metadata: Value,
}

impl TranscribeVideoUseCase {
    pub async fn execute(
        ctx: &AppContext,
        url: Option<&str>,
    ) -> Result<TranscribeVideoResult, TranscribeVideoError> {
        // Step 1: Validate the URL and detect the platform.
        let url = url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| TranscribeVideoError::Validation("url is required".to_string()))?;
        let platform = Platform::detect(url).ok_or_else(|| {
            TranscribeVideoError::Validation(
                "unsupported platform: only YouTube and Instagram are supported".to_string(),
            )
        })?;

        // Step 2: Ask the provider.
        let transcript = ScrapeCreatorsClient::new(&ctx.http, &ctx.settings.transcription)
            .transcribe(url, platform)
            .await
            .map_err(|err| {
                warn!(platform = platform.as_str(), error = %err, "transcription_failed");
                TranscribeVideoError::Provider(err)
            })?;

        // Step 3: Record usage; a failed write does not fail the request.
        let row = AiGenerationRow {
            id: uuid::Uuid::new_v4(),
            kind: GenerationKind::Transcription.as_str().to_string(),
            prompt: url.to_string(),
            result: transcript.text.clone(),
            model: PROVIDER_MODEL.to_string(),
            tokens_used: None,
            created_at: OffsetDateTime::now_utc(),
        };
        if let Err(err) = ctx.repos.ai_generation.insert(&row).await {
            warn!(error = %err, "transcription_not_recorded");
        }
        info!(platform = platform.as_str(), "transcription_completed");

        Ok(TranscribeVideoResult {
            transcription: transcript.text,
            platform,
            url: url.to_string(),
            metadata: transcript.metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{TranscribeVideoError, TranscribeVideoUseCase};
    use crate::application::context::test_support::test_context;
    use crate::infrastructure::providers::ProviderError;

    #[tokio::test]
    async fn given_blank_url_when_execute_should_reject() {
        let ctx = test_context();

        let err = TranscribeVideoUseCase::execute(&ctx, Some("  ")).await.unwrap_err();

        assert_eq!(err, TranscribeVideoError::Validation("url is required".to_string()));
    }

    #[tokio::test]
    async fn given_vimeo_url_when_execute_should_reject_platform() {
        let ctx = test_context();

        let err = TranscribeVideoUseCase::execute(&ctx, Some("https://vimeo.com/x"))
            .await
            .unwrap_err();

        assert!(matches!(err, TranscribeVideoError::Validation(_)));
    }

    #[tokio::test]
    async fn given_no_api_key_when_execute_should_report_not_configured() {
        let ctx = test_context();

        let err = TranscribeVideoUseCase::execute(&ctx, Some("https://youtu.be/x"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TranscribeVideoError::Provider(ProviderError::NotConfigured("ScrapeCreators"))
        );
    }
}
