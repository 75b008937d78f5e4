// Use case: generate_content.

use crate::application::context::AppContext;
use crate::domain::entities::ai_generation::{GenerationKind, Tone};
use crate::domain::services::prompt_builder::{self, DEFAULT_WORD_COUNT, PromptInput};
use crate::infrastructure::db::dto::AiGenerationRow;
use crate::infrastructure::providers::ProviderError;
use crate::infrastructure::providers::openrouter::{OpenRouterClient, display_model};
use time::OffsetDateTime;
use tracing::{info, warn};

/// Builds a prompt for the requested kind, asks the completion provider, and
/// records the exchange.
pub struct GenerateContentUseCase;

#[derive(Debug, PartialEq, Eq)]
pub enum GenerateContentError {
    Validation(String),
    Provider(ProviderError),
}

#[derive(Debug, Clone, Default)]
pub struct GenerateContentCommand {
    pub kind: String,
    pub prompt: Option<String>,
    pub content: Option<String>,
    pub context: Option<String>,
    pub model: Option<String>,
    pub tone: Option<String>,
    pub word_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateContentResult {
    pub content: Option<String>,
    pub model: String,
    pub tokens: Option<i64>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Missing or zero word counts fall back to the default.
fn requested_word_count(word_count: Option<u32>) -> u32 {
    word_count.filter(|&n| n > 0).unwrap_or(DEFAULT_WORD_COUNT)
}

impl GenerateContentUseCase {
    pub async fn execute(
        ctx: &AppContext,
        cmd: GenerateContentCommand,
    ) -> Result<GenerateContentResult, GenerateContentError> {
        // Step 1: Validate the kind and its required input.
        let kind = GenerationKind::parse(&cmd.kind).ok_or_else(|| {
            GenerateContentError::Validation(format!("invalid generation type: {}", cmd.kind))
        })?;
        let prompt = present(cmd.prompt.as_deref());
        let content = present(cmd.content.as_deref());
        if kind.needs_prompt() && prompt.is_none() {
            return Err(GenerateContentError::Validation("prompt is required".to_string()));
        }
        if !kind.needs_prompt() && content.is_none() {
            return Err(GenerateContentError::Validation("content is required".to_string()));
        }

        // Step 2: Build the prompt with defaults applied.
        let settings = &ctx.settings.ai;
        let model = present(cmd.model.as_deref()).unwrap_or(settings.default_model.as_str());
        let built = prompt_builder::build(&PromptInput {
            kind,
            prompt,
            content,
            context: cmd.context.as_deref(),
            tone: Tone::parse_or_default(cmd.tone.as_deref()),
            word_count: requested_word_count(cmd.word_count),
            language: &settings.language,
        });

        // Step 3: Ask the provider.
        let completion = OpenRouterClient::new(&ctx.http, settings)
            .complete(model, &built.system, &built.user, built.max_tokens)
            .await
            .map_err(|err| {
                warn!(kind = kind.as_str(), error = %err, "ai_generation_failed");
                GenerateContentError::Provider(err)
            })?;

        // Step 4: Record usage; a failed write does not fail the request.
        let short_model = display_model(model).to_string();
        let row = AiGenerationRow {
            id: uuid::Uuid::new_v4(),
            kind: kind.as_str().to_string(),
            prompt: built.user,
            result: completion.content.clone(),
            model: short_model.clone(),
            tokens_used: completion.total_tokens.and_then(|t| i32::try_from(t).ok()),
            created_at: OffsetDateTime::now_utc(),
        };
        if let Err(err) = ctx.repos.ai_generation.insert(&row).await {
            warn!(error = %err, "ai_generation_not_recorded");
        }
        info!(kind = kind.as_str(), model = %short_model, tokens = ?completion.total_tokens, "ai_generation_completed");

        Ok(GenerateContentResult {
            content: completion.content,
            model: short_model,
            tokens: completion.total_tokens,
        })
    }
}
