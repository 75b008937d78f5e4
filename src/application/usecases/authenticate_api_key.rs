// Use case: authenticate_api_key.

use crate::application::context::AppContext;
use crate::domain::entities::api_key::{KeyRejection, check_usable};
use time::OffsetDateTime;
use tracing::warn;

/// Resolves a presented `x-api-key` value to an active, unexpired key.
pub struct AuthenticateApiKeyUseCase;

#[derive(Debug, PartialEq, Eq)]
pub enum AuthenticateApiKeyError {
    Missing,
    Invalid,
    Storage(String),
}

#[derive(Debug, Clone)]
pub struct AuthenticateApiKeyResult {
    pub key_id: uuid::Uuid,
    pub permissions: Vec<String>,
}

impl AuthenticateApiKeyUseCase {
    /// Validate the key and record its use.
    pub async fn execute(
        ctx: &AppContext,
        presented: Option<&str>,
    ) -> Result<AuthenticateApiKeyResult, AuthenticateApiKeyError> {
        // Step 1: Require a non-blank key.
        let Some(presented) = presented.map(str::trim).filter(|k| !k.is_empty()) else {
            return Err(AuthenticateApiKeyError::Missing);
        };

        // Step 2: Look up an active key with this exact value.
        let Some(row) = ctx
            .repos
            .api_key
            .get_active_by_key(presented)
            .await
            .map_err(|e| AuthenticateApiKeyError::Storage(format!("{e:?}")))?
        else {
            return Err(AuthenticateApiKeyError::Invalid);
        };

        // Step 3: Reject expired keys.
        let now = OffsetDateTime::now_utc();
        if let Err(rejection) = check_usable(row.is_active, row.expires_at, now) {
            let reason = match rejection {
                KeyRejection::Inactive => "inactive",
                KeyRejection::Expired => "expired",
            };
            warn!(key_id = %row.id, reason, "api_key_rejected");
            return Err(AuthenticateApiKeyError::Invalid);
        }

        // Step 4: Record usage; failures here never block the request.
        if let Err(err) = ctx.repos.api_key.touch_last_used(row.id, now).await {
            warn!(key_id = %row.id, error = %err, "api_key_last_used_not_recorded");
        }

        Ok(AuthenticateApiKeyResult {
            key_id: row.id,
            permissions: row.permissions,
        })
    }
}
