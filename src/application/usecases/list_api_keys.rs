// Use case: list_api_keys.

use crate::application::context::AppContext;
use crate::application::shared::api_key_helpers::mask_api_key;
use crate::infrastructure::db::dto::ApiKeyRow;

/// Lists API keys with their values masked.
pub struct ListApiKeysUseCase;

#[derive(Debug)]
pub enum ListApiKeysError {
    Storage(String),
}

impl ListApiKeysUseCase {
    pub async fn execute(ctx: &AppContext) -> Result<Vec<ApiKeyRow>, ListApiKeysError> {
        let rows = ctx
            .repos
            .api_key
            .list()
            .await
            .map_err(|e| ListApiKeysError::Storage(format!("{e:?}")))?;

        Ok(rows
            .into_iter()
            .map(|row| ApiKeyRow {
                key: mask_api_key(&row.key),
                ..row
            })
            .collect())
    }
}
