// Use case: list_media.

use crate::application::context::AppContext;
use crate::infrastructure::db::dto::MediaRow;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

pub struct ListMediaUseCase;

#[derive(Debug)]
pub enum ListMediaError {
    Storage(String),
}

#[derive(Debug, Clone, Default)]
pub struct ListMediaQuery {
    pub media_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListMediaUseCase {
    pub async fn execute(
        ctx: &AppContext,
        query: ListMediaQuery,
    ) -> Result<Vec<MediaRow>, ListMediaError> {
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = query.offset.unwrap_or(0).max(0);
        let media_type = query.media_type.filter(|t| !t.trim().is_empty());
        ctx.repos
            .media
            .list(media_type.as_deref(), limit, offset)
            .await
            .map_err(|e| ListMediaError::Storage(format!("{e:?}")))
    }
}
