// Use case: list_tags.

use crate::application::context::AppContext;
use crate::infrastructure::db::dto::TagRow;

pub struct ListTagsUseCase;

#[derive(Debug)]
pub enum ListTagsError {
    Storage(String),
}

impl ListTagsUseCase {
    pub async fn execute(ctx: &AppContext) -> Result<Vec<TagRow>, ListTagsError> {
        ctx.repos
            .tag
            .list()
            .await
            .map_err(|e| ListTagsError::Storage(format!("{e:?}")))
    }
}
