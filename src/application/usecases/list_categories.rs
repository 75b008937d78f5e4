// Use case: list_categories.

use crate::application::context::AppContext;
use crate::infrastructure::db::dto::CategoryRow;

pub struct ListCategoriesUseCase;

#[derive(Debug)]
pub enum ListCategoriesError {
    Storage(String),
}

impl ListCategoriesUseCase {
    pub async fn execute(ctx: &AppContext) -> Result<Vec<CategoryRow>, ListCategoriesError> {
        ctx.repos
            .category
            .list()
            .await
            .map_err(|e| ListCategoriesError::Storage(format!("{e:?}")))
    }
}
