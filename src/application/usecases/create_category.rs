// Use case: create_category.

use crate::application::context::AppContext;
use crate::domain::value_objects::slug::slugify;
use crate::infrastructure::db::dto::CategoryRow;
use crate::infrastructure::db::stores::StoreError;
use time::OffsetDateTime;

pub struct CreateCategoryUseCase;

#[derive(Debug, PartialEq, Eq)]
pub enum CreateCategoryError {
    Validation(String),
    Conflict,
    Storage(String),
}

#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub name: String,
    pub description: Option<String>,
}

impl CreateCategoryUseCase {
    pub async fn execute(
        ctx: &AppContext,
        cmd: CreateCategoryCommand,
    ) -> Result<CategoryRow, CreateCategoryError> {
        // Step 1: Validate the name and derive the slug.
        let name = cmd.name.trim().to_string();
        let slug = slugify(&name);
        if slug.is_empty() {
            return Err(CreateCategoryError::Validation(
                "name must contain at least one letter or digit".to_string(),
            ));
        }

        // Step 2: Persist; a taken slug is a conflict.
        let row = CategoryRow {
            id: uuid::Uuid::new_v4(),
            name,
            slug,
            description: cmd.description.filter(|d| !d.trim().is_empty()),
            created_at: OffsetDateTime::now_utc(),
        };
        ctx.repos.category.insert(&row).await.map_err(|e| match e {
            StoreError::Conflict => CreateCategoryError::Conflict,
            _ => CreateCategoryError::Storage(format!("{e:?}")),
        })
    }
}
