// Use case: create_tag.

use crate::application::context::AppContext;
use crate::domain::value_objects::slug::slugify;
use crate::infrastructure::db::dto::TagRow;
use crate::infrastructure::db::stores::StoreError;
use time::OffsetDateTime;

pub struct CreateTagUseCase;

#[derive(Debug, PartialEq, Eq)]
pub enum CreateTagError {
    Validation(String),
    Conflict,
    Storage(String),
}

impl CreateTagUseCase {
    pub async fn execute(ctx: &AppContext, name: &str) -> Result<TagRow, CreateTagError> {
        // Step 1: Validate the name and derive the slug.
        let name = name.trim();
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(CreateTagError::Validation(
                "name must contain at least one letter or digit".to_string(),
            ));
        }

        // Step 2: Persist; a taken slug is a conflict.
        let row = TagRow {
            id: uuid::Uuid::new_v4(),
            name: name.to_string(),
            slug,
            created_at: OffsetDateTime::now_utc(),
        };
        ctx.repos.tag.insert(&row).await.map_err(|e| match e {
            StoreError::Conflict => CreateTagError::Conflict,
            _ => CreateTagError::Storage(format!("{e:?}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CreateTagError, CreateTagUseCase};
    use crate::application::context::test_support::test_context;
    use crate::application::usecases::list_tags::ListTagsUseCase;

    #[tokio::test]
    async fn given_new_tags_when_created_should_be_listed_by_name() {
        let ctx = test_context();
        CreateTagUseCase::execute(&ctx, "Tokio").await.unwrap();
        CreateTagUseCase::execute(&ctx, "Axum").await.unwrap();

        let tags = ListTagsUseCase::execute(&ctx).await.unwrap();

        let slugs: Vec<_> = tags.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["axum", "tokio"]);
    }

    #[tokio::test]
    async fn given_existing_tag_when_created_again_should_conflict() {
        let ctx = test_context();
        CreateTagUseCase::execute(&ctx, "Rust").await.unwrap();

        let err = CreateTagUseCase::execute(&ctx, " rust ").await.unwrap_err();

        assert_eq!(err, CreateTagError::Conflict);
    }

    #[tokio::test]
    async fn given_blank_name_when_created_should_reject() {
        let ctx = test_context();

        let err = CreateTagUseCase::execute(&ctx, "   ").await.unwrap_err();

        assert!(matches!(err, CreateTagError::Validation(_)));
    }
}
