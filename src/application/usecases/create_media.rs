// Use case: create_media.

use crate::application::context::AppContext;
use crate::infrastructure::db::dto::MediaRow;
use time::OffsetDateTime;

/// Records metadata for a file already uploaded to object storage.
pub struct CreateMediaUseCase;

#[derive(Debug, PartialEq, Eq)]
pub enum CreateMediaError {
    Validation(String),
    Storage(String),
}

#[derive(Debug, Clone, Default)]
pub struct CreateMediaCommand {
    pub filename: String,
    pub original_name: Option<String>,
    pub url: String,
    pub media_type: String,
    pub size_bytes: i64,
    pub alt_text: Option<String>,
    pub uploaded_by: Option<uuid::Uuid>,
}

fn required(value: &str, field: &str) -> Result<String, CreateMediaError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CreateMediaError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

impl CreateMediaUseCase {
    pub async fn execute(
        ctx: &AppContext,
        cmd: CreateMediaCommand,
    ) -> Result<MediaRow, CreateMediaError> {
        // Step 1: Validate the record.
        let filename = required(&cmd.filename, "filename")?;
        let url = required(&cmd.url, "url")?;
        let media_type = required(&cmd.media_type, "type")?;
        if cmd.size_bytes < 0 {
            return Err(CreateMediaError::Validation(
                "size must not be negative".to_string(),
            ));
        }

        // Step 2: Persist.
        let row = MediaRow {
            id: uuid::Uuid::new_v4(),
            filename,
            original_name: cmd.original_name,
            url,
            media_type,
            size_bytes: cmd.size_bytes,
            alt_text: cmd.alt_text,
            uploaded_by: cmd.uploaded_by,
            created_at: OffsetDateTime::now_utc(),
        };
        ctx.repos
            .media
            .insert(&row)
            .await
            .map_err(|e| CreateMediaError::Storage(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{CreateMediaCommand, CreateMediaError, CreateMediaUseCase};
    use crate::application::context::test_support::test_context;
    use crate::application::usecases::list_media::{ListMediaQuery, ListMediaUseCase};

    fn command(filename: &str, media_type: &str) -> CreateMediaCommand {
        CreateMediaCommand {
            filename: filename.to_string(),
            url: format!("https://cdn.example.com/{filename}"),
            media_type: media_type.to_string(),
            size_bytes: 1024,
            ..CreateMediaCommand::default()
        }
    }

    #[tokio::test]
    async fn given_media_of_two_types_when_listed_by_type_should_filter() {
        let ctx = test_context();
        let uploader = uuid::Uuid::new_v4();
        let mut image = command("cover.png", "image/png");
        image.uploaded_by = Some(uploader);
        CreateMediaUseCase::execute(&ctx, image).await.unwrap();
        CreateMediaUseCase::execute(&ctx, command("clip.mp4", "video/mp4"))
            .await
            .unwrap();

        let rows = ListMediaUseCase::execute(
            &ctx,
            ListMediaQuery {
                media_type: Some("image/png".to_string()),
                ..ListMediaQuery::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].filename, "cover.png");
        assert_eq!(rows[0].uploaded_by, Some(uploader));
    }

    #[tokio::test]
    async fn given_missing_url_when_execute_should_reject() {
        let ctx = test_context();
        let mut cmd = command("a.png", "image/png");
        cmd.url = String::new();

        let err = CreateMediaUseCase::execute(&ctx, cmd).await.unwrap_err();

        assert_eq!(err, CreateMediaError::Validation("url is required".to_string()));
    }
}
