// Use case: create_api_key.

use crate::application::context::AppContext;
use crate::application::shared::api_key_helpers::generate_api_key;
use crate::domain::entities::api_key::Permission;
use crate::infrastructure::db::dto::ApiKeyRow;
use time::OffsetDateTime;

/// Issues a new API key. The full value is only ever returned here.
pub struct CreateApiKeyUseCase;

#[derive(Debug, PartialEq, Eq)]
pub enum CreateApiKeyError {
    Validation(String),
    Storage(String),
}

#[derive(Debug, Clone)]
pub struct CreateApiKeyCommand {
    pub name: String,
    pub permissions: Option<Vec<String>>,
    pub expires_at: Option<OffsetDateTime>,
}

impl CreateApiKeyUseCase {
    pub async fn execute(
        ctx: &AppContext,
        cmd: CreateApiKeyCommand,
    ) -> Result<ApiKeyRow, CreateApiKeyError> {
        // Step 1: Validate the name and permission strings.
        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(CreateApiKeyError::Validation("name is required".to_string()));
        }
        let mut permissions: Vec<String> = Vec::new();
        for raw in cmd.permissions.unwrap_or_default() {
            let Some(permission) = Permission::parse(raw.trim()) else {
                return Err(CreateApiKeyError::Validation(format!(
                    "unknown permission: {raw}"
                )));
            };
            let value = permission.as_str().to_string();
            if !permissions.contains(&value) {
                permissions.push(value);
            }
        }
        if permissions.is_empty() {
            permissions.push(Permission::Read.as_str().to_string());
        }

        // Step 2: Persist a freshly generated key.
        let row = ApiKeyRow {
            id: uuid::Uuid::new_v4(),
            name: name.to_string(),
            key: generate_api_key(),
            permissions,
            is_active: true,
            last_used_at: None,
            created_at: OffsetDateTime::now_utc(),
            expires_at: cmd.expires_at,
        };
        ctx.repos
            .api_key
            .insert(&row)
            .await
            .map_err(|e| CreateApiKeyError::Storage(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{CreateApiKeyCommand, CreateApiKeyError, CreateApiKeyUseCase};
    use crate::application::context::test_support::test_context;

    #[tokio::test]
    async fn given_no_permissions_when_execute_should_default_to_read() {
        let ctx = test_context();

        let row = CreateApiKeyUseCase::execute(
            &ctx,
            CreateApiKeyCommand {
                name: "automation".to_string(),
                permissions: None,
                expires_at: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(row.permissions, vec!["read".to_string()]);
        assert!(row.key.starts_with("eb_"));
        assert!(row.is_active);
    }

    #[tokio::test]
    async fn given_duplicate_permissions_when_execute_should_store_each_once() {
        let ctx = test_context();

        let row = CreateApiKeyUseCase::execute(
            &ctx,
            CreateApiKeyCommand {
                name: "writer".to_string(),
                permissions: Some(vec![
                    "write".to_string(),
                    "read".to_string(),
                    "write".to_string(),
                ]),
                expires_at: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(row.permissions, vec!["write".to_string(), "read".to_string()]);
    }

    #[tokio::test]
    async fn given_unknown_permission_when_execute_should_reject() {
        let ctx = test_context();

        let err = CreateApiKeyUseCase::execute(
            &ctx,
            CreateApiKeyCommand {
                name: "bad".to_string(),
                permissions: Some(vec!["admin".to_string()]),
                expires_at: None,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CreateApiKeyError::Validation(_)));
    }

    #[tokio::test]
    async fn given_blank_name_when_execute_should_reject() {
        let ctx = test_context();

        let err = CreateApiKeyUseCase::execute(
            &ctx,
            CreateApiKeyCommand {
                name: "  ".to_string(),
                permissions: None,
                expires_at: None,
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err, CreateApiKeyError::Validation("name is required".to_string()));
    }
}
