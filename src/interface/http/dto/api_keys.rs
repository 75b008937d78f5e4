use crate::domain::value_objects::timestamps::format_rfc3339;
use crate::infrastructure::db::dto::ApiKeyRow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateApiKeyRequest {
    #[serde(default)]
    pub name: String,
    pub permissions: Option<Vec<String>>,
    pub expires_at: Option<String>,
}

/// Key record as returned to callers. `key` is the full token only on creation.
#[derive(Debug, Serialize)]
pub struct ApiKeyResponse {
    pub id: String,
    pub name: String,
    pub key: String,
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub last_used_at: Option<String>,
    pub expires_at: Option<String>,
    pub created_at: String,
}

impl From<ApiKeyRow> for ApiKeyResponse {
    fn from(row: ApiKeyRow) -> Self {
        Self {
            id: row.id.to_string(),
            name: row.name,
            key: row.key,
            permissions: row.permissions,
            is_active: row.is_active,
            last_used_at: row.last_used_at.map(format_rfc3339),
            expires_at: row.expires_at.map(format_rfc3339),
            created_at: format_rfc3339(row.created_at),
        }
    }
}
