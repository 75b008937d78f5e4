use crate::domain::value_objects::timestamps::format_rfc3339;
use crate::infrastructure::db::dto::{WebhookDeliveryRow, WebhookRow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterWebhookRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    pub secret: Option<String>,
    #[serde(default)]
    pub events: Vec<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub id: String,
    pub name: String,
    pub url: String,
    pub secret: Option<String>,
    pub events: Vec<String>,
    pub is_active: bool,
    pub created_at: String,
}

impl From<WebhookRow> for WebhookResponse {
    fn from(row: WebhookRow) -> Self {
        Self {
            id: row.id.to_string(),
            name: row.name,
            url: row.url,
            secret: row.secret,
            events: row.events,
            is_active: row.is_active,
            created_at: format_rfc3339(row.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UnregisterWebhookResponse {
    pub deleted: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListDeliveriesParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    pub id: String,
    pub webhook_id: String,
    pub event: String,
    pub success: bool,
    pub status_code: Option<i32>,
    pub error: Option<String>,
    pub created_at: String,
}

impl From<WebhookDeliveryRow> for DeliveryResponse {
    fn from(row: WebhookDeliveryRow) -> Self {
        Self {
            id: row.id.to_string(),
            webhook_id: row.webhook_id.to_string(),
            event: row.event_name,
            success: row.success,
            status_code: row.response_status,
            error: row.error,
            created_at: format_rfc3339(row.created_at),
        }
    }
}
