use crate::domain::entities::webhook::Subscription;
use crate::domain::value_objects::ids::WebhookId;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct WebhookRow {
    pub id: uuid::Uuid,
    pub name: String,
    pub url: String,
    pub secret: Option<String>,
    pub events: Vec<String>,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
}

impl WebhookRow {
    pub fn into_subscription(self) -> Subscription {
        Subscription {
            id: WebhookId(self.id),
            url: self.url,
            secret: self.secret,
            events: self.events,
            active: self.is_active,
        }
    }
}
