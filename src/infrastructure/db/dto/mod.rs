pub mod ai_generation;
pub mod api_key;
pub mod media;
pub mod post;
pub mod taxonomy;
pub mod webhook;
pub mod webhook_delivery;

pub use ai_generation::AiGenerationRow;
pub use api_key::ApiKeyRow;
pub use media::MediaRow;
pub use post::{PostFilter, PostRow};
pub use taxonomy::{CategoryRow, TagRow};
pub use webhook::WebhookRow;
pub use webhook_delivery::WebhookDeliveryRow;
