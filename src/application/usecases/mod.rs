pub mod authenticate_api_key;
pub mod create_api_key;
pub mod create_category;
pub mod create_media;
pub mod create_post;
pub mod create_tag;
pub mod delete_post;
pub mod dispatch_webhook;
pub mod duplicate_post;
pub mod generate_content;
pub mod get_post;
pub mod list_api_keys;
pub mod list_categories;
pub mod list_media;
pub mod list_posts;
pub mod list_tags;
pub mod list_webhook_deliveries;
pub mod list_webhooks;
pub mod publish_scheduled_posts;
pub mod register_webhook;
pub mod transcribe_video;
pub mod unregister_webhook;
pub mod update_post;
