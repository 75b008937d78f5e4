pub mod ai_generation_store_postgres;
pub mod api_key_store_postgres;
mod database;
pub mod media_store_postgres;
pub mod post_store_postgres;
pub mod taxonomy_store_postgres;
pub mod webhook_delivery_store_postgres;
pub mod webhook_store_postgres;

pub use database::PostgresDatabase;
