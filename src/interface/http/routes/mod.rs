pub mod ai;
pub mod api_key;
pub mod category;
pub mod health;
pub mod media;
pub mod metrics;
pub mod post;
pub mod ready;
pub mod tag;
pub mod transcribe;
pub mod webhook;
