pub mod ai_generation;
pub mod api_key;
pub mod post;
pub mod transcription;
pub mod webhook;
