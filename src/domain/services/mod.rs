pub mod prompt_builder;
pub mod webhook_signature;
