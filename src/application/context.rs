use std::sync::Arc;

use crate::config::Settings;
use crate::infrastructure::db::repositories::Repositories;

/// Shared application resources used by use cases.
pub struct AppContext {
    pub repos: Repositories,
    pub settings: Arc<Settings>,
    /// Outbound client shared by webhook delivery and the AI/transcription providers.
    pub http: reqwest::Client,
}

impl AppContext {
    /// Build a new application context with shared repositories and settings.
    pub fn new(repos: Repositories, settings: Arc<Settings>, http: reqwest::Client) -> Self {
        Self {
            repos,
            settings,
            http,
        }
    }
}
