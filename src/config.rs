use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: Server,
    pub db: Db,
    pub auth: Auth,
    pub webhooks: Webhooks,
    pub ai: Ai,
    pub transcription: Transcription,
    pub scheduler: Scheduler,
    pub observability: Observability,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Db {
    /// Postgres connection string, or `memory://` for the in-process backend.
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Auth {
    /// Admin session tokens accepted from the `eb_session` cookie or a bearer header.
    #[serde(default)]
    pub session_tokens: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Webhooks {
    /// Per-request timeout for outbound deliveries. `None` waits indefinitely.
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Ai {
    pub base_url: String,
    pub api_key: Option<String>,
    pub default_model: String,
    pub site_url: String,
    pub app_title: String,
    /// Language the generated text is written in.
    pub language: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Transcription {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Scheduler {
    pub enabled: bool,
    pub poll_interval_ms: u64,
    pub batch_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Observability {
    pub service_name: String,
    /// `json` or `pretty`.
    pub log_format: String,
    pub enable_metrics: bool,
}

impl Settings {
    /// Settings suitable for tests and local runs: memory backend, no providers.
    pub fn local() -> Self {
        Self {
            server: Server {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            db: Db {
                url: "memory://".to_string(),
                max_connections: 5,
            },
            auth: Auth {
                session_tokens: Vec::new(),
            },
            webhooks: Webhooks {
                request_timeout_ms: Some(10_000),
            },
            ai: Ai {
                base_url: "https://openrouter.ai/api/v1".to_string(),
                api_key: None,
                default_model: "google/gemini-2.0-flash-exp:free".to_string(),
                site_url: "http://localhost:3000".to_string(),
                app_title: "Empire Blog".to_string(),
                language: "Brazilian Portuguese".to_string(),
            },
            transcription: Transcription {
                base_url: "https://api.scrapecreators.com".to_string(),
                api_key: None,
                timeout_ms: 60_000,
            },
            scheduler: Scheduler {
                enabled: false,
                poll_interval_ms: 30_000,
                batch_size: 50,
            },
            observability: Observability {
                service_name: "empire-blog".to_string(),
                log_format: "pretty".to_string(),
                enable_metrics: false,
            },
        }
    }

    pub fn uses_memory_store(&self) -> bool {
        self.db.url.starts_with("memory://")
    }
}

/// Load settings from `config/default.toml`, `config/<env>.toml`, and env overrides.
pub fn load() -> Result<Settings, config::ConfigError> {
    let env_name = std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());
    config::Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{env_name}")).required(false))
        .add_source(
            config::Environment::with_prefix("EMPIRE")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("auth.session_tokens")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
