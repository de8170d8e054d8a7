use config::{Config, ConfigError, Environment, File};
use once_cell::sync::Lazy;
use serde::Deserialize;

pub static CONFIG: Lazy<AppConfig> =
    Lazy::new(|| AppConfig::load().unwrap_or_else(|e| panic!("Failed to load config: {}", e)));

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub database_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Memory,
    Postgres,
}

impl AppConfig {
    /// Reads `config.toml` (optional) and `QUIZ__*` environment variables,
    /// e.g. `QUIZ__SERVER__PORT=8080` or `QUIZ__STORE__DATABASE_URL=...`.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.address", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.log_level", "debug")?
            .set_default("store.kind", "memory")?
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("QUIZ")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<AppConfig>()
    }
}
