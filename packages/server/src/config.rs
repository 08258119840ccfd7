use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Deployment variable holding the data service base URL.
pub const DATA_SERVICE_URL_VAR: &str = "NEXT_PUBLIC_SUPABASE_URL";
/// Deployment variable holding the privileged service-role key.
pub const SERVICE_ROLE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `production` hides diagnostic details from error responses.
    pub environment: String,
    pub cors: CorsConfig,
}

impl ServerConfig {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

/// Connection settings for the hosted database's REST layer.
///
/// Both values are optional: the role endpoint serves fallback data without
/// them, the staff endpoints report a configuration error.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DataServiceConfig {
    pub url: Option<String>,
    pub service_role_key: Option<String>,
}

impl DataServiceConfig {
    /// Returns `(url, service_role_key)` when both are set and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().filter(|s| !s.trim().is_empty())?;
        let key = self
            .service_role_key
            .as_deref()
            .filter(|s| !s.trim().is_empty())?;
        Some((url, key))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub data_service: DataServiceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.environment", "development")?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., VEDIC__SERVER__PORT)
            .add_source(Environment::with_prefix("VEDIC").separator("__"))
            .set_override_option("data_service.url", std::env::var(DATA_SERVICE_URL_VAR).ok())?
            .set_override_option(
                "data_service.service_role_key",
                std::env::var(SERVICE_ROLE_KEY_VAR).ok(),
            )?
            .build()?;

        s.try_deserialize()
    }
}
