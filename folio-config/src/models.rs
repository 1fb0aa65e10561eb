use std::path::PathBuf;
use std::time::Duration;

use folio_model::Lang;
use url::Url;

pub(crate) const PLACEHOLDER_KEY: &str = "change-me";

/// Effective server configuration after merging file and environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub backend: BackendConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub upload: UploadConfig,
    pub i18n: I18nConfig,
    pub dev_mode: bool,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection string. Required by `serve` and `db migrate`.
    pub url: Option<String>,
    pub max_connections: u32,
}

/// Hosted backend serving auth and object storage.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: Url,
    pub anon_key: String,
    pub service_key: String,
}

impl BackendConfig {
    pub fn has_placeholder_keys(&self) -> bool {
        is_placeholder(&self.anon_key) || is_placeholder(&self.service_key)
    }
}

pub(crate) fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == PLACEHOLDER_KEY
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Cookie carrying the backend access token.
    pub session_cookie: String,
    /// Adds `Secure` to cookies the server sets.
    pub secure_cookies: bool,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
}

impl CorsConfig {
    pub fn is_wildcard_included(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Largest multipart body accepted by the upload routes.
    pub max_bytes: usize,
    pub http_timeout_secs: u64,
}

impl UploadConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct I18nConfig {
    pub default_lang: Lang,
    pub cookie_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
