use std::fs;
use std::path::PathBuf;

use folio_model::Lang;
use thiserror::Error;
use url::Url;

use crate::models::{
    AuthConfig, BackendConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig, I18nConfig,
    ServerConfig, UploadConfig,
};
use crate::sources::{EnvConfig, FileConfig};
use crate::validation::{self, ConfigGuardRailError, ConfigWarnings};

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] = ["folio.toml", "config/folio.toml"];

const DEFAULT_BACKEND_URL: &str = "http://localhost:54321";
pub const DEFAULT_SESSION_COOKIE: &str = "sb-access-token";
pub const DEFAULT_LANG_COOKIE: &str = "lang";
const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Loads `.env`, then the process environment, then the config file.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path)
                .map(|_| true)
                .or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?,
            None => dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                dotenvy::Error::Io(_) => Ok(false),
                _ => Err(err),
            })?,
        };

        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Same as [`ConfigLoader::load`] with an already gathered environment
    /// and no `.env` handling.
    pub fn load_with_env(&self, env: EnvConfig) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, warnings) = compose_config(file_config, env, config_path)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let requested = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match requested {
            Some(path) if !path.exists() => return Err(ConfigLoadError::MissingConfig { path }),
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, None)),
            },
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
            path: path.clone(),
            source,
        })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
                path: path.clone(),
                source,
            })?;

        Ok((Some(file_config), Some(path)))
    }
}

fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    config_path: Option<PathBuf>,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if file_config.is_none() {
        warnings.push_with_hint(
            "No folio.toml detected; falling back to environment variables",
            "Create folio.toml or point FOLIO_CONFIG_PATH at one",
        );
    }

    let FileConfig {
        server: file_server,
        database: file_database,
        backend: file_backend,
        auth: file_auth,
        cors: file_cors,
        upload: file_upload,
        i18n: file_i18n,
        dev_mode: file_dev_mode,
    } = file_config.unwrap_or_default();

    let dev_mode = env.dev_mode.or(file_dev_mode).unwrap_or(false);

    let server = ServerConfig {
        host: env
            .server_host
            .or(file_server.host)
            .unwrap_or_else(|| "0.0.0.0".to_string()),
        port: env.server_port.or(file_server.port).unwrap_or(3000),
    };

    let database = DatabaseConfig {
        url: env
            .database_url
            .or(file_database.url)
            .filter(|url| !url.trim().is_empty()),
        max_connections: env
            .database_max_connections
            .or(file_database.max_connections)
            .unwrap_or(5),
    };

    let raw_backend_url = env
        .backend_url
        .or(file_backend.url)
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
    let backend = BackendConfig {
        url: Url::parse(raw_backend_url.trim())
            .map_err(|source| ConfigLoadError::InvalidBackendUrl { source })?,
        anon_key: env
            .backend_anon_key
            .or(file_backend.anon_key)
            .unwrap_or_default(),
        service_key: env
            .backend_service_key
            .or(file_backend.service_key)
            .unwrap_or_default(),
    };

    let auth = AuthConfig {
        session_cookie: env
            .session_cookie
            .or(file_auth.session_cookie)
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string()),
        secure_cookies: env
            .secure_cookies
            .or(file_auth.secure_cookies)
            .unwrap_or(!dev_mode),
    };

    let cors = CorsConfig {
        allowed_origins: env
            .cors_allowed_origins
            .or(file_cors.allowed_origins)
            .unwrap_or_else(default_cors_origins),
        allowed_methods: env
            .cors_allowed_methods
            .or(file_cors.allowed_methods)
            .unwrap_or_else(default_cors_methods),
        allowed_headers: env
            .cors_allowed_headers
            .or(file_cors.allowed_headers)
            .unwrap_or_else(default_cors_headers),
        allow_credentials: env
            .cors_allow_credentials
            .or(file_cors.allow_credentials)
            .unwrap_or(true),
    };

    let upload = UploadConfig {
        max_bytes: env
            .upload_max_bytes
            .or(file_upload.max_bytes)
            .unwrap_or(DEFAULT_UPLOAD_MAX_BYTES),
        http_timeout_secs: env
            .http_timeout_secs
            .or(file_upload.http_timeout_secs)
            .unwrap_or(30),
    };

    let default_lang = match env.default_lang.or(file_i18n.default_lang) {
        Some(raw) => raw
            .parse::<Lang>()
            .map_err(|_| ConfigLoadError::InvalidLang { value: raw })?,
        None => Lang::default(),
    };
    let i18n = I18nConfig {
        default_lang,
        cookie_name: file_i18n
            .cookie_name
            .unwrap_or_else(|| DEFAULT_LANG_COOKIE.to_string()),
    };

    let config = Config {
        server,
        database,
        backend,
        auth,
        cors,
        upload,
        i18n,
        dev_mode,
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded: false,
        },
    };

    warnings.extend(validation::apply_guard_rails(&config)?);

    Ok((config, warnings))
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid backend URL")]
    InvalidBackendUrl {
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported default language '{value}'")]
    InvalidLang { value: String },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

fn default_cors_methods() -> Vec<String> {
    ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_cors_headers() -> Vec<String> {
    vec!["Authorization".to_string(), "Content-Type".to_string()]
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn dev_env() -> EnvConfig {
        EnvConfig {
            dev_mode: Some(true),
            ..EnvConfig::default()
        }
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn environment_overrides_file_values() {
        let file = write_config(
            r#"
dev_mode = true

[server]
host = "127.0.0.1"
port = 8080

[backend]
url = "https://project.supabase.co"
anon_key = "anon-from-file"
service_key = "service-from-file"

[i18n]
default_lang = "en"
"#,
        );
        let env = EnvConfig {
            server_port: Some(9090),
            backend_anon_key: Some("anon-from-env".into()),
            ..EnvConfig::default()
        };

        let load = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(env)
            .expect("config loads");
        let config = load.config;

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.backend.anon_key, "anon-from-env");
        assert_eq!(config.backend.service_key, "service-from-file");
        assert_eq!(config.backend.url.as_str(), "https://project.supabase.co/");
        assert_eq!(config.i18n.default_lang, Lang::En);
        assert!(config.dev_mode);
        assert_eq!(config.metadata.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nope.toml");

        let err = ConfigLoader::new()
            .with_config_path(&path)
            .load_with_env(dev_env())
            .unwrap_err();

        assert!(matches!(err, ConfigLoadError::MissingConfig { path: p } if p == path));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let file = write_config("[server\nport = 1");
        let err = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(dev_env())
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }

    #[test]
    fn dev_mode_without_keys_loads_with_warnings() {
        let file = write_config("dev_mode = true\n");
        let load = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(EnvConfig::default())
            .expect("config loads");

        assert_eq!(load.config.auth.session_cookie, DEFAULT_SESSION_COOKIE);
        assert_eq!(load.config.i18n.default_lang, Lang::Es);
        assert!(!load.config.auth.secure_cookies);
        assert!(
            load.warnings
                .iter()
                .any(|w| w.message.starts_with("Backend keys"))
        );
    }

    #[test]
    fn production_requires_service_key() {
        let file = write_config("[backend]\nanon_key = \"anon\"\n");
        let err = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(EnvConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::GuardRail(ConfigGuardRailError::MissingSecret { .. })
        ));
    }

    #[test]
    fn production_rejects_wildcard_cors() {
        let file = write_config(
            "[backend]\nanon_key = \"anon\"\nservice_key = \"service\"\n[cors]\nallowed_origins = [\"*\"]\n",
        );
        let err = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(EnvConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::GuardRail(ConfigGuardRailError::DangerousCorsWildcard)
        ));
    }

    #[test]
    fn unknown_default_language_is_rejected() {
        let env = EnvConfig {
            default_lang: Some("fr".into()),
            ..dev_env()
        };
        let file = write_config("");
        let err = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(env)
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::InvalidLang { value } if value == "fr"));
    }
}
