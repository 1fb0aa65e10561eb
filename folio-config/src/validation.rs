use thiserror::Error;

use crate::models::{Config, CorsConfig, is_placeholder};

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("{field} must be set when DEV_MODE is false")]
    MissingSecret { field: &'static str },
    #[error("CORS wildcard origins are not allowed when DEV_MODE is false")]
    DangerousCorsWildcard,
    #[error("invalid CORS configuration: {reason}")]
    InvalidCorsConfig { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(&mut self, message: S, hint: H) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }
}

pub fn apply_guard_rails(config: &Config) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if !config.dev_mode {
        if is_placeholder(&config.backend.service_key) {
            return Err(ConfigGuardRailError::MissingSecret {
                field: "SUPABASE_SERVICE_ROLE_KEY",
            });
        }
        if config.cors.is_wildcard_included() {
            return Err(ConfigGuardRailError::DangerousCorsWildcard);
        }
    }

    validate_cors(&config.cors)?;

    if config.backend.has_placeholder_keys() {
        warnings.push_with_hint(
            "Backend keys are unset or placeholders; sign-in and uploads will fail",
            "Set SUPABASE_ANON_KEY and SUPABASE_SERVICE_ROLE_KEY",
        );
    }

    if config.database.url.is_none() {
        warnings.push_with_hint(
            "DATABASE_URL not configured; the server cannot start without it",
            "Set DATABASE_URL or add a [database] url to the config file",
        );
    }

    if !config.auth.secure_cookies && !config.dev_mode {
        warnings.push("Session cookies are issued without the Secure attribute");
    }

    if config.cors.allow_credentials && config.cors.is_wildcard_included() {
        warnings.push(
            "CORS credentials allowed alongside wildcard origin; browsers will reject such configuration",
        );
    }

    Ok(warnings)
}

fn validate_cors(cors: &CorsConfig) -> Result<(), ConfigGuardRailError> {
    if cors.allowed_methods.is_empty() {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason: "CORS_ALLOWED_METHODS must include at least one HTTP method".into(),
        });
    }

    if let Some(method) = cors
        .allowed_methods
        .iter()
        .find(|method| !method.bytes().all(|b| b.is_ascii_alphabetic()))
    {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason: format!("invalid HTTP method `{method}` in CORS_ALLOWED_METHODS"),
        });
    }

    if cors.allowed_headers.is_empty() {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason: "CORS_ALLOWED_HEADERS must include at least one header name".into(),
        });
    }

    Ok(())
}
