//! Configuration loading for the Folio server: `.env`, an optional TOML
//! file and environment overrides, merged into one [`Config`].
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod sources;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use models::{
    AuthConfig, BackendConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig, I18nConfig,
    ServerConfig, UploadConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
