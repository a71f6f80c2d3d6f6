//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod folders;
pub mod logging;
pub mod store;

use serde::{Deserialize, Serialize};

use self::folders::FolderConfig;
use self::logging::LoggingConfig;
use self::store::StoreConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Key-value store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Folder tree policies.
    #[serde(default)]
    pub folders: FolderConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional. Environment variables prefixed with
    /// `TESTHUB__` override file values, e.g. `TESTHUB__STORE__PROVIDER=redis`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("TESTHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::folders::{OrphanPolicy, PersistFailurePolicy};
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = AppConfig::load(path.to_str().unwrap()).unwrap();

        assert_eq!(config.store.provider, "local");
        assert_eq!(config.folders.orphan_policy, OrphanPolicy::Promote);
        assert_eq!(config.folders.persist_failure, PersistFailurePolicy::Keep);
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("testhub.toml");
        std::fs::write(
            &path,
            r#"
[store]
provider = "memory"

[store.local]
root = "/tmp/testhub"

[folders]
orphan_policy = "reject"
persist_failure = "revert"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        let config = AppConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.store.provider, "memory");
        assert_eq!(config.store.local.root, "/tmp/testhub");
        assert_eq!(config.store.redis.key_prefix, "testhub:");
        assert_eq!(config.folders.orphan_policy, OrphanPolicy::Reject);
        assert_eq!(config.folders.persist_failure, PersistFailurePolicy::Revert);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }
}
