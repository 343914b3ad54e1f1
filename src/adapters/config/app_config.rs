use std::{fs, path::Path};

use config::{Config, Environment, File, FileFormat};
use error_stack::ResultExt;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::paths::{restrict_permissions, ConfigPaths, FILE_MODE};
use crate::domain::errors::ConfigError;

const ENV_PREFIX: &str = "STAG";

/// Contents of `config.json`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<String>,
}

impl AppConfig {
    pub fn with_sheet_id(sheet_id: impl Into<String>) -> Self {
        AppConfig {
            sheet_id: Some(sheet_id.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    paths: ConfigPaths,
}

impl ConfigStore {
    pub fn new(paths: ConfigPaths) -> Self {
        ConfigStore { paths }
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Loads `config.json`, letting `STAG_*` environment variables override it.
    ///
    /// Never fails: a missing or unreadable file yields an empty config.
    #[instrument]
    pub fn read(&self) -> AppConfig {
        self.read_layered(Environment::with_prefix(ENV_PREFIX))
    }

    fn read_layered(&self, environment: Environment) -> AppConfig {
        let config_path = self.paths.config_file();
        let config_result = Config::builder()
            .add_source(
                File::from(config_path.as_path())
                    .format(FileFormat::Json)
                    .required(false),
            )
            .add_source(environment)
            .build()
            .and_then(|config| config.try_deserialize::<AppConfig>());

        match config_result {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable config file '{}': {}",
                    config_path.display(),
                    e
                );
                AppConfig::default()
            }
        }
    }

    #[instrument]
    pub fn write(&self, config: &AppConfig) -> error_stack::Result<(), ConfigError> {
        self.paths.ensure_directory()?;

        let config_path = self.paths.config_file();
        let content =
            serde_json::to_string_pretty(config).change_context(ConfigError::Serialization)?;

        fs::write(&config_path, content)
            .change_context(ConfigError::Io)
            .attach_printable_lazy(|| format!("Failed to write {}", config_path.display()))?;

        restrict_permissions(&config_path, FILE_MODE)
    }

    /// Copies the client secret verbatim into the configuration directory.
    #[instrument]
    pub fn save_secret(&self, secret: &Path) -> error_stack::Result<(), ConfigError> {
        self.paths.ensure_directory()?;

        let secret_path = self.paths.secret_file();
        fs::copy(secret, &secret_path)
            .change_context(ConfigError::Io)
            .attach_printable_lazy(|| {
                format!(
                    "Failed to copy secret {} to {}",
                    secret.display(),
                    secret_path.display()
                )
            })?;

        restrict_permissions(&secret_path, FILE_MODE)
    }
}
