use std::{
    fs,
    path::{Path, PathBuf},
};

use error_stack::ResultExt;
use tracing::instrument;

use crate::domain::errors::ConfigError;

pub const DIRECTORY_NAME: &str = ".stag";
pub const DIRECTORY_MODE: u32 = 0o700;
pub const FILE_MODE: u32 = 0o600;

/// Location of every file the program owns.
///
/// Defaults to `~/.stag`; tests and `--config-dir` point it elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    root: PathBuf,
}

impl ConfigPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ConfigPaths { root: root.into() }
    }

    pub fn resolve(root: Option<PathBuf>) -> Self {
        match root {
            Some(root) => ConfigPaths::new(root),
            None => {
                let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
                ConfigPaths::new(home.join(DIRECTORY_NAME))
            }
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    pub fn secret_file(&self) -> PathBuf {
        self.root.join("secret.json")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.root.join("credentials.json")
    }

    /// Where a running authorization flow keeps its token until it succeeds.
    pub fn pending_credentials_file(&self) -> PathBuf {
        self.root.join("credentials.json.pending")
    }

    /// Creates the directory with owner-only access if it does not exist yet.
    #[instrument]
    pub fn ensure_directory(&self) -> error_stack::Result<(), ConfigError> {
        if self.root.is_dir() {
            return Ok(());
        }

        tracing::debug!("Creating configuration directory {}", self.root.display());
        fs::create_dir_all(&self.root)
            .change_context(ConfigError::Io)
            .attach_printable_lazy(|| format!("Failed to create {}", self.root.display()))?;

        restrict_permissions(&self.root, DIRECTORY_MODE)
    }
}

#[cfg(unix)]
pub fn restrict_permissions(path: &Path, mode: u32) -> error_stack::Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .change_context(ConfigError::Io)
        .attach_printable_lazy(|| {
            format!("Failed to set mode {:o} on {}", mode, path.display())
        })
}

#[cfg(not(unix))]
pub fn restrict_permissions(_path: &Path, _mode: u32) -> error_stack::Result<(), ConfigError> {
    Ok(())
}
