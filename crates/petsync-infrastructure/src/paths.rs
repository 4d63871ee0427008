//! Unified path management for PetSync files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/petsync/           # Config directory (or the override base path)
//! ├── config.toml              # Application configuration
//! ├── storage.json             # Durable key-value slots (`user`, `selectedPet`)
//! └── logs/                    # Application logs
//!     └── petsync.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "petsync";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for petsync_core::error::PetSyncError {
    fn from(err: PathError) -> Self {
        petsync_core::error::PetSyncError::config(err.to_string())
    }
}

/// Resolves every file location from one root.
///
/// With a base path (tests, `--data-dir`), all files live directly under it.
#[derive(Debug, Clone, Default)]
pub struct PetSyncPaths {
    base: Option<PathBuf>,
}

impl PetSyncPaths {
    /// Creates a resolver.
    ///
    /// # Arguments
    ///
    /// * `base_path` - Optional root replacing the platform config directory
    pub fn new(base_path: Option<&Path>) -> Self {
        Self {
            base: base_path.map(Path::to_path_buf),
        }
    }

    /// Returns the PetSync configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/petsync/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path of the durable key-value file.
    ///
    /// # Security Note
    ///
    /// The session slot inside is encrypted, but the file is still created
    /// with 600 permissions on Unix.
    pub fn storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("storage.json"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_path_replaces_config_dir() {
        let paths = PetSyncPaths::new(Some(Path::new("/tmp/petsync-test")));
        assert_eq!(
            paths.config_dir().unwrap(),
            PathBuf::from("/tmp/petsync-test")
        );
        assert_eq!(
            paths.storage_file().unwrap(),
            PathBuf::from("/tmp/petsync-test/storage.json")
        );
        assert!(paths.logs_dir().unwrap().ends_with("logs"));
    }

    #[test]
    fn default_paths_live_under_app_dir() {
        if let Ok(dir) = PetSyncPaths::default().config_dir() {
            assert!(dir.ends_with(APP_DIR));
            let config = PetSyncPaths::default().config_file().unwrap();
            assert!(config.starts_with(&dir));
        }
    }
}
