//! # appfs Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the configuration that tells appfs
//! where an application's storage lives on this machine: the internal files
//! directory that is always available, and an optional external media root
//! (a USB stick, SD card or second disk) that is preferred when present.
//!
//! ## Architecture
//!
//! Configuration sources:
//! 1. An explicit file passed with `--config` or `APPFS_CONFIG`. When given, it is
//!    the only source besides the defaults.
//! 2. Project-specific `.appfs.toml` in the current directory or ancestors
//! 3. User-specific `<config dir>/appfs/config.toml`
//! 4. Default values defined in the code
//!
//! After merging, `~` is expanded in every path and the result is validated.
//!
//! ## Examples
//!
//! ```toml
//! [storage]
//! app_id = "recorder"
//! internal_dir = "~/.local/share/recorder"
//! external_media_root = "/media/usb0"
//! removable = true
//! ```
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let ctx = DesktopContext::from_config(&cfg.storage);
//! ```
//!
use crate::core::error::{AppfsError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// The effective configuration after all sources are merged.
#[derive(Debug, Default, Clone)]
pub struct Config {
    pub storage: StorageConfig,
}

/// Where the application's files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Application identifier; names the per-app directory on external media.
    pub app_id: String,
    /// Internal files directory (can use ~). Always considered available.
    pub internal_dir: String,
    /// Mount point of the external media (can use ~). Unset means no external media.
    pub external_media_root: Option<String>,
    /// Whether the external media can be removed. Non-removable media counts as available.
    pub removable: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            app_id: default_app_id(),
            internal_dir: default_internal_dir(),
            external_media_root: None,
            removable: default_removable(),
        }
    }
}

/// # Configuration from File (`FileConfig`)
///
/// One configuration file as written. Every setting is optional so that a key
/// set explicitly (even to its default value) can be told apart from a key that
/// is absent, which matters when a later file overrides an earlier one.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    storage: FileStorageConfig,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct FileStorageConfig {
    app_id: Option<String>,
    internal_dir: Option<String>,
    external_media_root: Option<String>,
    removable: Option<bool>,
}

impl FileStorageConfig {
    /// Overwrites every setting this file specifies.
    fn apply_to(self, storage: &mut StorageConfig) {
        if let Some(app_id) = self.app_id {
            storage.app_id = app_id;
        }
        if let Some(internal_dir) = self.internal_dir {
            storage.internal_dir = internal_dir;
        }
        if let Some(root) = self.external_media_root {
            storage.external_media_root = Some(root);
        }
        if let Some(removable) = self.removable {
            storage.removable = removable;
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "Appfs", "appfs")
}

fn default_app_id() -> String {
    "appfs".to_string()
}
fn default_internal_dir() -> String {
    if let Some(proj_dirs) = project_dirs() {
        return proj_dirs.data_dir().to_string_lossy().into_owned();
    }
    match dirs::home_dir() {
        Some(home) => home.join(".appfs").to_string_lossy().into_owned(),
        None => ".appfs".to_string(),
    }
}
fn default_removable() -> bool {
    true
}

const PROJECT_CONFIG_FILENAME: &str = ".appfs.toml";

/// Loads the effective configuration.
///
/// With `explicit` set, only that file (plus defaults) is used and it must exist.
/// Otherwise the project file overrides the user file, which overrides defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            merge_configs(Some(load_config_from_path(path)?), None)
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config, project_config)
        }
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<FileConfig>> {
    if let Some(proj_dirs) = project_dirs() {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<FileConfig>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.appfs.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` up to the filesystem root looking for `.appfs.toml`.
/// The search stops at the first directory containing `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let project_config = dir.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if dir.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                dir.display()
            );
            return None;
        }
    }
    None
}

fn load_config_from_path(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Starts from the defaults, applies the user file, then the project file.
/// Any key a later file sets wins, including one set to its default value.
fn merge_configs(user: Option<FileConfig>, project: Option<FileConfig>) -> Config {
    let mut config = Config::default();
    for layer in [user, project].into_iter().flatten() {
        layer.storage.apply_to(&mut config.storage);
    }
    config
}

fn expand_config_paths(config: &mut Config) {
    let storage = &mut config.storage;
    storage.internal_dir = shellexpand::tilde(&storage.internal_dir).into_owned();
    debug!("Expanded internal directory: {}", storage.internal_dir);
    if let Some(root) = storage.external_media_root.as_mut() {
        *root = shellexpand::tilde(root.as_str()).into_owned();
        debug!("Expanded external media root: {}", root);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    let storage = &config.storage;
    if storage.app_id.trim().is_empty() {
        return Err(anyhow!(AppfsError::Config(
            "storage.app_id cannot be empty.".to_string()
        )));
    }
    if storage.app_id.contains(['/', '\\']) || storage.app_id == ".." {
        return Err(anyhow!(AppfsError::Config(format!(
            "storage.app_id '{}' must be a single path component.",
            storage.app_id
        ))));
    }
    if storage.internal_dir.is_empty() {
        return Err(anyhow!(AppfsError::Config(
            "storage.internal_dir cannot be empty.".to_string()
        )));
    }
    check_dir_if_present("internal_dir", Path::new(&storage.internal_dir))?;
    if let Some(root) = &storage.external_media_root {
        check_dir_if_present("external_media_root", Path::new(root))?;
    }
    Ok(())
}

/// A configured path may be missing (it is created or checked later) but must not be a file.
fn check_dir_if_present(key: &str, path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(anyhow!(AppfsError::Config(format!(
            "Configured storage.{} '{}' exists but is not a directory.",
            key,
            path.display()
        ))));
    }
    Ok(())
}
