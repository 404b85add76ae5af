//! Configuration loading from files and environment

use std::path::{Path, PathBuf};

use super::types::{Config, ConfigLayer};
use crate::{Error, Result};

/// Environment variable overriding the document path
pub const CONTACTS_FILE_ENV: &str = "CONTACTS_FILE";

/// Per-directory config file name
pub const PROJECT_CONFIG_FILE: &str = ".contacts.toml";

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

/// Load configuration from all sources with hierarchy
///
/// # Errors
///
/// Returns error if:
/// - A config file is malformed TOML
/// - `CONTACTS_FILE` is set but empty
/// - The current directory cannot be determined
pub fn load_config() -> Result<Config> {
    let global = global_config_path();
    let project = project_config_path()?;
    load_config_from(global.as_deref(), &project, |key| std::env::var(key).ok())
}

/// Load configuration from explicit file locations and an environment lookup
///
/// Missing files are skipped.
///
/// # Errors
///
/// Same as [`load_config`].
pub fn load_config_from<F>(global: Option<&Path>, project: &Path, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    // 1. Built-in defaults
    let config = Config::default();

    // 2. Global config
    let config = match global {
        Some(path) if path.exists() => config.merge(load_toml_file(path)?),
        _ => config,
    };

    // 3. Project config
    let config = if project.exists() {
        config.merge(load_toml_file(project)?)
    } else {
        config
    };

    // 4. Environment
    let config = config.apply_env_vars(env)?;

    config.validate()?;
    tracing::debug!("Using contacts file {}", config.contacts_file.display());
    Ok(config)
}

// ═══════════════════════════════════════════════════════════════════════════
// PATH HELPERS
// ═══════════════════════════════════════════════════════════════════════════

/// Get path to global config file
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "contacts")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Get path to project config file
///
/// # Errors
///
/// Returns error if current directory cannot be determined
pub fn project_config_path() -> Result<PathBuf> {
    std::env::current_dir()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .map_err(|e| Error::io(Path::new("."), &e))
}

/// Load a TOML file into a config layer
///
/// # Errors
///
/// Returns error if:
/// - Path is a directory instead of a file
/// - File cannot be read
/// - TOML is malformed
pub fn load_toml_file(path: &Path) -> Result<ConfigLayer> {
    if path.is_dir() {
        return Err(Error::InvalidConfig(format!(
            "Config path is a directory, not a file: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, &e))?;

    toml::from_str(&content).map_err(|e| {
        Error::ConfigParse(format!("Failed to parse config file {}: {e}", path.display()))
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// ENVIRONMENT VARIABLE OVERRIDES
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Apply environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns error if `CONTACTS_FILE` is set to an empty value
    pub fn apply_env_vars<F>(self, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match env(CONTACTS_FILE_ENV) {
            Some(value) if value.is_empty() => Err(Error::InvalidConfig(format!(
                "{CONTACTS_FILE_ENV} cannot be empty - unset the variable or provide a path"
            ))),
            Some(value) => Ok(self.with_contacts_file(value)),
            None => Ok(self),
        }
    }
}
