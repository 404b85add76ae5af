//! Configuration type definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Document path used when nothing else is configured
pub const DEFAULT_CONTACTS_FILE: &str = "contacts.json";

/// Root configuration structure
///
/// Loaded from defaults → global → project → env vars → CLI flags
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Location of the JSON contact document
    pub contacts_file: PathBuf,
}

/// One configuration file as written; unset keys stay `None`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub contacts_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contacts_file: PathBuf::from(DEFAULT_CONTACTS_FILE),
        }
    }
}

impl Config {
    /// Merge a file layer into this config (the layer takes precedence)
    ///
    /// Only fields the layer actually sets override `self`.
    pub fn merge(self, layer: ConfigLayer) -> Self {
        Self {
            contacts_file: layer.contacts_file.unwrap_or(self.contacts_file),
        }
    }

    /// Override the document path, as the `--file` flag does.
    pub fn with_contacts_file(self, path: impl Into<PathBuf>) -> Self {
        Self {
            contacts_file: path.into(),
        }
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `contacts_file` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.contacts_file.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "contacts_file cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
