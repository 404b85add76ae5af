//! Configuration loading and management
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: `<config dir>/contacts/config.toml`
//! 3. Project config: `.contacts.toml` in the working directory
//! 4. Environment variables: `CONTACTS_FILE`
//! 5. CLI flags (`--file`)
//!
//! # Example Config
//!
//! ```toml
//! contacts_file = "/home/asha/documents/contacts.json"
//! ```

mod load;
mod types;

#[cfg(test)]
mod tests_loading;

pub use load::{
    global_config_path, load_config, load_config_from, load_toml_file, project_config_path,
    CONTACTS_FILE_ENV, PROJECT_CONFIG_FILE,
};
pub use types::{Config, ConfigLayer, DEFAULT_CONTACTS_FILE};
