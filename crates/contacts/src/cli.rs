//! Argument parsing and startup

use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use contacts_core::{config, Config, ContactStore};

pub fn build_cli() -> Command {
    Command::new("contacts")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive contact book stored as a JSON file")
        .after_help(
            "Configuration (later overrides earlier):\n  \
             built-in default   contacts.json\n  \
             global config      <config dir>/contacts/config.toml\n  \
             project config     ./.contacts.toml\n  \
             environment        CONTACTS_FILE\n  \
             flag               --file",
        )
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Contact document to load and save"),
        )
}

/// Resolve configuration and apply command-line overrides.
///
/// # Errors
///
/// Returns an error if any configuration layer is invalid.
pub fn resolve_config(matches: &ArgMatches) -> Result<Config> {
    let config = config::load_config()?;
    let config = match matches.get_one::<PathBuf>("file") {
        Some(path) => config.with_contacts_file(path),
        None => config,
    };
    config.validate()?;
    Ok(config)
}

/// Load the contact store named by `config`.
///
/// # Errors
///
/// A malformed document is fatal; the store is never silently reset.
pub fn open_store(config: &Config) -> Result<ContactStore> {
    let store = ContactStore::load(&config.contacts_file)?;
    tracing::info!(
        count = store.len(),
        path = %store.path().display(),
        "Opened contact book"
    );
    Ok(store)
}
