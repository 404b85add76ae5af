//! Loading-focused tests for configuration

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::{load_config_from, load_toml_file, Config, ConfigLayer, CONTACTS_FILE_ENV};
use crate::{Error, Result};

fn no_env(_: &str) -> Option<String> {
    None
}

fn temp_dir() -> Result<TempDir> {
    tempfile::tempdir().map_err(|e| Error::io(Path::new("tmp"), &e))
}

fn write(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| Error::io(path, &e))
}

#[test]
fn test_no_config_files_returns_defaults() -> Result<()> {
    let dir = temp_dir()?;
    let config = load_config_from(None, &dir.path().join(".contacts.toml"), no_env)?;
    assert_eq!(config, Config::default());
    assert_eq!(config.contacts_file, PathBuf::from("contacts.json"));
    Ok(())
}

#[test]
fn test_project_overrides_global() -> Result<()> {
    let dir = temp_dir()?;
    let global = dir.path().join("global.toml");
    let project = dir.path().join(".contacts.toml");
    write(&global, "contacts_file = \"/data/global.json\"\n")?;
    write(&project, "contacts_file = \"book.json\"\n")?;

    let config = load_config_from(Some(&global), &project, no_env)?;
    assert_eq!(config.contacts_file, PathBuf::from("book.json"));
    Ok(())
}

#[test]
fn test_project_naming_default_file_still_overrides_global() -> Result<()> {
    let dir = temp_dir()?;
    let global = dir.path().join("global.toml");
    let project = dir.path().join(".contacts.toml");
    write(&global, "contacts_file = \"/data/global.json\"\n")?;
    write(&project, "contacts_file = \"contacts.json\"\n")?;

    let config = load_config_from(Some(&global), &project, no_env)?;
    assert_eq!(config.contacts_file, PathBuf::from("contacts.json"));
    Ok(())
}

#[test]
fn test_empty_project_file_keeps_global() -> Result<()> {
    let dir = temp_dir()?;
    let global = dir.path().join("global.toml");
    let project = dir.path().join(".contacts.toml");
    write(&global, "contacts_file = \"/data/global.json\"\n")?;
    write(&project, "")?;

    assert_eq!(load_toml_file(&project)?, ConfigLayer::default());
    let config = load_config_from(Some(&global), &project, no_env)?;
    assert_eq!(config.contacts_file, PathBuf::from("/data/global.json"));
    Ok(())
}

#[test]
fn test_global_applies_when_project_missing() -> Result<()> {
    let dir = temp_dir()?;
    let global = dir.path().join("global.toml");
    write(&global, "contacts_file = \"/data/global.json\"\n")?;

    let config = load_config_from(Some(&global), &dir.path().join("missing.toml"), no_env)?;
    assert_eq!(config.contacts_file, PathBuf::from("/data/global.json"));
    Ok(())
}

#[test]
fn test_env_overrides_files() -> Result<()> {
    let dir = temp_dir()?;
    let project = dir.path().join(".contacts.toml");
    write(&project, "contacts_file = \"book.json\"\n")?;

    let config = load_config_from(None, &project, |key| {
        (key == CONTACTS_FILE_ENV).then(|| "/tmp/env.json".to_string())
    })?;
    assert_eq!(config.contacts_file, PathBuf::from("/tmp/env.json"));
    Ok(())
}

#[test]
fn test_empty_env_value_rejected() -> Result<()> {
    let dir = temp_dir()?;
    let result = load_config_from(None, &dir.path().join("none.toml"), |_| Some(String::new()));
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
    Ok(())
}

#[test]
fn test_malformed_toml_returns_parse_error() -> Result<()> {
    let dir = temp_dir()?;
    let path = dir.path().join("bad.toml");
    write(&path, "contacts_file = \n invalid toml [[[")?;
    assert!(matches!(load_toml_file(&path), Err(Error::ConfigParse(_))));
    Ok(())
}

#[test]
fn test_unknown_key_rejected() -> Result<()> {
    let dir = temp_dir()?;
    let path = dir.path().join("extra.toml");
    write(&path, "contacts_fle = \"typo.json\"\n")?;
    assert!(load_toml_file(&path).is_err());
    Ok(())
}

#[test]
fn test_directory_config_path_rejected() -> Result<()> {
    let dir = temp_dir()?;
    assert!(matches!(
        load_toml_file(dir.path()),
        Err(Error::InvalidConfig(_))
    ));
    Ok(())
}

#[test]
fn test_cli_override_wins() {
    let config = Config::default().with_contacts_file("cli.json");
    assert_eq!(config.contacts_file, PathBuf::from("cli.json"));
}

#[test]
fn test_empty_path_invalid() {
    let config = Config::default().with_contacts_file("");
    assert!(config.validate().is_err());
}
