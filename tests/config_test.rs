//! Integration tests for Settings loading from an explicit config file.
//!
//! These tests only pass `--config` style paths, so the global config file
//! and `COURSEGRAPH_*` variables of the machine running them are never written.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use coursegraph::application::ApplicationError;
use coursegraph::config::Settings;

#[test]
fn given_config_file_when_load_then_applies_its_values() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("coursegraph.toml");
    fs::write(
        &config_path,
        r#"
dataset = "/srv/catalogs/fall.json"
distinct_prerequisites = true
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(config_path.as_path())).expect("load settings");

    // Assert
    assert_eq!(settings.dataset, Some(PathBuf::from("/srv/catalogs/fall.json")));
    assert!(settings.distinct_prerequisites);
}

#[test]
fn given_partial_config_file_when_load_then_keeps_defaults_for_rest() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("coursegraph.toml");
    fs::write(&config_path, "distinct_prerequisites = true\n").unwrap();

    // Act
    let settings = Settings::load(Some(config_path.as_path())).expect("load settings");

    // Assert
    assert!(settings.distinct_prerequisites);
}

#[test]
fn given_tilde_dataset_when_load_then_expands_home() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("coursegraph.toml");
    fs::write(&config_path, "dataset = \"~/catalog.json\"\n").unwrap();

    // Act
    let settings = Settings::load(Some(config_path.as_path())).expect("load settings");

    // Assert
    let dataset = settings.dataset.expect("dataset set");
    assert!(!dataset.to_string_lossy().starts_with('~'));
    assert!(dataset.ends_with("catalog.json"));
}

#[test]
fn given_missing_config_file_when_load_then_errors() {
    let temp = TempDir::new().unwrap();

    let result = Settings::load(Some(temp.path().join("absent.toml").as_path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_malformed_config_file_when_load_then_errors() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("coursegraph.toml");
    fs::write(&config_path, "distinct_prerequisites = \"sometimes\"\n").unwrap();

    // Act
    let result = Settings::load(Some(config_path.as_path()));

    // Assert
    match result {
        Err(ApplicationError::Config { message }) => assert!(message.contains("parse")),
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn given_settings_when_to_toml_then_round_trips_through_file() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("coursegraph.toml");
    let settings = Settings {
        dataset: Some(PathBuf::from("/srv/catalog.json")),
        distinct_prerequisites: true,
    };
    fs::write(&config_path, settings.to_toml().unwrap()).unwrap();

    // Act
    let loaded = Settings::load(Some(config_path.as_path())).expect("load settings");

    // Assert
    assert_eq!(loaded, settings);
}
