//! Integration tests for GridSettings layered loading.
//!
//! Precedence: defaults < global < local file < COLGRID_* env vars.
//! These tests use temp files for the local layer.

use std::fs;

use tempfile::TempDir;

use colgrid::config::GridSettings;
use colgrid::{ErrorKind, Grid};

// ============================================================
// GridSettings::load()
// ============================================================

#[test]
fn given_local_file_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("colgrid.toml");
    fs::write(&path, "unkeyed_label = \"(none)\"\nmin_merge_arity = 3\n").unwrap();

    let settings = GridSettings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.unkeyed_label, "(none)");
    assert_eq!(settings.min_merge_arity, 3);
    assert_eq!(settings.merge_arity(), 3);
}

#[test]
fn given_invalid_arity_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("colgrid.toml");
    fs::write(&path, "min_merge_arity = 1\n").unwrap();

    let err = GridSettings::load(Some(&path)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(err.to_string().contains("min_merge_arity"));
}

#[test]
fn given_malformed_file_when_load_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "unkeyed_label = [").unwrap();

    let err = GridSettings::load(Some(&path)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn given_missing_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();

    let err = GridSettings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn given_env_override_when_load_then_env_wins() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("colgrid.toml");
    fs::write(&path, "tree_root_label = \"from-file\"\n").unwrap();

    std::env::set_var("COLGRID_TREE_ROOT_LABEL", "from-env");
    let result = GridSettings::load(Some(&path));
    std::env::remove_var("COLGRID_TREE_ROOT_LABEL");

    assert_eq!(result.unwrap().tree_root_label, "from-env");
}

// ============================================================
// Serialization
// ============================================================

#[test]
fn given_settings_when_serialized_then_parses_back() {
    let settings = GridSettings {
        unkeyed_label: "?".into(),
        ..GridSettings::default()
    };

    let toml = settings.to_toml().unwrap();

    assert_eq!(GridSettings::from_toml_str(&toml).unwrap(), settings);
}

#[test]
fn given_template_when_parsed_then_yields_defaults() {
    let settings = GridSettings::from_toml_str(&GridSettings::template()).unwrap();

    assert_eq!(settings, GridSettings::default());
}

#[test]
fn given_custom_label_when_removing_foreign_column_then_message_uses_label() {
    let settings = GridSettings::from_toml_str("unkeyed_label = \"?\"").unwrap();
    let mut grid: Grid<u8> = Grid::with_settings(settings);
    let mut other: Grid<u8> = Grid::new();
    let foreign = other.add_column(|v: &u8| *v);

    let err = grid.remove_column(Some(&foreign)).unwrap_err();

    assert_eq!(
        err.to_string(),
        "The column with key '?' is not part of this Grid"
    );
}
