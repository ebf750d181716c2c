//! Integration tests for settings files and locale selection.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::{NamedTempFile, TempDir};
use tscat::runtime::{fallback_chain, resolve_locale_from, split_locale};
use tscat::{Config, ConfigError};

// =========================================================================
// Settings files
// =========================================================================

#[test]
fn defaults_apply_to_missing_keys() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.language, None);
    assert_eq!(config.translations_dir, PathBuf::from("locale"));
    assert_eq!(config.file_prefix, "");
    assert!(config.include_unfinished);
    assert!(config.load_options().include_unfinished);
}

#[test]
fn load_resolves_relative_directory_against_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(
        &path,
        r#"
language = "hr_HR"
translations_dir = "i18n"
file_prefix = "digiwage_"
include_unfinished = false
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.language.as_deref(), Some("hr_HR"));
    assert_eq!(config.translations_dir, dir.path().join("i18n"));
    assert_eq!(config.file_prefix, "digiwage_");
    assert!(!config.load_options().include_unfinished);
}

#[test]
fn load_reports_invalid_toml() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"language = [").unwrap();
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn load_reports_missing_file() {
    let err = Config::load("/nonexistent/settings.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn save_then_load_keeps_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.toml");
    let config = Config {
        language: Some("pl".to_string()),
        translations_dir: dir.path().join("locale"),
        file_prefix: "digiwage_".to_string(),
        include_unfinished: false,
    };
    config.save(&path).unwrap();
    assert_eq!(Config::load(&path).unwrap(), config);
}

#[test]
fn translator_uses_cli_language_over_settings() {
    let dir = TempDir::new().unwrap();
    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data");
    let config = Config {
        language: Some("hr_HR".to_string()),
        translations_dir: data,
        file_prefix: "digiwage_".to_string(),
        include_unfinished: true,
    };

    let translator = config.translator(None);
    assert_eq!(translator.languages(), vec!["hr_HR"]);
    assert_eq!(translator.translate("AddNewAddressDialog", "SAVE"), "SPREMI");

    let translator = config.translator(Some("pl-PL"));
    assert_eq!(translator.languages(), vec!["pl"]);
    assert_eq!(translator.translate("AddNewAddressDialog", "SAVE"), "ZAPISZ");

    let empty = Config {
        translations_dir: dir.path().to_path_buf(),
        ..config
    };
    assert_eq!(empty.translator(Some("pl")).layer_count(), 0);
}

// =========================================================================
// Locale selection
// =========================================================================

#[test]
fn locale_precedence_is_cli_settings_system_default() {
    assert_eq!(resolve_locale_from(Some("hr_HR"), Some("pl"), Some("de_DE")), "hr_HR");
    assert_eq!(resolve_locale_from(None, Some("pl"), Some("de_DE")), "pl");
    assert_eq!(resolve_locale_from(None, None, Some("de_DE.UTF-8")), "de_DE");
    assert_eq!(resolve_locale_from(None, None, Some("C")), "en");
}

#[test]
fn locale_split_and_chain() {
    assert_eq!(split_locale("hr_HR"), ("hr", Some("HR")));
    assert_eq!(fallback_chain("hr_HR"), vec!["hr", "hr_HR"]);
    assert_eq!(fallback_chain("pl"), vec!["pl"]);
}
