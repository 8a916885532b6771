use minibrowser::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use minibrowser::types::errors::SettingsError;
use minibrowser::types::settings::BrowserSettings;
use std::fs;
use tempfile::TempDir;

fn engine_in(dir: &TempDir) -> SettingsEngine {
    let path = dir.path().join("settings.json");
    SettingsEngine::new(Some(path))
}

#[test]
fn test_missing_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);

    let settings = engine.load().unwrap();
    assert_eq!(settings, BrowserSettings::default());
    assert_eq!(settings.general.start_url, "http://www.google.com");
    assert_eq!(settings.window.title_suffix, "Browser");
    assert_eq!((settings.window.width, settings.window.height), (800, 500));
    assert!(settings.find.wrap_around);
    // Loading never creates the file.
    assert!(!dir.path().join("settings.json").exists());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("settings.json"),
        r#"{"general": {"start_url": "https://example.org"}, "shortcuts": {"new_tab": "Ctrl+N"}}"#,
    )
    .unwrap();
    let mut engine = engine_in(&dir);

    let settings = engine.load().unwrap();
    assert_eq!(settings.general.start_url, "https://example.org");
    assert_eq!(settings.window.title_suffix, "Browser");
    assert_eq!(settings.shortcuts.get("new_tab").map(String::as_str), Some("Ctrl+N"));
    assert_eq!(engine.get_settings(), &settings);
}

#[test]
fn test_malformed_file_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
    let mut engine = engine_in(&dir);

    assert!(matches!(
        engine.load(),
        Err(SettingsError::SerializationError(_))
    ));
}

#[test]
fn test_invalid_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("settings.json"),
        r#"{"general": {"start_url": "   "}}"#,
    )
    .unwrap();
    let mut engine = engine_in(&dir);

    assert!(matches!(engine.load(), Err(SettingsError::InvalidValue(_))));
}

#[test]
fn test_load_or_default_recovers_from_bad_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("settings.json"), "[]").unwrap();
    let mut engine = engine_in(&dir);

    let settings = engine.load_or_default();
    assert_eq!(settings, BrowserSettings::default());
}

#[test]
fn test_load_or_default_rejects_conflicting_shortcuts() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("settings.json"),
        r#"{"general": {"start_url": "https://example.org"}, "shortcuts": {"reload": "F3"}}"#,
    )
    .unwrap();
    let mut engine = engine_in(&dir);

    assert!(matches!(engine.load(), Err(SettingsError::InvalidValue(_))));
    assert_eq!(engine.load_or_default(), BrowserSettings::default());
}

#[test]
fn test_save_creates_directories_and_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("settings.json");
    let engine = SettingsEngine::new(Some(path.clone()));

    engine.save().unwrap();
    assert!(path.exists());

    let mut reloaded = SettingsEngine::new(Some(path));
    assert_eq!(reloaded.load().unwrap(), BrowserSettings::default());
}

#[test]
fn test_reset_overwrites_file_with_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("settings.json"),
        r#"{"window": {"title_suffix": "Custom"}}"#,
    )
    .unwrap();
    let mut engine = engine_in(&dir);
    assert_eq!(engine.load().unwrap().window.title_suffix, "Custom");

    engine.reset().unwrap();
    assert_eq!(engine.get_settings(), &BrowserSettings::default());

    let mut reloaded = engine_in(&dir);
    assert_eq!(reloaded.load().unwrap().window.title_suffix, "Browser");
}
