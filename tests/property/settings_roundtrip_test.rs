//! Property-based tests for BrowserSettings serialization round-trip.
//!
//! These tests verify that BrowserSettings can be serialized to JSON
//! and deserialized back without data loss for arbitrary valid inputs.

use minibrowser::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use minibrowser::types::action::Action;
use minibrowser::types::settings::{BrowserSettings, FindSettings, GeneralSettings, WindowSettings};
use proptest::prelude::*;
use std::collections::HashMap;
use tempfile::TempDir;

// --- Arbitrary strategies for all settings sub-types ---

fn arb_general_settings() -> impl Strategy<Value = GeneralSettings> {
    "https?://[a-z]{1,12}\\.[a-z]{2,3}(/[a-z0-9]{0,8})?"
        .prop_map(|start_url| GeneralSettings { start_url })
}

fn arb_window_settings() -> impl Strategy<Value = WindowSettings> {
    (1u32..4000, 1u32..3000, "[A-Za-z ]{0,20}").prop_map(|(width, height, title_suffix)| {
        WindowSettings {
            width,
            height,
            title_suffix,
        }
    })
}

/// Rebinds a few actions to distinct Ctrl+Shift digits, which no default uses.
fn arb_shortcuts() -> impl Strategy<Value = HashMap<String, String>> {
    prop::sample::subsequence(Action::ALL.to_vec(), 0..5).prop_map(|actions| {
        actions
            .into_iter()
            .enumerate()
            .map(|(i, action)| (action.name().to_string(), format!("Ctrl+Shift+{}", i)))
            .collect()
    })
}

fn arb_browser_settings() -> impl Strategy<Value = BrowserSettings> {
    (
        arb_general_settings(),
        arb_window_settings(),
        any::<bool>(),
        arb_shortcuts(),
    )
        .prop_map(|(general, window, wrap_around, shortcuts)| BrowserSettings {
            general,
            window,
            find: FindSettings { wrap_around },
            shortcuts,
        })
}

proptest! {
    #[test]
    fn settings_json_roundtrip(settings in arb_browser_settings()) {
        let json = serde_json::to_string(&settings).unwrap();
        let restored: BrowserSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(settings, restored);
    }

    #[test]
    fn settings_survive_save_and_load(settings in arb_browser_settings()) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();

        let mut engine = SettingsEngine::new(Some(path.clone()));
        let loaded = engine.load().unwrap();
        prop_assert_eq!(&loaded, &settings);

        engine.save().unwrap();
        let mut again = SettingsEngine::new(Some(path));
        prop_assert_eq!(again.load().unwrap(), settings);
    }
}
