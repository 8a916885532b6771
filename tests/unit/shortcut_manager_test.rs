use minibrowser::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use minibrowser::types::action::Action;
use minibrowser::types::errors::ShortcutError;
use rstest::rstest;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Default bindings
// ---------------------------------------------------------------------------

#[rstest]
#[case("/", Action::ShowFindBar)]
#[case("Escape", Action::HideFindBar)]
#[case("F3", Action::FindNext)]
#[case("Ctrl+T", Action::NewTab)]
#[case("Ctrl+W", Action::CloseTab)]
#[case("Ctrl+Q", Action::Quit)]
#[case("Alt+Left", Action::Back)]
#[case("Alt+Right", Action::Forward)]
#[case("F5", Action::Reload)]
#[case("Ctrl+L", Action::FocusUrl)]
fn test_default_bindings(#[case] keys: &str, #[case] expected: Action) {
    let mgr = ShortcutManager::new();
    assert_eq!(mgr.resolve(keys), Some(expected), "binding for {keys}");
}

#[rstest]
#[case("ctrl+t", Action::NewTab)]
#[case("CONTROL+t", Action::NewTab)]
#[case("alt+Left", Action::Back)]
#[case(" F5 ", Action::Reload)]
#[case("f3", Action::FindNext)]
fn test_resolve_normalizes_spelling(#[case] keys: &str, #[case] expected: Action) {
    let mgr = ShortcutManager::new();
    assert_eq!(mgr.resolve(keys), Some(expected));
}

#[rstest]
#[case("")]
#[case("Ctrl+")]
#[case("Hyper+T")]
#[case("Ctrl+Shift+T")]
#[case("X")]
fn test_unbound_or_invalid_keys_resolve_to_nothing(#[case] keys: &str) {
    let mgr = ShortcutManager::new();
    assert_eq!(mgr.resolve(keys), None);
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

#[rstest]
#[case("ctrl+shift+t", Some("Ctrl+Shift+T"))]
#[case("Ctrl++", Some("Ctrl++"))]
#[case("meta+k", Some("Cmd+K"))]
#[case("/", Some("/"))]
#[case("escape", Some("Escape"))]
#[case("alt+left", Some("Alt+Left"))]
#[case("", None)]
#[case("Foo+X", None)]
fn test_normalize_keys(#[case] keys: &str, #[case] expected: Option<&str>) {
    assert_eq!(
        ShortcutManager::normalize_keys(keys).as_deref(),
        expected,
        "normalize {keys:?}"
    );
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[test]
fn test_register_rebinds_action() {
    let mut mgr = ShortcutManager::new();
    mgr.register_shortcut(Action::NewTab, "Ctrl+N").unwrap();
    assert_eq!(mgr.resolve("Ctrl+N"), Some(Action::NewTab));
    assert_eq!(mgr.resolve("Ctrl+T"), None);
}

#[test]
fn test_register_conflict_is_rejected() {
    let mut mgr = ShortcutManager::new();
    let err = mgr.register_shortcut(Action::Quit, "F5").unwrap_err();
    assert!(matches!(err, ShortcutError::Conflict(_)));
    assert_eq!(mgr.resolve("F5"), Some(Action::Reload));
}

#[test]
fn test_register_same_keys_for_same_action_is_allowed() {
    let mut mgr = ShortcutManager::new();
    assert!(mgr.register_shortcut(Action::Reload, "f5").is_ok());
}

#[test]
fn test_register_invalid_keys() {
    let mut mgr = ShortcutManager::new();
    assert_eq!(
        mgr.register_shortcut(Action::Reload, "  "),
        Err(ShortcutError::InvalidKeys("  ".to_string()))
    );
}

#[test]
fn test_unregister_and_reset() {
    let mut mgr = ShortcutManager::new();
    mgr.unregister_shortcut(Action::ShowFindBar).unwrap();
    assert_eq!(mgr.resolve("/"), None);
    assert!(matches!(
        mgr.unregister_shortcut(Action::ShowFindBar),
        Err(ShortcutError::NotFound(_))
    ));

    mgr.reset_to_defaults();
    assert_eq!(mgr.resolve("/"), Some(Action::ShowFindBar));
    assert_eq!(mgr.list_shortcuts().len(), 10);
}

#[test]
fn test_has_conflict_respects_exclusion() {
    let mgr = ShortcutManager::new();
    assert_eq!(mgr.has_conflict("F3", None), Some(Action::FindNext));
    assert_eq!(mgr.has_conflict("F3", Some(Action::FindNext)), None);
    assert_eq!(mgr.has_conflict("F12", None), None);
}

// ---------------------------------------------------------------------------
// Overrides from settings
// ---------------------------------------------------------------------------

#[test]
fn test_apply_overrides_by_action_name() {
    let mut mgr = ShortcutManager::new();
    let overrides = HashMap::from([("find_next".to_string(), "Ctrl+G".to_string())]);
    mgr.apply_overrides(&overrides).unwrap();
    assert_eq!(mgr.resolve("Ctrl+G"), Some(Action::FindNext));
    assert_eq!(mgr.resolve("F3"), None);
}

#[test]
fn test_apply_overrides_unknown_action() {
    let mut mgr = ShortcutManager::new();
    let overrides = HashMap::from([("print".to_string(), "Ctrl+P".to_string())]);
    assert_eq!(
        mgr.apply_overrides(&overrides),
        Err(ShortcutError::NotFound("print".to_string()))
    );
}

#[test]
fn test_apply_overrides_swaps_bindings() {
    let mut mgr = ShortcutManager::new();
    let overrides = HashMap::from([
        ("new_tab".to_string(), "Ctrl+W".to_string()),
        ("close_tab".to_string(), "Ctrl+T".to_string()),
    ]);
    mgr.apply_overrides(&overrides).unwrap();
    assert_eq!(mgr.resolve("Ctrl+W"), Some(Action::NewTab));
    assert_eq!(mgr.resolve("Ctrl+T"), Some(Action::CloseTab));
}

#[test]
fn test_apply_overrides_conflict_leaves_table_unchanged() {
    let mut mgr = ShortcutManager::new();
    let overrides = HashMap::from([
        ("focus_url".to_string(), "Ctrl+K".to_string()),
        ("reload".to_string(), "F3".to_string()),
    ]);
    assert!(matches!(
        mgr.apply_overrides(&overrides),
        Err(ShortcutError::Conflict(_))
    ));
    assert_eq!(mgr.list_shortcuts(), &ShortcutManager::default_shortcuts());
}
