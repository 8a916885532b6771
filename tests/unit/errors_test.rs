use minibrowser::types::errors::*;

// === TabError Tests ===

#[test]
fn tab_error_invalid_index_display() {
    let err = TabError::InvalidIndex(99);
    assert_eq!(err.to_string(), "Invalid tab index: 99");
}

#[test]
fn tab_error_last_tab_display() {
    assert_eq!(
        TabError::LastTab.to_string(),
        "Refusing to close the last remaining tab"
    );
}

#[test]
fn tab_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(TabError::LastTab);
    assert!(err.source().is_none());
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("disk full".to_string()).to_string(),
        "Settings I/O error: disk full"
    );
    assert_eq!(
        SettingsError::SerializationError("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
    assert_eq!(
        SettingsError::InvalidValue("width".to_string()).to_string(),
        "Invalid settings value: width"
    );
}

// === ShortcutError Tests ===

#[test]
fn shortcut_error_display_variants() {
    assert_eq!(
        ShortcutError::NotFound("print".to_string()).to_string(),
        "Shortcut not found for action: print"
    );
    assert_eq!(
        ShortcutError::Conflict("F5".to_string()).to_string(),
        "Shortcut conflict: F5"
    );
    assert_eq!(
        ShortcutError::InvalidKeys("Hyper+X".to_string()).to_string(),
        "Invalid shortcut keys: Hyper+X"
    );
}

// === IpcError / FaviconError Tests ===

#[test]
fn ipc_error_display_variants() {
    assert_eq!(
        IpcError::Malformed("eof".to_string()).to_string(),
        "Malformed IPC message: eof"
    );
    assert_eq!(
        IpcError::UnknownAction("print".to_string()).to_string(),
        "Unknown IPC action: print"
    );
}

#[test]
fn favicon_error_display_variants() {
    assert_eq!(
        FaviconError::Network("timeout".to_string()).to_string(),
        "Favicon network error: timeout"
    );
    assert_eq!(
        FaviconError::Decode("not an image".to_string()).to_string(),
        "Favicon decode error: not an image"
    );
    assert_eq!(
        FaviconError::Unsupported("ftp://x".to_string()).to_string(),
        "Unsupported favicon URL: ftp://x"
    );
}

// === BrowserError Tests ===

#[test]
fn browser_error_wraps_transparently() {
    let err: BrowserError = TabError::InvalidIndex(3).into();
    assert_eq!(err.to_string(), "Invalid tab index: 3");
    assert!(matches!(err, BrowserError::Tab(TabError::InvalidIndex(3))));

    let err: BrowserError = ShortcutError::InvalidKeys("".to_string()).into();
    assert!(matches!(err, BrowserError::Shortcut(_)));

    let err: BrowserError = IpcError::UnknownAction("x".to_string()).into();
    assert_eq!(err.to_string(), "Unknown IPC action: x");
}

#[test]
fn browser_error_page_view_display() {
    let err = BrowserError::PageView("no display".to_string());
    assert_eq!(err.to_string(), "Page view error: no display");
}
