use thiserror::Error;

// === TabError ===

/// Errors related to tab management operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TabError {
    /// The provided tab index is out of bounds.
    #[error("Invalid tab index: {0}")]
    InvalidIndex(usize),
    /// The last remaining tab can never be closed.
    #[error("Refusing to close the last remaining tab")]
    LastTab,
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === ShortcutError ===

/// Errors related to keyboard shortcut management.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShortcutError {
    /// Shortcut for the given action was not found.
    #[error("Shortcut not found for action: {0}")]
    NotFound(String),
    /// The shortcut keys conflict with an existing binding.
    #[error("Shortcut conflict: {0}")]
    Conflict(String),
    /// The provided key combination is invalid.
    #[error("Invalid shortcut keys: {0}")]
    InvalidKeys(String),
}

// === IpcError ===

/// Errors raised while decoding messages posted by the chrome or page scripts.
#[derive(Debug, Error)]
pub enum IpcError {
    /// The message body is not valid JSON for any known shape.
    #[error("Malformed IPC message: {0}")]
    Malformed(String),
    /// The message named an action the browser does not know.
    #[error("Unknown IPC action: {0}")]
    UnknownAction(String),
}

// === FaviconError ===

/// Errors related to fetching and decoding page icons.
#[derive(Debug, Error)]
pub enum FaviconError {
    /// The icon could not be downloaded.
    #[error("Favicon network error: {0}")]
    Network(String),
    /// The icon bytes are not a supported image.
    #[error("Favicon decode error: {0}")]
    Decode(String),
    /// The icon URL uses a scheme that cannot be fetched.
    #[error("Unsupported favicon URL: {0}")]
    Unsupported(String),
}

// === BrowserError ===

/// Top-level error for browser window operations.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error(transparent)]
    Tab(#[from] TabError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Shortcut(#[from] ShortcutError),
    #[error(transparent)]
    Ipc(#[from] IpcError),
    /// The page-view factory failed to create a view for a new tab.
    #[error("Page view error: {0}")]
    PageView(String),
}
