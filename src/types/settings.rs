use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level browser settings container.
///
/// Every field has a default, so a partial settings file only overrides what it names.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BrowserSettings {
    pub general: GeneralSettings,
    pub window: WindowSettings,
    pub find: FindSettings,
    /// Action name -> key combination overrides, e.g. `"new_tab": "Ctrl+N"`.
    pub shortcuts: HashMap<String, String>,
}

/// General browser settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralSettings {
    /// URL loaded by the first tab at startup.
    pub start_url: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            start_url: "http://www.google.com".to_string(),
        }
    }
}

/// Top-level window settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    /// Appended to page titles: "<title> - <suffix>".
    pub title_suffix: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            title_suffix: "Browser".to_string(),
        }
    }
}

/// Find-in-page settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FindSettings {
    pub wrap_around: bool,
}

impl Default for FindSettings {
    fn default() -> Self {
        Self { wrap_around: true }
    }
}
