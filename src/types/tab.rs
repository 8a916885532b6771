use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a tab, independent of its position in the tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(Uuid);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Label shown for a tab that has no title yet.
pub const UNTITLED_TAB_LABEL: &str = "New Tab";

/// A tab strip entry: label, icon and close affordance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStripEntry {
    pub label: String,
    pub icon: Option<String>,
    pub closable: bool,
    pub active: bool,
}

impl TabStripEntry {
    pub fn new() -> Self {
        Self {
            label: UNTITLED_TAB_LABEL.to_string(),
            icon: None,
            closable: true,
            active: false,
        }
    }

    /// Picks the label from the page title, falling back to the URL.
    pub fn relabel(&mut self, title: &str, url: &str) {
        self.label = if !title.is_empty() {
            title.to_string()
        } else if !url.is_empty() {
            url.to_string()
        } else {
            UNTITLED_TAB_LABEL.to_string()
        };
    }
}

impl Default for TabStripEntry {
    fn default() -> Self {
        Self::new()
    }
}
