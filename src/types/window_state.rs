use serde::Serialize;

use super::action::Action;

/// A single-line text entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextField {
    pub text: String,
    /// Cursor position in characters.
    pub cursor: usize,
}

impl TextField {
    /// Replaces the text and moves the cursor to the start.
    pub fn set_text_at_start(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = 0;
    }

    /// Replaces the text as if typed, leaving the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

/// Which widget of the URL/progress stack is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressStack {
    #[default]
    UrlField,
    Progress,
}

/// A pending keyboard focus request for the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    UrlField,
    FindField,
    Page,
}

/// Enabled flags of the navigation actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActionStates {
    pub back: bool,
    pub forward: bool,
    pub stop: bool,
}

impl ActionStates {
    /// Only back, forward and stop are ever disabled.
    pub fn is_enabled(&self, action: Action) -> bool {
        match action {
            Action::Back => self.back,
            Action::Forward => self.forward,
            Action::Stop => self.stop,
            _ => true,
        }
    }
}

/// Window-scoped UI state; nothing here outlives the process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WindowState {
    pub title: String,
    pub icon: Option<String>,
    pub url_field: TextField,
    pub find_field: TextField,
    pub find_bar_visible: bool,
    pub status: String,
    pub address_stack: AddressStack,
    pub progress: u8,
    pub actions: ActionStates,
    #[serde(skip)]
    pub focus: Option<Focus>,
}
