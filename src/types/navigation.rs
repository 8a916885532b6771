use serde::{Deserialize, Serialize};

/// Back/forward availability as reported by a page view's history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// Navigation state of one page view, mirrored into the window when its tab is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub url: String,
    pub title: String,
    pub icon: Option<String>,
    pub history: HistoryState,
    pub loading: bool,
    /// Load progress in percent, 0..=100.
    pub progress: u8,
    /// Whether the most recent load reported failure.
    pub last_load_failed: bool,
}

impl NavigationState {
    /// Marks the start of a load.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.progress = 0;
    }

    /// Marks the end of a load, successful or not.
    pub fn finish_load(&mut self, ok: bool, history: HistoryState) {
        self.loading = false;
        self.last_load_failed = !ok;
        self.history = history;
    }

    pub fn set_progress(&mut self, percent: u8) {
        self.progress = percent.min(100);
    }
}
