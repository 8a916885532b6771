// MiniBrowser state managers
// Managers handle stateful operations: the tab collection and keyboard shortcuts.

pub mod shortcut_manager;
pub mod tab_manager;
