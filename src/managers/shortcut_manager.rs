//! Shortcut Manager.
//!
//! Maps key combinations to window actions with conflict detection
//! and platform-specific modifier key adaptation.

use std::collections::HashMap;

use crate::types::action::Action;
use crate::types::errors::ShortcutError;

/// Trait defining shortcut management operations.
pub trait ShortcutManagerTrait {
    fn register_shortcut(&mut self, action: Action, keys: &str) -> Result<(), ShortcutError>;
    fn unregister_shortcut(&mut self, action: Action) -> Result<(), ShortcutError>;
    fn get_shortcut(&self, action: Action) -> Option<&str>;
    fn list_shortcuts(&self) -> &HashMap<Action, String>;
    fn reset_to_defaults(&mut self);
    fn has_conflict(&self, keys: &str, exclude_action: Option<Action>) -> Option<Action>;
    fn resolve(&self, keys: &str) -> Option<Action>;
    fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Result<(), ShortcutError>;
}

/// Shortcut manager with in-memory storage and platform adaptation.
pub struct ShortcutManager {
    shortcuts: HashMap<Action, String>,
}

impl ShortcutManager {
    pub fn new() -> Self {
        Self {
            shortcuts: Self::default_shortcuts(),
        }
    }

    pub fn default_shortcuts() -> HashMap<Action, String> {
        let defaults = [
            (Action::ShowFindBar, "/"),
            (Action::HideFindBar, "Escape"),
            (Action::FindNext, "F3"),
            (Action::NewTab, "Ctrl+T"),
            (Action::CloseTab, "Ctrl+W"),
            (Action::Quit, "Ctrl+Q"),
            (Action::Back, "Alt+Left"),
            (Action::Forward, "Alt+Right"),
            (Action::Reload, "F5"),
            (Action::FocusUrl, "Ctrl+L"),
        ];

        defaults
            .into_iter()
            .map(|(a, k)| (a, Self::adapt_for_platform(k)))
            .collect()
    }

    /// Adapts modifier keys for the current platform.
    fn adapt_for_platform(keys: &str) -> String {
        if cfg!(target_os = "macos") {
            keys.replace("Ctrl+", "Cmd+")
        } else {
            keys.to_string()
        }
    }

    /// Canonical spelling: capitalized modifiers and key names.
    /// A trailing `+` is the plus key itself ("Ctrl++").
    pub fn normalize_keys(keys: &str) -> Option<String> {
        let keys = keys.trim();
        if keys.is_empty() {
            return None;
        }
        let (mods, key) = match keys.strip_suffix("++") {
            Some(prefix) => (prefix, "+"),
            None => match keys.rsplit_once('+') {
                Some((mods, key)) if !mods.is_empty() => (mods, key),
                _ => ("", keys),
            },
        };
        if key.is_empty() {
            return None;
        }

        let mut parts = Vec::new();
        for m in mods.split('+').filter(|m| !m.is_empty()) {
            let canonical = match m.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => "Ctrl",
                "alt" | "option" => "Alt",
                "shift" => "Shift",
                "cmd" | "meta" | "super" => "Cmd",
                _ => return None,
            };
            parts.push(canonical.to_string());
        }

        // "t" -> "T", "escape" -> "Escape", "f5" -> "F5"
        let mut chars = key.chars();
        let key = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => return None,
        };
        parts.push(key);
        Some(parts.join("+"))
    }
}

impl Default for ShortcutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutManagerTrait for ShortcutManager {
    fn register_shortcut(&mut self, action: Action, keys: &str) -> Result<(), ShortcutError> {
        let normalized = Self::normalize_keys(keys)
            .ok_or_else(|| ShortcutError::InvalidKeys(keys.to_string()))?;

        if let Some(conflicting_action) = self.has_conflict(&normalized, Some(action)) {
            return Err(ShortcutError::Conflict(format!(
                "'{}' is already bound to '{}'",
                keys,
                conflicting_action.name()
            )));
        }

        let adapted = Self::adapt_for_platform(&normalized);
        self.shortcuts.insert(action, adapted);
        Ok(())
    }

    fn unregister_shortcut(&mut self, action: Action) -> Result<(), ShortcutError> {
        self.shortcuts
            .remove(&action)
            .map(|_| ())
            .ok_or_else(|| ShortcutError::NotFound(action.name().to_string()))
    }

    fn get_shortcut(&self, action: Action) -> Option<&str> {
        self.shortcuts.get(&action).map(|s| s.as_str())
    }

    fn list_shortcuts(&self) -> &HashMap<Action, String> {
        &self.shortcuts
    }

    fn reset_to_defaults(&mut self) {
        self.shortcuts = Self::default_shortcuts();
    }

    fn has_conflict(&self, keys: &str, exclude_action: Option<Action>) -> Option<Action> {
        let adapted = Self::adapt_for_platform(keys);
        self.shortcuts
            .iter()
            .find(|(action, bound)| **bound == adapted && Some(**action) != exclude_action)
            .map(|(action, _)| *action)
    }

    fn resolve(&self, keys: &str) -> Option<Action> {
        let normalized = Self::normalize_keys(keys)?;
        let adapted = Self::adapt_for_platform(&normalized);
        self.shortcuts
            .iter()
            .find(|(_, bound)| **bound == adapted)
            .map(|(action, _)| *action)
    }

    /// Rebinds actions by name, e.g. from the settings file. Conflicts are
    /// checked against the final table, so swapping two bindings works. On
    /// error nothing is changed.
    fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Result<(), ShortcutError> {
        let mut table = self.shortcuts.clone();
        for (name, keys) in overrides {
            let action =
                Action::from_name(name).ok_or_else(|| ShortcutError::NotFound(name.clone()))?;
            let normalized = Self::normalize_keys(keys)
                .ok_or_else(|| ShortcutError::InvalidKeys(keys.clone()))?;
            table.insert(action, Self::adapt_for_platform(&normalized));
        }

        let mut bound: HashMap<&str, Action> = HashMap::new();
        for (action, keys) in &table {
            if let Some(other) = bound.insert(keys.as_str(), *action) {
                let (first, second) = if other.name() < action.name() {
                    (other, *action)
                } else {
                    (*action, other)
                };
                return Err(ShortcutError::Conflict(format!(
                    "'{}' is bound to both '{}' and '{}'",
                    keys,
                    first.name(),
                    second.name()
                )));
            }
        }

        self.shortcuts = table;
        Ok(())
    }
}
