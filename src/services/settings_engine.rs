// Browser Settings Engine
// Reads and writes the optional `settings.json` in the platform config directory.
// A missing file means defaults; nothing is written unless `save` is called.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::BrowserSettings;

const SETTINGS_FILE: &str = "settings.json";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<BrowserSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &BrowserSettings;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &Path;
}

pub struct SettingsEngine {
    config_path: PathBuf,
    settings: BrowserSettings,
}

impl SettingsEngine {
    /// `path_override` replaces `<config dir>/settings.json`, e.g. in tests.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let config_path =
            path_override.unwrap_or_else(|| platform::get_config_dir().join(SETTINGS_FILE));
        Self {
            config_path,
            settings: BrowserSettings::default(),
        }
    }

    /// Like [`SettingsEngineTrait::load`], but a bad file only costs a warning.
    pub fn load_or_default(&mut self) -> BrowserSettings {
        self.load().unwrap_or_else(|e| {
            log::warn!(
                "ignoring {}: {}; using default settings",
                self.config_path.display(),
                e
            );
            self.settings = BrowserSettings::default();
            self.settings.clone()
        })
    }

    fn validate(settings: &BrowserSettings) -> Result<(), SettingsError> {
        if settings.general.start_url.trim().is_empty() {
            return Err(SettingsError::InvalidValue(
                "general.start_url is empty".to_string(),
            ));
        }
        let (width, height) = (settings.window.width, settings.window.height);
        if width == 0 || height == 0 {
            return Err(SettingsError::InvalidValue(format!(
                "window size {}x{} is not drawable",
                width, height
            )));
        }
        ShortcutManager::new()
            .apply_overrides(&settings.shortcuts)
            .map_err(|e| SettingsError::InvalidValue(format!("shortcuts: {}", e)))?;
        Ok(())
    }

    fn read_file(&self) -> Result<Option<String>, SettingsError> {
        match fs::read_to_string(&self.config_path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SettingsError::IoError(format!(
                "cannot read {}: {}",
                self.config_path.display(),
                e
            ))),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Missing file: defaults. Unparsable or invalid file: an error, and the
    /// in-memory settings stay as they were.
    fn load(&mut self) -> Result<BrowserSettings, SettingsError> {
        let Some(content) = self.read_file()? else {
            log::debug!("no settings at {}", self.config_path.display());
            self.settings = BrowserSettings::default();
            return Ok(self.settings.clone());
        };

        let settings: BrowserSettings = serde_json::from_str(&content)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        Self::validate(&settings)?;

        log::debug!("loaded settings from {}", self.config_path.display());
        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Writes pretty JSON, creating the config directory as needed.
    fn save(&self) -> Result<(), SettingsError> {
        if let Some(dir) = self.config_path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                SettingsError::IoError(format!("cannot create {}: {}", dir.display(), e))
            })?;
        }
        let json = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        fs::write(&self.config_path, json).map_err(|e| {
            SettingsError::IoError(format!(
                "cannot write {}: {}",
                self.config_path.display(),
                e
            ))
        })
    }

    fn get_settings(&self) -> &BrowserSettings {
        &self.settings
    }

    /// Restores defaults in memory and on disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = BrowserSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}
