// Platform paths for macOS
// Config: ~/Library/Application Support/MiniBrowser

use std::env;
use std::path::PathBuf;

/// `~/Library/Application Support/MiniBrowser`
pub fn get_config_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
        .join("Library")
        .join("Application Support")
        .join("MiniBrowser")
}
