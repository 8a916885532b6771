// Platform paths for Linux
// Config: ~/.config/minibrowser

use std::env;
use std::path::PathBuf;

/// Uses `$XDG_CONFIG_HOME/minibrowser` if set, otherwise `~/.config/minibrowser`.
pub fn get_config_dir() -> PathBuf {
    config_dir_from(env::var("XDG_CONFIG_HOME").ok(), env::var("HOME").ok())
}

fn config_dir_from(xdg: Option<String>, home: Option<String>) -> PathBuf {
    match xdg.filter(|x| !x.is_empty()) {
        Some(xdg) => PathBuf::from(xdg).join("minibrowser"),
        None => {
            let home = home.unwrap_or_else(|| String::from("/tmp"));
            PathBuf::from(home).join(".config").join("minibrowser")
        }
    }
}
