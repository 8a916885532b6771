// Per-OS paths.
// Only the settings location varies by platform; the rest of the crate asks
// for `get_config_dir()` and never matches on `target_os` itself.

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use self::linux::get_config_dir;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
pub use self::macos::get_config_dir;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
pub use self::windows::get_config_dir;

/// Other Unix-likes follow the XDG layout without the XDG variable.
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub fn get_config_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| String::from(".")))
        .join(".config")
        .join("minibrowser")
}
