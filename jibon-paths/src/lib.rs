//! XDG Base Directory paths for jibon.
//!
//! The server and the CLI resolve their default locations here so that
//! `jibon serve` and `jibon stats` agree on where the assessment history lives.

use std::path::PathBuf;

/// File name of the assessment history inside the data directory.
pub const HISTORY_FILE: &str = "history.csv";

/// Get the jibon config directory.
///
/// Returns `$XDG_CONFIG_HOME/jibon` if set, otherwise `~/.config/jibon`.
///
/// # Examples
///
/// ```
/// use jibon_paths::config_dir;
///
/// let config = config_dir();
/// let file = config.join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("jibon")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config/jibon")
    } else {
        PathBuf::from(".config/jibon")
    }
}

/// Get the jibon data directory.
///
/// Returns `$XDG_DATA_HOME/jibon` if set, otherwise `~/.local/share/jibon`.
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("jibon")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local/share/jibon")
    } else {
        PathBuf::from(".local/share/jibon")
    }
}

/// Default location of the assessment history store.
pub fn history_path() -> PathBuf {
    data_dir().join(HISTORY_FILE)
}
