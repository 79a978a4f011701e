//! Path utilities for the database and snapshot locations found in the config.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `path` with `~` expanded, as a string suitable for `Connection::open`.
pub fn expand_str(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}
