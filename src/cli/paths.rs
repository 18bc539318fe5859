//! Path utilities for wagerline.
//!
//! User-level settings live under `~/.wagerline/`:
//! - `~/.wagerline/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the wagerline home directory (`~/.wagerline/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".wagerline")
}

/// Returns the default config file path (`~/.wagerline/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_is_under_wagerline_home() {
        let config = default_config();
        assert!(config.starts_with(home_dir()));
        assert!(config.to_string_lossy().contains(".wagerline"));
        assert!(config.ends_with("config.toml"));
    }
}
