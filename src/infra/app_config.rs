use crate::domain::Unit;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DATABASE_FILE: &str = "prostock.db";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Overrides the database location inside the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
    /// Unit preselected when a movement is entered without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_unit: Option<Unit>,
}

pub fn load_config() -> AppConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> AppConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return AppConfig::default();
    };
    match toml::from_str(&contents) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Ignoring unreadable config {}: {}", path.display(), err);
            AppConfig::default()
        }
    }
}

pub fn save_config(config: &AppConfig) -> std::io::Result<()> {
    save_config_to(&config_path(), config)
}

pub fn save_config_to(path: &Path, config: &AppConfig) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, contents)
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("PROSTOCK_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    app_data_dir().join("config.toml")
}

/// Picks the database file: explicit override, then `PROSTOCK_DB_PATH`,
/// then the configured path, then the data directory default.
pub fn resolve_database_path(explicit: Option<&Path>, config: &AppConfig) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var("PROSTOCK_DB_PATH") {
        return PathBuf::from(path);
    }
    if let Some(path) = &config.database_path {
        return path.clone();
    }
    app_data_dir().join(DATABASE_FILE)
}

pub fn app_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("PROSTOCK_DATA_HOME") {
        return PathBuf::from(path);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("ProStock");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("ProStock");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("prostock");
        }
        if let Some(home) = home::home_dir() {
            return home.join(".local").join("share").join("prostock");
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".prostock")
}
