//! Config file storage.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::StoredConfig;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Get the config file path.
pub fn config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "kasa").context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("config.json"))
}

/// Load the config file; a missing file is an empty config.
pub fn load() -> Result<StoredConfig> {
    let path = config_path()?;

    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(StoredConfig::default());
    }

    let json = fs::read_to_string(&path).context("Failed to read config file")?;
    serde_json::from_str(&json).with_context(|| format!("Invalid config file {}", path.display()))
}

/// Write the config file.
pub fn save(config: &StoredConfig) -> Result<PathBuf> {
    let path = config_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("Failed to create config directory")?;
    }

    let json = serde_json::to_string_pretty(config)?;
    fs::write(&path, &json).context("Failed to write config file")?;

    // The file may hold a bearer token.
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    tracing::debug!(path = %path.display(), "Config saved");
    Ok(path)
}
