use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::ui::settings::AppSettings;

pub fn default_settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("story_chat");
    path.push("settings.json");
    path
}

/// Reads settings from `path`. A missing file is not an error.
pub fn load_settings(path: &Path) -> anyhow::Result<AppSettings> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid settings file {}", path.display()))
}

pub fn save_settings(path: &Path, settings: &AppSettings) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write settings to {}", path.display()))
}
