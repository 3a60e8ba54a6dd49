//! Loading `PlannerSettings` from `config.toml`.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::PlannerSettings;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DATABASE_FILE_NAME: &str = "planner.db";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "DayPlanner", "DayPlanner")
}

/// Platform config file location, if a home directory can be resolved.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Where the planner database lives unless the settings override it.
pub fn resolve_database_path(settings: &PlannerSettings) -> PathBuf {
    if let Some(ref path) = settings.database_path {
        return path.clone();
    }
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join(DATABASE_FILE_NAME),
        None => PathBuf::from(DATABASE_FILE_NAME),
    }
}

/// Parse and validate the settings file at `path`.
pub fn load_from_path(path: &Path) -> Result<PlannerSettings> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let settings: PlannerSettings =
        toml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))?;
    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings in {}: {}", path.display(), e))?;
    Ok(settings)
}

/// Settings from `path` (or the platform default location), falling back to
/// defaults when the file is absent or unusable.
pub fn load_or_default(path: Option<&Path>) -> PlannerSettings {
    let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => path,
        None => {
            log::info!("No config directory available, using default settings");
            return PlannerSettings::default();
        }
    };

    if !path.exists() {
        log::debug!("{} not found, using default settings", path.display());
        return PlannerSettings::default();
    }

    match load_from_path(&path) {
        Ok(settings) => {
            log::info!("Loaded settings from {}", path.display());
            settings
        }
        Err(e) => {
            log::warn!("{:#}, using defaults", e);
            PlannerSettings::default()
        }
    }
}
