use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::info;

use crate::cli::Overrides;
use crate::error::AppError;
use crate::models::Settings;

pub const ENV_CONFIG: &str = "STINT_CONFIG";

/// Where the config file comes from; only the platform default may be absent.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Default(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::Explicit(p) | ConfigSource::Default(p) => p,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "stint", "stint")
}

pub fn resolve_config_path(cli_value: Option<PathBuf>) -> Result<ConfigSource, AppError> {
    if let Some(p) = cli_value {
        return Ok(ConfigSource::Explicit(p));
    }
    if let Ok(p) = std::env::var(ENV_CONFIG) {
        return Ok(ConfigSource::Explicit(PathBuf::from(p)));
    }
    default_config_path()
        .map(ConfigSource::Default)
        .ok_or_else(|| AppError::Config("could not determine config dir".into()))
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|pd| pd.config_dir().join("config.yaml"))
}

/// Directory for the rolling log file
pub fn log_dir() -> PathBuf {
    project_dirs()
        .map(|pd| pd.data_local_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("stint"))
}

pub fn load_config(path: &Path) -> Result<Settings, AppError> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("read {} failed: {e}", path.display())))?;
    let settings: Settings = serde_yaml::from_str(&data)
        .map_err(|e| AppError::Config(format!("parse {} failed: {e}", path.display())))?;
    Ok(settings)
}

/// Load settings for a source, falling back to built-in defaults when the
/// platform default file does not exist yet.
pub fn load_from_source(source: &ConfigSource) -> Result<Settings, AppError> {
    match source {
        ConfigSource::Default(p) if !p.exists() => {
            info!(path=%p.display(), "no config file, using defaults");
            Ok(Settings::default())
        }
        _ => load_config(source.path()),
    }
}

pub fn save_config(path: &Path, settings: &Settings) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::Config(format!("create {} failed: {e}", parent.display())))?;
    }
    let data = serde_yaml::to_string(settings)
        .map_err(|e| AppError::Config(format!("serialize config failed: {e}")))?;
    std::fs::write(path, data)
        .map_err(|e| AppError::Config(format!("write {} failed: {e}", path.display())))
}

/// Command-line values win over the file
pub fn apply_overrides(mut settings: Settings, overrides: &Overrides) -> Settings {
    if let Some(total) = &overrides.total {
        settings.total_time = total.clone();
    }
    if let Some(step) = overrides.step {
        settings.step_in_minutes = step;
    }
    if let Some(delta) = overrides.delta {
        settings.time_delta = delta;
    }
    if let Some(sound) = &overrides.sound {
        settings.alert_sound_path = sound.clone();
    }
    settings
}
