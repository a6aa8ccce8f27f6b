use spinwin_core::{Result, SpinError, WheelConfig};
use std::path::{Path, PathBuf};

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spinwin")
        .join("config.json")
}

/// Config file location: `--config` if given, the per-user default otherwise.
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path)
}

/// Load the wheel config. A missing default file means built-in defaults;
/// a missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<WheelConfig> {
    let path = resolve_path(explicit);

    if path.exists() {
        tracing::debug!("Loading config from {}", path.display());
        return WheelConfig::load(&path);
    }

    if explicit.is_some() {
        return Err(SpinError::config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    tracing::debug!("No config at {}, using defaults", path.display());
    Ok(WheelConfig::default())
}
