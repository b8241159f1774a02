use crate::error::App;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User settings read from `~/.config/reelplay/config.toml`.
/// Every key is optional; missing keys fall back to [`Config::default`].
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub autoplay: bool,
    pub skip_seconds: f64,
    pub progress_interval_ms: u64,
    pub initial_volume: f64,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            autoplay: true,
            skip_seconds: 10.0,
            progress_interval_ms: 1000,
            initial_volume: 1.0,
            window_width: 960.0,
            window_height: 720.0,
        }
    }
}

impl Config {
    /// Reads the config file. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self, App> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        if !config.initial_volume.is_finite() {
            return Err(App::Config(format!(
                "initial_volume must be a number, got {}",
                config.initial_volume
            )));
        }
        config.initial_volume = config.initial_volume.clamp(0.0, 1.0);
        if !config.skip_seconds.is_finite() || config.skip_seconds <= 0.0 {
            return Err(App::Config(format!(
                "skip_seconds must be positive, got {}",
                config.skip_seconds
            )));
        }
        Ok(config)
    }
}

/// `$HOME/.config/reelplay`
pub fn config_dir() -> Result<PathBuf, App> {
    let home_dir = std::env::var("HOME")
        .map_err(|e| App::Io(format!("Failed to get HOME environment variable: {e}")))?;
    Ok(PathBuf::from(home_dir).join(".config").join("reelplay"))
}

pub fn log_dir() -> Result<PathBuf, App> {
    Ok(config_dir()?.join("logs"))
}

pub fn config_file() -> Result<PathBuf, App> {
    Ok(config_dir()?.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.skip_seconds, 10.0);
        assert!(config.autoplay);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "skip_seconds = 5.0\nautoplay = false").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.skip_seconds, 5.0);
        assert!(!config.autoplay);
        assert_eq!(config.progress_interval_ms, 1000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "initial_volume = 3.5").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.initial_volume, 1.0);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "skip_seconds = \"ten\"").unwrap();
        let result = Config::load(file.path());
        assert!(matches!(result, Err(App::Config(_))));
    }

    #[test]
    fn test_non_positive_skip_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "skip_seconds = 0.0").unwrap();
        assert!(matches!(Config::load(file.path()), Err(App::Config(_))));
    }

    #[test]
    fn test_nan_volume_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "initial_volume = nan").unwrap();
        assert!(matches!(Config::load(file.path()), Err(App::Config(_))));
    }
}
