//! Configuration structs with the stock scene as defaults, loaded from RON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    /// Initial scene values before the first animated frame.
    pub scene: SceneConfig,
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    pub title: String,
    /// Present with `PresentMode::Fifo`.
    pub vsync: bool,
}

/// Initial scene state. Colors are linear RGB and are not clamped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Sun centre before the first frame; `z` is always the sun plane.
    pub light_position: [f32; 2],
    pub light_color: [f32; 3],
    pub ambient_strength: f32,
    pub sky_color: [f32; 3],
    pub sun_color: [f32; 3],
    pub ground_color: [f32; 3],
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Log frame statistics every this many frames; 0 disables them.
    pub stats_interval_frames: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1600,
            title: "Dawn to Dusk".to_string(),
            vsync: true,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            light_position: [0.0, 0.0],
            light_color: [1.0, 1.0, 0.8],
            ambient_strength: 0.5,
            sky_color: [0.6, 0.8, 1.0],
            sun_color: [1.0, 1.0, 0.8],
            ground_color: [0.2, 0.7, 0.2],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            stats_interval_frames: 300,
        }
    }
}

impl Config {
    /// Read and parse the RON file at `path`. Missing sections and fields
    /// take their defaults; unknown fields are ignored.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if given, otherwise return the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_scene() {
        let config = Config::default();
        assert_eq!(config.window.width, 1600);
        assert_eq!(config.window.height, 1600);
        assert_eq!(config.window.title, "Dawn to Dusk");
        assert!(config.window.vsync);
        assert_eq!(config.scene.sky_color, [0.6, 0.8, 1.0]);
        assert_eq!(config.scene.ground_color, [0.2, 0.7, 0.2]);
        assert_eq!(config.scene.ambient_strength, 0.5);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let parsed = Config::from_ron(&ron_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config = Config::from_ron("(window: (width: 800))").unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 1600);
        assert_eq!(config.scene, SceneConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        assert!(Config::from_ron("(future_setting: true)").is_ok());
    }

    #[test]
    fn test_comments_allowed() {
        let config = Config::from_ron("// comment\n(\n  // another\n)").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result = Config::from_ron("{{not valid}}");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dusk.ron");
        std::fs::write(
            &path,
            "(scene: (sky_color: (0.1, 0.2, 0.3)), debug: (stats_interval_frames: 0))",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.scene.sky_color, [0.1, 0.2, 0.3]);
        assert_eq!(config.debug.stats_interval_frames, 0);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.ron");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains("absent.ron"));
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dusk.ron");
        std::fs::write(&path, "()").unwrap();
        Config::load(&path).unwrap();
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "()");
    }
}
