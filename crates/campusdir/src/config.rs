//! Configuration management for campusdir.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::catalog::Coordinate;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "campusdir";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CAMPUSDIR_`, `__` between levels)
/// 2. TOML config file at `~/.config/campusdir/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog sources.
    pub catalog: CatalogConfig,
    /// Map camera configuration.
    pub map: MapConfig,
    /// Search output configuration.
    pub search: SearchConfig,
}

/// Where catalogs are loaded from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON file with the location catalog.
    /// Uses the embedded campus seed when unset.
    pub locations_path: Option<PathBuf>,
    /// JSON file with the club catalog.
    /// Uses the embedded club seed when unset.
    pub clubs_path: Option<PathBuf>,
}

/// Map camera configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Latitude of the default camera centre.
    pub default_latitude: f64,
    /// Longitude of the default camera centre.
    pub default_longitude: f64,
    /// Span in degrees of the default camera region.
    pub default_span: f64,
    /// Span in degrees when focused on a selected entry.
    pub focus_span: f64,
    /// Extra margin, as a fraction of the extent, when fitting all markers.
    pub fit_padding: f64,
}

/// Search output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of results printed by the CLI.
    /// Set to 0 for unlimited.
    pub max_results: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_latitude: -37.7210,
            default_longitude: 145.0480,
            default_span: 0.02,
            focus_span: 0.005,
            fit_padding: 0.1,
        }
    }
}

impl MapConfig {
    /// Centre of the default camera region.
    #[must_use]
    pub fn default_center(&self) -> Coordinate {
        Coordinate::new(self.default_latitude, self.default_longitude)
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("CAMPUSDIR_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let map = &self.map;

        if let Err(reason) = map.default_center().validate() {
            return Err(Error::config_validation(format!(
                "default map centre: {reason}"
            )));
        }

        for (name, span) in [
            ("default_span", map.default_span),
            ("focus_span", map.focus_span),
        ] {
            if !span.is_finite() || span <= 0.0 {
                return Err(Error::config_validation(format!(
                    "{name} must be a positive number of degrees, got {span}"
                )));
            }
        }

        if !map.fit_padding.is_finite() || map.fit_padding < 0.0 {
            return Err(Error::config_validation(format!(
                "fit_padding must not be negative, got {}",
                map.fit_padding
            )));
        }

        Ok(())
    }

    /// Location catalog file, if one is configured.
    #[must_use]
    pub fn locations_path(&self) -> Option<&Path> {
        self.catalog.locations_path.as_deref()
    }

    /// Club catalog file, if one is configured.
    #[must_use]
    pub fn clubs_path(&self) -> Option<&Path> {
        self.catalog.clubs_path.as_deref()
    }

    /// Result cap for printed searches, `None` when unlimited.
    #[must_use]
    pub fn result_limit(&self) -> Option<usize> {
        self.result_limit_or(None)
    }

    /// Result cap with a per-command override.
    ///
    /// `requested` wins over `search.max_results`; either way 0 means
    /// unlimited.
    #[must_use]
    pub fn result_limit_or(&self, requested: Option<usize>) -> Option<usize> {
        match requested.unwrap_or(self.search.max_results) {
            0 => None,
            n => Some(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.catalog.locations_path.is_none());
        assert!(config.catalog.clubs_path.is_none());
        assert_eq!(config.search.max_results, 0);
    }

    #[test]
    fn test_default_map_config() {
        let map = MapConfig::default();

        assert_eq!(map.default_center(), Coordinate::new(-37.7210, 145.0480));
        assert!((map.default_span - 0.02).abs() < f64::EPSILON);
        assert!((map.focus_span - 0.005).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_focus_span() {
        let mut config = Config::default();
        config.map.focus_span = 0.0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("focus_span"));
    }

    #[test]
    fn test_validate_nan_default_span() {
        let mut config = Config::default();
        config.map.default_span = f64::NAN;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("default_span"));
    }

    #[test]
    fn test_validate_bad_centre() {
        let mut config = Config::default();
        config.map.default_latitude = -120.0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("latitude"));
    }

    #[test]
    fn test_validate_negative_padding() {
        let mut config = Config::default();
        config.map.fit_padding = -0.5;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_result_limit() {
        let mut config = Config::default();
        assert_eq!(config.result_limit(), None);

        config.search.max_results = 5;
        assert_eq!(config.result_limit(), Some(5));
    }

    #[test]
    fn test_result_limit_override() {
        let mut config = Config::default();
        config.search.max_results = 5;

        assert_eq!(config.result_limit_or(None), Some(5));
        assert_eq!(config.result_limit_or(Some(2)), Some(2));
        assert_eq!(config.result_limit_or(Some(0)), None);

        config.search.max_results = 0;
        assert_eq!(config.result_limit_or(None), None);
    }

    #[test]
    fn test_catalog_paths() {
        let mut config = Config::default();
        assert!(config.locations_path().is_none());

        config.catalog.clubs_path = Some(PathBuf::from("/srv/clubs.json"));
        assert_eq!(config.clubs_path(), Some(Path::new("/srv/clubs.json")));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("campusdir"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path =
            std::env::temp_dir().join(format!("campusdir-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[map]\nfocus_span = 0.01\n\n[search]\nmax_results = 3\n").unwrap();

        let config = Config::load_from(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!((config.map.focus_span - 0.01).abs() < f64::EPSILON);
        assert_eq!(config.search.max_results, 3);
        assert!((config.map.default_span - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn test_map_config_deserialize() {
        let json = r#"{"focus_span": 0.001}"#;
        let map: MapConfig = serde_json::from_str(json).unwrap();
        assert!((map.focus_span - 0.001).abs() < f64::EPSILON);
        assert!((map.default_span - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("focus_span"));
        assert!(json.contains("locations_path"));
    }
}
