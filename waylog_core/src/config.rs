//! Configuration file support for Waylog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/waylog/config.toml`.

use crate::types::Coords;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub form: FormConfig,

    #[serde(default)]
    pub geolocation: GeolocationConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Map view configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
        }
    }
}

/// Form behavior configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormConfig {
    /// How long after a submission before the form can reopen
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

/// Fixed position used when no live geolocation source exists
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct GeolocationConfig {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl GeolocationConfig {
    /// The configured position, if both coordinates are set
    pub fn position(&self) -> Option<Coords> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coords::new(lat, lng)),
            _ => None,
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("waylog")
}

fn default_zoom() -> u8 {
    13
}

fn default_cooldown_ms() -> u64 {
    1000
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("waylog").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.map.zoom, 13);
        assert_eq!(config.form.cooldown_ms, 1000);
        assert_eq!(config.geolocation.position(), None);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.map.zoom, parsed.map.zoom);
        assert_eq!(config.form.cooldown_ms, parsed.form.cooldown_ms);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[map]
zoom = 15

[geolocation]
lat = 51.5
lng = -0.1
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.map.zoom, 15);
        assert_eq!(config.form.cooldown_ms, 1000); // default
        assert_eq!(config.geolocation.position(), Some(Coords::new(51.5, -0.1)));
    }

    #[test]
    fn test_position_requires_both_coordinates() {
        let config: Config = toml::from_str("[geolocation]\nlat = 51.5\n").unwrap();
        assert_eq!(config.geolocation.position(), None);
    }
}
