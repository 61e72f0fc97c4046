use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::error::{HirumeshiError, Result};
use crate::core::location::{ConfiguredLocation, DEFAULT_MAP_BASE_URL, DEFAULT_MAP_ZOOM};
use crate::core::store::JsonFileStore;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "HIRUMESHI_DATA_DIR";

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    #[serde(default = "default_map_base_url")]
    pub map_base_url: String,
    #[serde(default = "default_map_zoom")]
    pub map_zoom: u8,
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
    #[serde(default)]
    pub location: ConfiguredLocation,
}

fn default_map_base_url() -> String {
    DEFAULT_MAP_BASE_URL.to_string()
}

fn default_map_zoom() -> u8 {
    DEFAULT_MAP_ZOOM
}

fn default_open_browser() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            map_base_url: default_map_base_url(),
            map_zoom: default_map_zoom(),
            open_browser: default_open_browser(),
            location: ConfiguredLocation::default(),
        }
    }
}

/// `--data-dir`, then `$HIRUMESHI_DATA_DIR`, then the platform config dir.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(default_data_dir)
}

fn default_data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hirumeshi")
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir);

        // Ensure data directory exists
        std::fs::create_dir_all(&data_dir)?;

        let mut config = Self::load_from(&data_dir.join(CONFIG_FILE));
        config.data_dir = data_dir;
        config.repair();
        Ok(config)
    }

    /// Missing or malformed files fall back to defaults.
    fn load_from(path: &Path) -> Config {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Config::default();
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
                return Config::default();
            }
        };

        if content.trim().is_empty() {
            return Config::default();
        }

        match serde_json::from_str::<Config>(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                Config::default()
            }
        }
    }

    /// Invalid map settings fall back to their defaults so commands that
    /// never touch the map keep working.
    fn repair(&mut self) {
        if let Err(e) = check_map_zoom(self.map_zoom) {
            warn!(error = %e, "using default map_zoom");
            self.map_zoom = default_map_zoom();
        }
        if let Err(e) = check_map_base_url(&self.map_base_url) {
            warn!(error = %e, "using default map_base_url");
            self.map_base_url = default_map_base_url();
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    pub fn history_store(&self) -> JsonFileStore {
        JsonFileStore::in_dir(&self.data_dir)
    }

    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(self.config_file(), json)?;
        Ok(())
    }
}

fn check_map_zoom(zoom: u8) -> Result<()> {
    if (1..=21).contains(&zoom) {
        Ok(())
    } else {
        Err(HirumeshiError::Config(format!(
            "map_zoom must be between 1 and 21, got {}",
            zoom
        )))
    }
}

/// The search query is appended as a path segment, so the base must be able
/// to carry a path.
fn check_map_base_url(base: &str) -> Result<()> {
    let url = url::Url::parse(base)
        .map_err(|e| HirumeshiError::Config(format!("map_base_url {:?}: {}", base, e)))?;
    if url.cannot_be_a_base() {
        return Err(HirumeshiError::Config(format!(
            "map_base_url {:?} cannot take a search path",
            base
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(config.data_dir, dir.path());
        assert_eq!(config.map_base_url, DEFAULT_MAP_BASE_URL);
        assert_eq!(config.map_zoom, DEFAULT_MAP_ZOOM);
        assert!(config.open_browser);
        assert!(config.location.latitude.is_none());
    }

    #[test]
    fn test_reads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "map_zoom": 17, "location": { "latitude": 35.68, "longitude": 139.76 } }"#,
        )
        .unwrap();

        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.map_zoom, 17);
        assert!(config.location.enabled);
        assert_eq!(config.location.latitude, Some(35.68));
        assert_eq!(config.map_base_url, DEFAULT_MAP_BASE_URL);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "zoom = 3").unwrap();

        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.map_zoom, DEFAULT_MAP_ZOOM);
    }

    #[test]
    fn test_invalid_zoom_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "map_zoom": 0, "open_browser": false }"#,
        )
        .unwrap();

        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.map_zoom, DEFAULT_MAP_ZOOM);
        assert!(!config.open_browser);
        assert!(matches!(check_map_zoom(0), Err(HirumeshiError::Config(_))));
        assert!(matches!(check_map_zoom(22), Err(HirumeshiError::Config(_))));
        assert!(check_map_zoom(21).is_ok());
    }

    #[test]
    fn test_base_url_without_path_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "map_base_url": "mailto:maps@example.com", "map_zoom": 12 }"#,
        )
        .unwrap();

        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.map_base_url, DEFAULT_MAP_BASE_URL);
        assert_eq!(config.map_zoom, 12);
        assert!(matches!(
            check_map_base_url("mailto:maps@example.com"),
            Err(HirumeshiError::Config(_))
        ));
        assert!(matches!(
            check_map_base_url("not a url"),
            Err(HirumeshiError::Config(_))
        ));
        assert!(check_map_base_url("https://maps.example.com/search").is_ok());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        config.open_browser = false;
        config.save().unwrap();

        let reloaded = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(!reloaded.open_browser);
    }

    #[test]
    fn test_explicit_dir_wins() {
        let dir = PathBuf::from("/tmp/explicit");
        assert_eq!(resolve_data_dir(Some(dir.clone())), dir);
    }
}
