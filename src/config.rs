/// Configuration module for truthverify.
///
/// Handles loading, validating, and providing default configuration values.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// ── Default value functions ──────────────────────────────────────────

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_api_key_env() -> String {
    "API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_progress_interval_ms() -> u64 {
    1800
}

fn default_report_path() -> String {
    "./truthverify-report.html".to_string()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_lookup_url() -> String {
    "http://ip-api.com/json".to_string()
}

/// Environment variable consulted when the configured one is unset.
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

const DEFAULT_CONFIG_FILE: &str = "config.json";

// ── Config structs ───────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,

    #[serde(default = "default_report_path")]
    pub report_path: String,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default)]
    pub geo: GeoConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeoConfig {
    /// Resolve a location before every request.
    #[serde(default)]
    pub enabled: bool,

    /// Fixed coordinates. When both are set they take precedence over the
    /// IP lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,
}

// ── Default impls ────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
            progress_interval_ms: default_progress_interval_ms(),
            report_path: default_report_path(),
            listen_addr: default_listen_addr(),
            geo: GeoConfig::default(),
        }
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            latitude: None,
            longitude: None,
            lookup_url: default_lookup_url(),
        }
    }
}

// ── Config implementation ────────────────────────────────────────────

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// If `config_path` is empty, looks for `config.json` in the working
    /// directory, then in the user config directory. If no file exists,
    /// returns a default config and generates a template for the default path.
    pub fn load(config_path: &str) -> Result<Self> {
        let path = if config_path.is_empty() {
            default_config_path()
        } else {
            PathBuf::from(config_path)
        };

        if !path.exists() {
            info!("{} not found, using defaults", path.display());
            let cfg = Self::default();

            // Generate template only for the default path
            if config_path.is_empty() && path == Path::new(DEFAULT_CONFIG_FILE) {
                match cfg.save(&path) {
                    Ok(()) => info!("Generated config template: {}", path.display()),
                    Err(e) => warn!("Failed to generate config template: {e}"),
                }
            }

            return Ok(cfg);
        }

        let data = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        let cfg: Config = match serde_json::from_str(&data) {
            Ok(c) => c,
            Err(e) => {
                warn!("Invalid JSON in {}: {e}", path.display());
                warn!("Using default configuration");
                return Ok(Self::default());
            }
        };

        info!("Loaded configuration from {}", path.display());
        Ok(cfg)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("failed to marshal config")?;
        std::fs::write(path, data)
            .with_context(|| format!("failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.model.trim().is_empty(), "model must be set");
        anyhow::ensure!(
            self.api_base.starts_with("http://") || self.api_base.starts_with("https://"),
            "api_base must be an http(s) URL"
        );
        anyhow::ensure!(!self.api_key_env.is_empty(), "api_key_env must be set");
        anyhow::ensure!(
            (0.0..=2.0).contains(&self.temperature),
            "temperature must be within 0.0..=2.0"
        );
        anyhow::ensure!(
            self.request_timeout_secs > 0,
            "request_timeout_secs must be positive"
        );
        anyhow::ensure!(
            self.progress_interval_ms > 0,
            "progress_interval_ms must be positive"
        );
        anyhow::ensure!(
            self.geo.latitude.is_some() == self.geo.longitude.is_some(),
            "geo.latitude and geo.longitude must be set together"
        );
        Ok(())
    }

    /// Read the API key from the configured environment variable, falling
    /// back to [`FALLBACK_API_KEY_ENV`].
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        [self.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .into_iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|v| !v.trim().is_empty())
    }

    /// Fixed coordinates from the config, if both are set.
    #[must_use]
    pub fn fixed_location(&self) -> Option<(f64, f64)> {
        self.geo.latitude.zip(self.geo.longitude)
    }
}

/// `config.json` in the working directory, or the copy under the user
/// config directory when only that one exists.
fn default_config_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|d| d.join("truthverify").join(DEFAULT_CONFIG_FILE))
        .filter(|p| p.exists())
        .unwrap_or(local)
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.api_key_env, "API_KEY");
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.progress_interval_ms, 1800);
        assert!(!config.geo.enabled);
        assert!(config.fixed_location().is_none());
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{"model": "gemini-2.5-pro", "geo": {"enabled": true}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert!(config.geo.enabled);
        // Other fields should have defaults
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.geo.lookup_url, "http://ip-api.com/json");
    }

    #[test]
    fn test_validate_ok() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_interval() {
        let mut config = Config::default();
        config.progress_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_half_location() {
        let mut config = Config::default();
        config.geo.latitude = Some(48.85);
        assert!(config.validate().is_err());

        config.geo.longitude = Some(2.35);
        assert!(config.validate().is_ok());
        assert_eq!(config.fixed_location(), Some((48.85, 2.35)));
    }

    #[test]
    fn test_validate_bad_api_base() {
        let mut config = Config::default();
        config.api_base = "generativelanguage.googleapis.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_explicit_path_returns_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nope.json");
        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        // No template is written for explicit paths
        assert!(!path.exists());
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:8787");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");

        let mut config = Config::default();
        config.model = "gemini-2.5-pro".to_string();
        config.geo.latitude = Some(40.7);
        config.geo.longitude = Some(-74.0);
        config.save(&path).unwrap();

        let loaded = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.model, "gemini-2.5-pro");
        assert_eq!(loaded.fixed_location(), Some((40.7, -74.0)));
    }
}
