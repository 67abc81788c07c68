//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/smog-radar/config.toml
//!
//! Only the binary reads this file. The resolver receives API keys and
//! endpoints through its constructor (see [`Config::build_resolver`]).

pub mod defaults;

use crate::constants::api::{GOOGLE_GEOCODE_URL, USER_AGENT, WAQI_URL};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::google::GoogleBackend;
use crate::resolve::interpret::Locale;
use crate::resolve::AirQualityResolver;
use crate::station::waqi::WaqiSource;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Resolver wired to the live providers
pub type LiveResolver = AirQualityResolver<GoogleBackend, WaqiSource>;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default values for lookups
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Provider endpoints
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Map URL settings
    #[serde(default)]
    pub url: UrlConfig,

    /// API keys for the providers
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Default values for lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Language of labels and descriptions
    #[serde(default = "default_locale")]
    pub locale: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Provider endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Google Geocoding API endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// WAQI API base URL
    #[serde(default = "default_air_quality_url")]
    pub air_quality_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Map URL settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default map provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// Map URL templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// Google Geocoding API key
    #[serde(default)]
    pub google: String,

    /// aqicn.org API token
    #[serde(default)]
    pub waqi: String,
}

// Default value functions for serde
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_geocoding_url() -> String {
    GOOGLE_GEOCODE_URL.to_string()
}
fn default_air_quality_url() -> String {
    WAQI_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},{zoom}z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map={zoom}/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "aqicn".to_string(),
        "https://aqicn.org/map/world/#@g/{lat}/{lng}/{zoom}z".to_string(),
    );
    providers
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            locale: default_locale(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            air_quality_url: default_air_quality_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => Some(self.defaults.format.clone()),
            ["defaults", "locale"] => Some(self.defaults.locale.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["providers", "geocoding_url"] => Some(self.providers.geocoding_url.clone()),
            ["providers", "air_quality_url"] => Some(self.providers.air_quality_url.clone()),
            ["providers", "timeout_secs"] => Some(self.providers.timeout_secs.to_string()),

            ["url", "default"] => Some(self.url.default.clone()),

            ["api_keys", "google"] => Some(self.api_keys.google.clone()),
            ["api_keys", "waqi"] => Some(self.api_keys.waqi.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }
            ["defaults", "locale"] => {
                Locale::from_str(value).map_err(Error::Config)?;
                self.defaults.locale = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["providers", "geocoding_url"] => {
                self.providers.geocoding_url = value.to_string();
            }
            ["providers", "air_quality_url"] => {
                self.providers.air_quality_url = value.to_string();
            }
            ["providers", "timeout_secs"] => {
                self.providers.timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }

            ["api_keys", "google"] => {
                self.api_keys.google = value.to_string();
            }
            ["api_keys", "waqi"] => {
                self.api_keys.waqi = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.format",
            "defaults.locale",
            "server.host",
            "server.port",
            "providers.geocoding_url",
            "providers.air_quality_url",
            "providers.timeout_secs",
            "url.default",
            "api_keys.google",
            "api_keys.waqi",
        ]
    }

    /// Configured locale
    pub fn locale(&self) -> Result<Locale> {
        Locale::from_str(&self.defaults.locale).map_err(Error::Config)
    }

    /// Format a map URL using the specified provider
    ///
    /// Replaces {lat}, {lng} and {zoom} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, center: Coordinates, zoom: u8) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &center.lat.to_string())
            .replace("{lng}", &center.lng.to_string())
            .replace("{zoom}", &zoom.to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Build a resolver talking to the configured providers
    ///
    /// Both API keys must be set.
    pub fn build_resolver(&self, locale: Locale) -> Result<LiveResolver> {
        if self.api_keys.google.is_empty() {
            return Err(Error::Config(
                "No Google API key configured. Hint: run `smog-radar config api_keys.google <KEY>`"
                    .to_string(),
            ));
        }
        if self.api_keys.waqi.is_empty() {
            return Err(Error::Config(
                "No aqicn.org token configured. Hint: run `smog-radar config api_keys.waqi <TOKEN>`"
                    .to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(self.providers.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        let geocoder = GoogleBackend::new(client.clone(), &self.api_keys.google)
            .with_base_url(&self.providers.geocoding_url);
        let stations = WaqiSource::new(client, &self.api_keys.waqi)
            .with_base_url(&self.providers.air_quality_url);

        Ok(AirQualityResolver::new(geocoder, stations, locale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    fn configured() -> Config {
        let mut config = Config::default();
        config.api_keys.google = "GOOGLE".to_string();
        config.api_keys.waqi = "WAQI".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.defaults.format, "text");
        assert_eq!(config.defaults.locale, "pl");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.providers.timeout_secs, 10);
        assert!(config.api_keys.google.is_empty());
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("defaults.locale"), Some("pl".to_string()));

        config.set("defaults.locale", "en").unwrap();
        assert_eq!(config.get("defaults.locale"), Some("en".to_string()));
        assert_eq!(config.locale().unwrap(), Locale::En);

        config.set("api_keys.waqi", "token").unwrap();
        assert_eq!(config.get("api_keys.waqi"), Some("token".to_string()));

        config.set("server.port", "8080").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("server.port", "not_a_number").is_err());
        assert!(config.set("providers.timeout_secs", "-1").is_err());
        assert!(config.set("defaults.locale", "klingon").is_err());
        assert_eq!(config.defaults.locale, "pl");
    }

    #[test]
    fn test_format_url() {
        let config = Config::default();
        let center = Coordinates::new(52.2297, 21.0122);

        let url = config.format_url(Some("google"), center, 13).unwrap();
        assert_eq!(url, "https://www.google.com/maps/@52.2297,21.0122,13z");

        let url = config.format_url(Some("openstreetmap"), center, 15).unwrap();
        assert_eq!(url, "https://www.openstreetmap.org/#map=15/52.2297/21.0122");
    }

    #[test]
    fn test_format_url_default_provider() {
        let config = Config::default();
        let url = config
            .format_url(None, Coordinates::new(52.2297, 21.0122), 14)
            .unwrap();
        assert!(url.contains("openstreetmap.org"));
    }

    #[test]
    fn test_format_url_unknown_provider() {
        let config = Config::default();
        let result = config.format_url(Some("unknown"), Coordinates::new(0.0, 0.0), 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.defaults.locale = "en".to_string();
            config.api_keys.google = "abc".to_string();
            config.save().unwrap();

            let loaded = Config::load().unwrap();
            assert_eq!(loaded.defaults.locale, "en");
            assert_eq!(loaded.api_keys.google, "abc");
        });
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[api_keys]\nwaqi = \"t\"\n").unwrap();
        assert_eq!(loaded.api_keys.waqi, "t");
        assert_eq!(loaded.server.port, 5000);
        assert_eq!(loaded.providers.air_quality_url, "https://api.waqi.info");
    }

    #[test]
    fn test_serialization_format() {
        let toml = toml::to_string_pretty(&Config::default()).unwrap();

        assert!(toml.contains("[defaults]"));
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[providers]"));
        assert!(toml.contains("[url.providers]"));
        assert!(toml.contains("[api_keys]"));
    }

    #[test]
    fn test_server_addr() {
        assert_eq!(Config::default().server_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn test_available_keys_are_readable() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "key {} not readable", key);
        }
    }

    #[test]
    fn test_build_resolver_requires_keys() {
        let err = Config::default().build_resolver(Locale::Pl).err().unwrap();
        assert!(err.to_string().contains("api_keys.google"));

        let mut config = Config::default();
        config.api_keys.google = "GOOGLE".to_string();
        let err = config.build_resolver(Locale::Pl).err().unwrap();
        assert!(err.to_string().contains("api_keys.waqi"));
    }

    #[test]
    fn test_build_resolver() {
        let resolver = configured().build_resolver(Locale::En).unwrap();
        assert_eq!(resolver.locale(), Locale::En);
    }
}
