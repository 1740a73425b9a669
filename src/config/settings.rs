//! Application settings configuration
//!
//! Defines connection timeouts, chain walk limits and root bundle locations.

use crate::utils::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of the curated root CA bundle
pub const DEFAULT_BUNDLE_URL: &str = "https://curl.se/ca/cacert.pem";

/// Default file name of the root CA bundle in the working directory
pub const DEFAULT_BUNDLE_PATH: &str = "cacert.pem";

/// TCP/TLS connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectSettings {
    #[serde(default = "default_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_timeout")]
    pub handshake_timeout_secs: u64,
}

fn default_timeout() -> u64 {
    10
}

impl Default for ConnectSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_timeout(),
            handshake_timeout_secs: default_timeout(),
        }
    }
}

impl ConnectSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_secs(self.handshake_timeout_secs)
    }
}

/// Chain walk settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChainSettings {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_timeout")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_bundle_path")]
    pub bundle_path: PathBuf,
    #[serde(default = "default_bundle_url")]
    pub bundle_url: String,
    /// Treat a leaf without AIA as a sign of TLS interception
    #[serde(default)]
    pub require_leaf_aia: bool,
}

fn default_max_depth() -> usize {
    4
}

fn default_bundle_path() -> PathBuf {
    PathBuf::from(DEFAULT_BUNDLE_PATH)
}

fn default_bundle_url() -> String {
    DEFAULT_BUNDLE_URL.to_string()
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            fetch_timeout_secs: default_timeout(),
            bundle_path: default_bundle_path(),
            bundle_url: default_bundle_url(),
            require_leaf_aia: false,
        }
    }
}

impl ChainSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub connect: ConnectSettings,
    #[serde(default)]
    pub chain: ChainSettings,
}

impl Settings {
    /// Load settings from the default config file
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new("config/default.toml");
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.chain.bundle_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "chain.bundle_url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.connect.connect_timeout_secs == 0 || self.connect.handshake_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "connect".to_string(),
                message: "timeouts must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.chain.max_depth, 4);
        assert_eq!(settings.chain.bundle_path, PathBuf::from("cacert.pem"));
        assert_eq!(settings.chain.bundle_url, DEFAULT_BUNDLE_URL);
        assert!(!settings.chain.require_leaf_aia);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml("[chain]\nmax_depth = 6\n").unwrap();
        assert_eq!(settings.chain.max_depth, 6);
        assert_eq!(settings.chain.fetch_timeout_secs, 10);
        assert_eq!(settings.connect.connect_timeout_secs, 10);
    }

    #[test]
    fn test_partial_connect_section_keeps_other_timeout() {
        let settings = Settings::from_toml("[connect]\nconnect_timeout_secs = 3\n").unwrap();
        assert_eq!(settings.connect.connect_timeout_secs, 3);
        assert_eq!(settings.connect.handshake_timeout_secs, 10);
        assert_eq!(settings.chain.max_depth, 4);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let toml = "[connect]\nconnect_timeout_secs = 0\nhandshake_timeout_secs = 5\n";
        assert!(matches!(
            Settings::from_toml(toml),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
