//! Configuration
//!
//! Loaded from a TOML file:
//!
//! ```toml
//! [analysis]
//! window_days = 5
//! projection_days = 7
//! higher_than_usual_ratio = 1.35
//!
//! [server]
//! host = "127.0.0.1"
//! port = 5000
//! allowed_origins = ["*"]
//! ```
//!
//! Every key is optional. When no path is given the file is looked up at
//! [`default_config_path`]; a missing default file means built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunables for the analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Length of the trailing window for the five-day analysis, and its
    /// fixed averaging divisor
    pub window_days: u32,
    /// Days a partial week is extrapolated to
    pub projection_days: u32,
    /// A category is flagged when its projection exceeds last week's spend
    /// times this ratio
    pub higher_than_usual_ratio: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            window_days: 5,
            projection_days: 7,
            higher_than_usual_ratio: 1.35,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_days == 0 {
            return Err(Error::InvalidData("window_days must be at least 1".into()));
        }
        if self.projection_days == 0 {
            return Err(Error::InvalidData(
                "projection_days must be at least 1".into(),
            ));
        }
        if !self.higher_than_usual_ratio.is_finite() || self.higher_than_usual_ratio < 0.0 {
            return Err(Error::InvalidData(format!(
                "higher_than_usual_ratio must be a non-negative number, got {}",
                self.higher_than_usual_ratio
            )));
        }
        Ok(())
    }
}

/// HTTP front door settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// `*` allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalyzerConfig,
    pub server: ServerSettings,
}

/// Get the default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("spendwise").join("config.toml"))
}

impl Config {
    /// Load configuration (explicit path first, then the default location)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => Some(fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?),
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => {
                    tracing::debug!(path = %default_path.display(), "Using default config file");
                    Some(fs::read_to_string(&default_path).map_err(|e| {
                        Error::Config(format!(
                            "Failed to read {}: {}",
                            default_path.display(),
                            e
                        ))
                    })?)
                }
                _ => None,
            },
        };

        match content {
            Some(content) => Self::parse(&content),
            None => Ok(Self::default()),
        }
    }

    /// Parse config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Config::default();

        if let Some(analysis) = raw.analysis {
            if let Some(days) = analysis.window_days {
                config.analysis.window_days = days;
            }
            if let Some(days) = analysis.projection_days {
                config.analysis.projection_days = days;
            }
            if let Some(ratio) = analysis.higher_than_usual_ratio {
                config.analysis.higher_than_usual_ratio = ratio;
            }
        }

        if let Some(server) = raw.server {
            if let Some(host) = server.host {
                config.server.host = host;
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
            if let Some(origins) = server.allowed_origins {
                config.server.allowed_origins = origins;
            }
        }

        config.analysis.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    analysis: Option<RawAnalysis>,
    server: Option<RawServer>,
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    window_days: Option<u32>,
    projection_days: Option<u32>,
    higher_than_usual_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
    allowed_origins: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.analysis.window_days, 5);
        assert_eq!(config.analysis.projection_days, 7);
        assert_eq!(config.analysis.higher_than_usual_ratio, 1.35);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::parse(
            r#"
            [analysis]
            higher_than_usual_ratio = 1.5

            [server]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(config.analysis.higher_than_usual_ratio, 1.5);
        assert_eq!(config.analysis.window_days, 5);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Config::parse("[analysis]\nwindow_days = 0"),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            Config::parse("[analysis]\nhigher_than_usual_ratio = -1.0"),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            Config::parse("[analysis\n"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analysis]\nwindow_days = 3").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.analysis.window_days, 3);
    }

    #[test]
    fn test_load_missing_explicit_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
