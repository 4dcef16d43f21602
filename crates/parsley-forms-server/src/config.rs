// File: src/config.rs
// Purpose: Configuration parsing from parsley.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub assets: AssetsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Script locations included in the rendered page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_jquery_url")]
    pub jquery_url: String,

    #[serde(default = "default_parsley_url")]
    pub parsley_url: String,
}

// Default values
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_jquery_url() -> String {
    "https://code.jquery.com/jquery-1.10.2.min.js".to_string()
}

fn default_parsley_url() -> String {
    "https://cdnjs.cloudflare.com/ajax/libs/parsley.js/1.2.2/parsley.min.js".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            jquery_url: default_jquery_url(),
            parsley_url: default_parsley_url(),
        }
    }
}

impl Config {
    /// Read `path` as TOML. An absent or blank file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).with_context(|| format!("Cannot read {}", path.display())),
        };
        match text.trim() {
            "" => Ok(Self::default()),
            _ => toml::from_str(&text).with_context(|| format!("Invalid config in {}", path.display())),
        }
    }

    /// Load configuration from default path (./parsley.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("parsley.toml")
    }

    /// Apply `PARSLEY_HOST` / `PARSLEY_PORT` from the environment
    pub fn apply_env(mut self) -> Result<Self> {
        if let Ok(host) = std::env::var("PARSLEY_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PARSLEY_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid PARSLEY_PORT: {}", port))?;
        }
        Ok(self)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.addr(), "127.0.0.1:5000");
        assert!(config.assets.parsley_url.contains("parsley"));
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config.server.port, 5000);
        assert!(config.assets.jquery_url.contains("jquery"));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [server]
            port = 8080

            [assets]
            parsley_url = "/static/parsley.js"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.assets.parsley_url, "/static/parsley.js");
        assert_eq!(config.assets.jquery_url, default_jquery_url());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load("does/not/exist/parsley.toml").unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let path = std::env::temp_dir().join("parsley-forms-invalid-config.toml");
        fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config in "));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_blank_file_gives_defaults() {
        let path = std::env::temp_dir().join("parsley-forms-blank-config.toml");
        fs::write(&path, "\n   \n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.addr(), "127.0.0.1:5000");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let err = Config::load(std::env::temp_dir()).unwrap_err();
        assert!(err.to_string().starts_with("Cannot read "));
    }
}
