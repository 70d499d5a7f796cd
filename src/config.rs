// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::utils::resolve_path;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub client: ClientSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub address: IpAddr,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_mb: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            upload_dir: PathBuf::from("uploads"),
            max_upload_mb: 10,
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: AppConfig,
    production: AppConfig,
}

impl AppConfig {
    /// Load configuration based on environment.
    ///
    /// `config.yaml` is optional; environment variables win over the file.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path, &environment)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.server.upload_dir = resolve_path(&config.server.upload_dir)?;
        Ok(config)
    }

    pub fn get_environment() -> String {
        std::env::var("RESUME_MATCHER_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml_str(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    /// Apply environment-style overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("ROCKET_PORT") {
            self.server.port = port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;
        }
        if let Some(address) = lookup("RESUME_MATCHER_ADDRESS") {
            self.server.address = address
                .parse()
                .with_context(|| format!("Invalid RESUME_MATCHER_ADDRESS: {}", address))?;
        }
        if let Some(dir) = lookup("RESUME_MATCHER_UPLOAD_DIR") {
            self.server.upload_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup("RESUME_MATCHER_URL") {
            self.client.base_url = url;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
local:
  server:
    port: 8080
    upload_dir: tmp/uploads
production:
  server:
    address: 10.0.0.5
    port: 80
    max_upload_mb: 25
  client:
    base_url: https://matcher.example.com
"#;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.max_upload_mb, 10);
        assert_eq!(config.client.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.client.timeout_seconds, 60);
    }

    #[test]
    fn test_selects_environment_section() {
        let local = AppConfig::from_yaml_str(SAMPLE, "local").unwrap();
        assert_eq!(local.server.port, 8080);
        assert_eq!(local.server.upload_dir, PathBuf::from("tmp/uploads"));
        assert_eq!(local.server.max_upload_mb, 10);

        let production = AppConfig::from_yaml_str(SAMPLE, "production").unwrap();
        assert_eq!(production.server.port, 80);
        assert_eq!(production.server.address.to_string(), "10.0.0.5");
        assert_eq!(production.server.max_upload_mb, 25);
        assert_eq!(production.client.base_url, "https://matcher.example.com");

        let unknown = AppConfig::from_yaml_str(SAMPLE, "staging").unwrap();
        assert_eq!(unknown.server.port, 8080);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ROCKET_PORT", "9000"),
            ("RESUME_MATCHER_URL", "http://analyzer:9000"),
            ("RESUME_MATCHER_UPLOAD_DIR", "/var/uploads"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.client.base_url, "http://analyzer:9000");
        assert_eq!(config.server.upload_dir, PathBuf::from("/var/uploads"));
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|key| {
            (key == "ROCKET_PORT").then(|| "not-a-port".to_string())
        });
        assert!(result.is_err());
    }
}
