use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, ServiceError};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub deletion: DeletionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// CORS policy; an empty origin list allows any origin
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for DeletionConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_batch_size() -> usize {
    crate::deleter::BATCH_SIZE
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self> {
        // If file doesn't exist, return default config with warning
        if !path.exists() {
            tracing::warn!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ServiceError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ServiceError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;

        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(ServiceError::ConfigError(
                "server.host cannot be empty".to_string(),
            ));
        }

        if self.deletion.batch_size == 0 {
            return Err(ServiceError::ConfigError(
                "deletion.batch_size must be at least 1".to_string(),
            ));
        }
        if self.deletion.batch_size > 1000 {
            return Err(ServiceError::ConfigError(
                "deletion.batch_size cannot exceed 1000 (Gmail batchModify limit)".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert!(config.cors.allowed_origins.is_empty());
        assert_eq!(config.deletion.batch_size, 100);
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_load_missing_file_uses_defaults() {
        let config = Config::load(Path::new("/nonexistent/config.toml"))
            .await
            .unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[tokio::test]
    async fn test_load_partial_file() {
        let toml = r#"
[server]
port = 9090

[cors]
allowed_origins = ["http://localhost:3000"]
"#;
        let temp_file = NamedTempFile::new().unwrap();
        tokio::fs::write(temp_file.path(), toml).await.unwrap();

        let config = Config::load(temp_file.path()).await.unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.cors.allowed_origins.len(), 1);
        assert_eq!(config.deletion.batch_size, 100);
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_batch_size() {
        let toml = r#"
[deletion]
batch_size = 0
"#;
        let temp_file = NamedTempFile::new().unwrap();
        tokio::fs::write(temp_file.path(), toml).await.unwrap();

        let result = Config::load(temp_file.path()).await;
        assert!(matches!(result, Err(ServiceError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_load_rejects_unparseable_file() {
        let temp_file = NamedTempFile::new().unwrap();
        tokio::fs::write(temp_file.path(), "not valid toml {{")
            .await
            .unwrap();

        let result = Config::load(temp_file.path()).await;
        assert!(matches!(result, Err(ServiceError::ConfigError(_))));
    }
}
