use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

pub mod defaults;

use defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum request body size in bytes, uploads included
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON document per collection
    #[serde(default = "default_files_path")]
    pub files_path: PathBuf,
    /// Directory served as static files under `/api/public`
    #[serde(default = "default_public_path")]
    pub public_path: PathBuf,
    /// Directory holding product thumbnails
    #[serde(default = "default_images_path")]
    pub images_path: PathBuf,
}

// Web defaults
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_upload_size() -> usize {
    DEFAULT_MAX_UPLOAD_SIZE
}

// Storage defaults
fn default_files_path() -> PathBuf {
    PathBuf::from(DEFAULT_FILES_PATH)
}

fn default_public_path() -> PathBuf {
    PathBuf::from(DEFAULT_PUBLIC_PATH)
}

fn default_images_path() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGES_PATH)
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            files_path: default_files_path(),
            public_path: default_public_path(),
            images_path: default_images_path(),
        }
    }
}

impl Config {
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [web]
            port = 9090

            [storage]
            images_path = "/srv/shop/images"
            "#,
        )
        .unwrap();

        assert_eq!(config.web.host, DEFAULT_HOST);
        assert_eq!(config.web.port, 9090);
        assert_eq!(config.web.max_upload_size, DEFAULT_MAX_UPLOAD_SIZE);
        assert_eq!(config.storage.files_path, PathBuf::from(DEFAULT_FILES_PATH));
        assert_eq!(config.storage.images_path, PathBuf::from("/srv/shop/images"));
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.web.port, DEFAULT_PORT);
        assert_eq!(config.storage.public_path, PathBuf::from(DEFAULT_PUBLIC_PATH));
    }

    #[test]
    fn test_load_from_file_writes_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        let path_str = path.to_str().unwrap();

        let config = Config::load_from_file(path_str).unwrap();
        assert_eq!(config.web.port, DEFAULT_PORT);
        assert!(path.exists());

        // Second load reads the file it just wrote
        let reloaded = Config::load_from_file(path_str).unwrap();
        assert_eq!(reloaded.storage.files_path, config.storage.files_path);
    }
}
