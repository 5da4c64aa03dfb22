use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "mysql://root@localhost/crud_db";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Runtime settings for the HTTP server.
///
/// Values come from an optional YAML file and are then overridden by command line flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub cors_origin: Option<String>,
    pub max_upload_bytes: usize,
    /// Create missing tables from the entity definitions at startup.
    pub bootstrap_schema: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            cors_origin: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            bootstrap_schema: false,
        }
    }
}

/// Flag values that take precedence over the config file when present.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub upload_dir: Option<PathBuf>,
    pub cors_origin: Option<String>,
    pub max_upload_bytes: Option<usize>,
    pub bootstrap_schema: bool,
}

impl ServerConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Invalid server configuration")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Loads the file (if any) and applies the overrides on top.
    pub fn load(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(overrides))
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(database_url) = overrides.database_url {
            self.database_url = database_url;
        }
        if let Some(upload_dir) = overrides.upload_dir {
            self.upload_dir = upload_dir;
        }
        if overrides.cors_origin.is_some() {
            self.cors_origin = overrides.cors_origin;
        }
        if let Some(max_upload_bytes) = overrides.max_upload_bytes {
            self.max_upload_bytes = max_upload_bytes;
        }
        if overrides.bootstrap_schema {
            self.bootstrap_schema = true;
        }
        self
    }
}
