use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{seed_catalog, Product};
use crate::shop::Catalog;

pub const CONFIG_PATH_ENV: &str = "SHOPFRONT_CONFIG";

#[derive(Clone, Debug)]
pub struct ShopConfig {
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
    /// Seed products in display order. Empty means the built-in seed catalog.
    pub catalog: Vec<Product>,
}

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Capacity of the request channel in front of the shop service.
    pub buffer_size: usize,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig { buffer_size: 100 },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
            catalog: Vec::new(),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl ShopConfig {
    /// Defaults, then the config file (explicit path or `SHOPFRONT_CONFIG`), then
    /// `SHOPFRONT_*` environment overrides, then validation.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, read_env)
    }

    fn load_with(
        config_path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = config_path
            .map(Path::to_path_buf)
            .or_else(|| lookup(CONFIG_PATH_ENV).map(PathBuf::from));
        if let Some(path) = path {
            config.apply_patch(read_patch(&path)?);
        }

        config.apply_env_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document on top of the defaults. No environment lookups.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let patch: ConfigPatch = toml::from_str(raw).map_err(|source| ConfigError::ParseFile {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        let mut config = Self::default();
        config.apply_patch(patch);
        config.validate()?;
        Ok(config)
    }

    /// Products to start the catalog with.
    pub fn seed_products(&self) -> Vec<Product> {
        if self.catalog.is_empty() {
            seed_catalog()
        } else {
            self.catalog.clone()
        }
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(service) = patch.service {
            if let Some(buffer_size) = service.buffer_size {
                self.service.buffer_size = buffer_size;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }

        if let Some(catalog) = patch.catalog {
            self.catalog = catalog;
        }
    }

    fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup("SHOPFRONT_LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = lookup("SHOPFRONT_LOG_FORMAT") {
            self.logging.format = value.parse()?;
        }
        if let Some(value) = lookup("SHOPFRONT_BUFFER_SIZE") {
            self.service.buffer_size = value.trim().parse().map_err(|_| {
                ConfigError::InvalidEnvOverride { key: "SHOPFRONT_BUFFER_SIZE".to_string(), value }
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.service.buffer_size == 0 {
            return Err(ConfigError::Validation("service.buffer_size must be greater than 0".into()));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation("logging.level must not be empty".into()));
        }

        Catalog::new(self.catalog.clone())
            .map_err(|e| ConfigError::Validation(format!("catalog: {}", e)))?;
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    service: Option<ServicePatch>,
    logging: Option<LoggingPatch>,
    catalog: Option<Vec<Product>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServicePatch {
    buffer_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&raw).map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
