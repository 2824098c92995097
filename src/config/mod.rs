// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_IMAGE_QUALITY, DEFAULT_THROTTLE_INTERVAL_MS,
    DEFAULT_TRANSPARENCY_LEVEL, DEFAULT_USER_AGENT, DEFAULT_WORKER_ID,
};
use crate::id::MAX_WORKER_ID;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Environment variable '{0}' is referenced but not set")]
    MissingEnvVar(String),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level settings. Every section is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub http: HttpConfig,
    pub image: ImageConfig,
    pub id: IdConfig,
    pub throttle: ThrottleConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Prefix for `ApiClient` paths; empty means paths are full URLs
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub default_quality: u8,
    pub default_transparency: u8,
    /// Font used by text watermarks when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            default_quality: DEFAULT_IMAGE_QUALITY,
            default_transparency: DEFAULT_TRANSPARENCY_LEVEL,
            font_path: None,
            font_size: 24.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdConfig {
    pub worker_id: u32,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            worker_id: DEFAULT_WORKER_ID,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    pub interval_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_THROTTLE_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human readable format
    pub json: bool,
}

impl Settings {
    /// Parse YAML (or JSON) after replacing `${VAR_NAME}` with environment
    /// variable values.
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, ConfigError> {
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        // First, check that all referenced environment variables exist
        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            if std::env::var(var_name).is_err() {
                return Err(ConfigError::MissingEnvVar(var_name.to_string()));
            }
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        if substituted.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&substituted)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.worker_id > MAX_WORKER_ID {
            return Err(ConfigError::Invalid(format!(
                "id.worker_id {} exceeds maximum {}",
                self.id.worker_id, MAX_WORKER_ID
            )));
        }

        let base_url = &self.http.base_url;
        if !base_url.is_empty()
            && !base_url.starts_with("http://")
            && !base_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid(format!(
                "http.base_url '{}' must start with http:// or https://",
                base_url
            )));
        }

        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "http.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.image.default_quality > 100 {
            return Err(ConfigError::Invalid(format!(
                "image.default_quality {} must be between 0 and 100",
                self.image.default_quality
            )));
        }

        if !(self.image.font_size.is_finite() && self.image.font_size > 0.0) {
            return Err(ConfigError::Invalid(
                "image.font_size must be a positive number".to_string(),
            ));
        }

        Ok(())
    }
}
