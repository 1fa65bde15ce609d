//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding an alternative configuration file path
pub const CONFIG_PATH_ENV: &str = "CREATIVE_BANANA_CONFIG";

/// Plain credential variable accepted when the prefixed one is absent
pub const API_KEY_ENV: &str = "API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub studio: StudioConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Remote model configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            text_model: default_text_model(),
            image_model: default_image_model(),
        }
    }
}

// The credential never reaches logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .finish()
    }
}

/// Studio session behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StudioConfig {
    /// Quiet period before a prompt request is sent
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Largest accepted upload body
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl StudioConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Settings {
    /// Load settings from configuration files and environment variables
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .unwrap_or_else(|_| "config/default.toml".to_string());
        Self::load_from_path(path)
    }

    /// Load settings from a specific configuration file path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("gemini.base_url", default_base_url())?
            .set_default("gemini.text_model", default_text_model())?
            .set_default("gemini.image_model", default_image_model())?
            .set_default("studio.debounce_ms", default_debounce_ms() as i64)?
            .set_default("studio.max_upload_bytes", default_max_upload_bytes() as i64)?
            // Load from configuration file
            .add_source(
                File::with_name(path.as_ref().to_str().unwrap_or("config/default")).required(false),
            )
            // Override with environment variables (prefixed with CREATIVE_BANANA__)
            .add_source(
                Environment::with_prefix("CREATIVE_BANANA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;
        if settings.gemini.api_key.is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                settings.gemini.api_key = key;
            }
        }
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Server port cannot be 0".to_string(),
            )));
        }

        if self.gemini.api_key.trim().is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(format!(
                "API key is not set (use {} or CREATIVE_BANANA__GEMINI__API_KEY)",
                API_KEY_ENV
            ))));
        }

        for (name, model) in [
            ("text_model", &self.gemini.text_model),
            ("image_model", &self.gemini.image_model),
        ] {
            if model.trim().is_empty() {
                return Err(AppError::Config(config::ConfigError::Message(format!(
                    "gemini.{} cannot be empty",
                    name
                ))));
            }
        }

        if self.studio.debounce_ms == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "studio.debounce_ms must be greater than 0".to_string(),
            )));
        }

        Ok(())
    }
}
