//! Configuration management for Kaiwa
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{KaiwaError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Kaiwa
///
/// This structure holds all configuration needed by the client,
/// including provider settings, chat behavior, the completion endpoint
/// server, and history storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Chat behavior configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Completion endpoint server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// History storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            chat: ChatConfig::default(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

/// Provider configuration
///
/// Specifies which completion provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// OpenAI-compatible provider configuration
    #[serde(default)]
    pub openai: OpenAiConfig,
}

fn default_provider_type() -> String {
    "openai".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            openai: OpenAiConfig::default(),
        }
    }
}

/// OpenAI-compatible provider configuration
///
/// The model identifier and sampling parameters are fixed per deployment;
/// every completion request carries the same values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Model to request completions from
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// API base URL (useful for tests and compatible local servers)
    #[serde(default = "default_openai_api_base")]
    pub api_base: String,

    /// Environment variable holding the API credential
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Response length cap in tokens; `null` takes the provider default
    #[serde(default = "default_max_tokens")]
    pub max_tokens: Option<u32>,
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> Option<u32> {
    Some(1000)
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: default_openai_model(),
            api_base: default_openai_api_base(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Chat behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChatConfig {
    /// Optional system preamble prepended to every completion request
    ///
    /// A persona directive that constrains response style. Absent by
    /// default; when set it is sent as a leading system-role message.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// Completion endpoint server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the completion endpoint to
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// History storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Path to the history database; defaults to the user data directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| KaiwaError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| KaiwaError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("KAIWA_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(model) = std::env::var("KAIWA_OPENAI_MODEL") {
            self.provider.openai.model = model;
        }

        if let Ok(api_base) = std::env::var("KAIWA_OPENAI_API_BASE") {
            self.provider.openai.api_base = api_base;
        }

        if let Ok(bind) = std::env::var("KAIWA_SERVER_BIND") {
            self.server.bind = bind;
        }

        if let Ok(system_prompt) = std::env::var("KAIWA_SYSTEM_PROMPT") {
            self.chat.system_prompt = Some(system_prompt);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(path) = &cli.storage_path {
            self.storage.path = Some(PathBuf::from(path));
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `KaiwaError::Config` when a setting is out of range or the
    /// provider type is unknown
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type != "openai" {
            return Err(KaiwaError::Config(format!(
                "Unknown provider type: {}",
                self.provider.provider_type
            ))
            .into());
        }

        let temperature = self.provider.openai.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(KaiwaError::Config(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                temperature
            ))
            .into());
        }

        if self.provider.openai.max_tokens == Some(0) {
            return Err(
                KaiwaError::Config("max_tokens must be greater than zero".to_string()).into(),
            );
        }

        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(KaiwaError::Config(format!(
                "Invalid server bind address: {}",
                self.server.bind
            ))
            .into());
        }

        Ok(())
    }
}
