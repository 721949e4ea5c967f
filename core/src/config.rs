//! Configuration Management Module
//!
//! Layered configuration built once at start-up:
//! defaults → optional TOML file → `SUPPORTDESK__*` environment →
//! `GEMINI_API_KEY`. The result is immutable for the life of the process.

use crate::error::ConfigError;
use crate::llm::adapters::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::llm::adapters::transport_reqwest::DEFAULT_TIMEOUT_MS;
use crate::llm::types::{ApiKey, GenerationOptions};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Environment prefix for layered settings
pub const ENV_PREFIX: &str = "SUPPORTDESK";

/// Secret name carried over from the hosted handler
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_NAME: &str = "supportdesk";

/// Gemini call settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// API root
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Sampling temperature sent as `generationConfig.temperature`
    pub temperature: Option<f32>,
    /// Output cap sent as `generationConfig.maxOutputTokens`
    pub max_output_tokens: Option<u32>,
    /// Outbound request timeout
    pub timeout_ms: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(0.7),
            max_output_tokens: Some(500),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl GeminiSettings {
    pub fn generation(&self) -> Option<GenerationOptions> {
        GenerationOptions::from_parts(self.temperature, self.max_output_tokens)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// CORS origins; empty allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    api_key: Option<String>,
    gemini: GeminiSettings,
    server: ServerSettings,
}

/// Process-wide configuration
#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    /// Gemini credential; `None` leaves the server up but answering 500
    pub api_key: Option<ApiKey>,
    pub gemini: GeminiSettings,
    pub server: ServerSettings,
}

impl ProxyConfig {
    /// Load from an optional file plus the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_from(path, env)
    }

    /// Load from an optional file plus an explicit environment map
    pub fn load_from(
        path: Option<&Path>,
        env: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                File::from(path).required(true)
            }
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let gemini_key = env.get(API_KEY_ENV).cloned();
        let source: config::Map<String, String> = env.clone().into_iter().collect();

        let raw: RawConfig = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .source(Some(source)),
            )
            .set_override_option("api_key", gemini_key.filter(|k| !k.trim().is_empty()))?
            .build()?
            .try_deserialize()?;

        let api_key = raw
            .api_key
            .map(|value| resolve_env_var(&value, &env))
            .and_then(ApiKey::new);

        if api_key.is_none() {
            warn!("No Gemini API key configured; chat requests will be rejected");
        }

        let config = Self {
            api_key,
            gemini: raw.gemini,
            server: raw.server,
        };
        config.validate()?;

        debug!(
            model = %config.gemini.model,
            timeout_ms = config.gemini.timeout_ms,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Reject settings that would make every request fail in a confusing way
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("gemini.base_url is empty".to_string()));
        }
        if self.gemini.model.trim().is_empty() {
            return Err(ConfigError::Invalid("gemini.model is empty".to_string()));
        }
        if self.gemini.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "gemini.timeout_ms must be greater than zero".to_string(),
            ));
        }
        if let Some(t) = self.gemini.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ConfigError::Invalid(format!(
                    "gemini.temperature {} is outside 0.0..=2.0",
                    t
                )));
            }
        }
        Ok(())
    }
}

/// Resolve environment variable reference
///
/// If value starts with "env:", read from `env`; an unset reference resolves
/// to an empty string (treated as no key). Otherwise return value as-is.
fn resolve_env_var(value: &str, env: &HashMap<String, String>) -> String {
    match value.strip_prefix("env:") {
        Some(name) => env.get(name).cloned().unwrap_or_default(),
        None => value.to_string(),
    }
}
