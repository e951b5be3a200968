use serde::Deserialize;

use crate::error::{AppError, Result};

/// Conventional variable holding the GitHub credential.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Conventional variable holding the OpenAI credential.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub agent: AgentConfig,
}

#[derive(Debug, Deserialize, Clone)]
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

#[derive(Deserialize, Clone)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_openai_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_url(),
            model: default_model(),
        }
    }
}

// Manual Debug impl to avoid leaking the API key
impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Deserialize, Clone)]
pub struct GitHubConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_github_url")]
    pub api_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_github_url(),
        }
    }
}

// Manual Debug impl to avoid leaking the token
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RelayConfig {
    #[serde(default = "default_relay_model")]
    pub model: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            model: default_relay_model(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AgentConfig {
    /// Model calls allowed per request: one extraction attempt plus one
    /// follow-up after a tool call.
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_openai_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_github_url() -> String {
    "https://api.github.com".to_string()
}

fn default_relay_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_steps() -> u32 {
    2
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::load_layers(config_path)?;
        config.fill_credentials_from_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn load_layers(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("hypha").required(false));
        }

        // Environment variable overrides with HYPHA_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("HYPHA")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Fill credentials that were not configured explicitly from their
    /// conventional environment variables. Empty values count as unset.
    fn fill_credentials_from_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        self.openai.api_key =
            non_empty(self.openai.api_key.take()).or_else(|| non_empty(lookup(OPENAI_API_KEY_VAR)));
        self.github.token =
            non_empty(self.github.token.take()).or_else(|| non_empty(lookup(GITHUB_TOKEN_VAR)));
    }

    /// Names of credential variables that are still unset after loading.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.openai.api_key.is_none() {
            missing.push(OPENAI_API_KEY_VAR);
        }
        if self.github.token.is_none() {
            missing.push(GITHUB_TOKEN_VAR);
        }
        missing
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
