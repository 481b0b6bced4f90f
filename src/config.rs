use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Address the HTTP server binds to
#[derive(Debug, Clone, Deserialize, Serialize)]
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

/// Hosted chat-completion API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostedConfig {
    /// OpenAI-compatible API endpoint
    #[serde(default = "default_hosted_api_base")]
    pub api_base: String,
    /// Environment variable name containing the API key
    #[serde(default = "default_hosted_env_var")]
    pub env_var_api_key: String,
}

impl Default for HostedConfig {
    fn default() -> Self {
        Self {
            api_base: default_hosted_api_base(),
            env_var_api_key: default_hosted_env_var(),
        }
    }
}

/// Local summarization runtime settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocalConfig {
    /// Base URL of the inference server
    #[serde(default = "default_local_api_base")]
    pub api_base: String,
    /// Environment variable holding an optional bearer token
    #[serde(default = "default_local_env_var")]
    pub env_var_api_key: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            api_base: default_local_api_base(),
            env_var_api_key: default_local_env_var(),
        }
    }
}

/// Model identifiers offered to clients, grouped by provider family
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelsConfig {
    #[serde(default = "default_openai_models")]
    pub openai: Vec<String>,
    #[serde(default = "default_huggingface_models")]
    pub huggingface: Vec<String>,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            openai: default_openai_models(),
            huggingface: default_huggingface_models(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_hosted_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_hosted_env_var() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_local_api_base() -> String {
    "http://localhost:8080".to_string()
}

fn default_local_env_var() -> String {
    "HF_TOKEN".to_string()
}

fn default_openai_models() -> Vec<String> {
    vec!["gpt-3.5-turbo".to_string(), "gpt-4".to_string()]
}

fn default_huggingface_models() -> Vec<String> {
    vec![
        "facebook/bart-large-cnn".to_string(),
        "google/pegasus-xsum".to_string(),
        "mistralai/Mistral-7B-v0.1".to_string(),
    ]
}

/// Root configuration; every table is optional
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub hosted: HostedConfig,
    #[serde(default)]
    pub local: LocalConfig,
    #[serde(default)]
    pub models: ModelsConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }

    /// Load from `path` when given, otherwise fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Address string suitable for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Read a non-empty secret from the environment
pub fn read_env_secret(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}
