//! Server configuration

use crate::error::McpError;
use alfrd_llm::ollama::{DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES};
use alfrd_tools::{PromptLibrary, ToolsConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Configuration for the MCP server binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Ollama endpoint
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Transport-level retries per LLM call
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Document types offered to the classifier when a call supplies none
    #[serde(default = "default_known_types")]
    pub known_types: BTreeSet<String>,

    /// Tool settings
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Tool prompts
    #[serde(default)]
    pub prompts: PromptLibrary,
}

fn default_ollama_url() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    "llama3.1".to_string()
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_known_types() -> BTreeSet<String> {
    ["bill", "receipt", "bank_statement", "insurance", "tax", "medical", "legal", "other"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ollama_url: default_ollama_url(),
            model: default_model(),
            max_retries: default_max_retries(),
            known_types: default_known_types(),
            tools: ToolsConfig::default(),
            prompts: PromptLibrary::default(),
        }
    }
}

impl ServerConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, McpError> {
        let config: ServerConfig = toml::from_str(toml_str)
            .map_err(|e| McpError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.tools.validate().map_err(McpError::Config)?;
        Ok(config)
    }

    /// Load configuration from a file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, McpError> {
        match path {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|e| {
                    McpError::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                Self::from_toml(&contents)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line or environment overrides
    pub fn with_overrides(mut self, ollama_url: Option<String>, model: Option<String>) -> Self {
        if let Some(url) = ollama_url {
            self.ollama_url = url;
        }
        if let Some(model) = model {
            self.model = model;
        }
        self
    }
}
