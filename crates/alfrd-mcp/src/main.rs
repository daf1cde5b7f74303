//! ALFRD MCP Server - Main entry point

use alfrd_llm::OllamaProvider;
use alfrd_mcp::{McpError, McpServer, ServerConfig};
use alfrd_tools::ToolRegistry;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// ALFRD document tools over the Model Context Protocol (stdio)
#[derive(Parser, Debug)]
#[command(name = "alfrd-mcp", version, about)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long, env = "ALFRD_CONFIG")]
    config: Option<PathBuf>,

    /// Ollama endpoint
    #[arg(long, env = "ALFRD_OLLAMA_URL")]
    ollama_url: Option<String>,

    /// Model name
    #[arg(long, env = "ALFRD_MODEL")]
    model: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // stdout carries JSON-RPC, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = ServerConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(args.ollama_url, args.model);

    let llm = OllamaProvider::new(config.ollama_url.clone(), config.model.clone())
        .map_err(|e| McpError::Provider(e.to_string()))
        .context("Failed to create Ollama provider")?
        .with_max_retries(config.max_retries);
    info!("Using model '{}' at {}", config.model, config.ollama_url);

    let registry = ToolRegistry::new(llm, config.tools, config.prompts)
        .with_known_types(config.known_types);

    McpServer::new(registry).run().context("MCP server error")?;
    Ok(())
}
