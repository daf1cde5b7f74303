//! ALFRD MCP Server
//!
//! Model Context Protocol server exposing the ALFRD document tools to AI
//! clients over stdio.
//!
//! Provides 3 MCP tools:
//! - `classify_document` - Assign a document type or suggest a new one
//! - `summarize_document` - Extract a summary and structured fields
//! - `detect_series` - Group a document into a recurring series
//!
//! # Example
//!
//! ```no_run
//! use alfrd_llm::OllamaProvider;
//! use alfrd_mcp::McpServer;
//! use alfrd_tools::{PromptLibrary, ToolRegistry, ToolsConfig};
//!
//! let llm = OllamaProvider::default_endpoint("llama3.1").unwrap();
//! let registry = ToolRegistry::new(llm, ToolsConfig::default(), PromptLibrary::default());
//! McpServer::new(registry).run().unwrap();
//! ```

#![warn(missing_docs)]

mod config;
mod error;
pub mod protocol;
mod server;

pub use config::ServerConfig;
pub use error::McpError;
pub use server::McpServer;
