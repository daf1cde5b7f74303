//! Error types for MCP server operations.

use alfrd_tools::ToolError;
use thiserror::Error;

/// MCP server error types
#[derive(Error, Debug)]
pub enum McpError {
    /// Invalid request format
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or malformed parameters
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Unknown JSON-RPC method
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Document tool error
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// LLM provider setup error
    #[error("Provider error: {0}")]
    Provider(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl McpError {
    /// Convert to JSON-RPC error code
    pub fn error_code(&self) -> i32 {
        match self {
            McpError::InvalidRequest(_) => -32600,
            McpError::InvalidParams(_) => -32602,
            McpError::MethodNotFound(_) => -32601,
            McpError::Tool(ToolError::UnknownTool(_)) => -32601,
            McpError::Tool(ToolError::InvalidParams(_)) => -32602,
            McpError::Tool(_) => -32000,
            McpError::Json(_) => -32700,
            McpError::Config(_) | McpError::Provider(_) | McpError::Io(_) => -32000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_codes() {
        let unknown = McpError::from(ToolError::UnknownTool("x".to_string()));
        let params = McpError::from(ToolError::InvalidParams("missing filename".to_string()));
        let failed = McpError::from(ToolError::Invocation("timeout".to_string()));

        assert_eq!(unknown.error_code(), -32601);
        assert_eq!(params.error_code(), -32602);
        assert_eq!(failed.error_code(), -32000);
    }

    #[test]
    fn test_setup_errors_are_server_errors() {
        let provider = McpError::Provider("invalid endpoint".to_string());
        assert_eq!(provider.error_code(), -32000);
        assert_eq!(provider.to_string(), "Provider error: invalid endpoint");
    }

    #[test]
    fn test_tool_error_message_is_transparent() {
        let err = McpError::from(ToolError::UnknownTool("x".to_string()));
        assert_eq!(err.to_string(), "Unknown tool: x");
    }
}
