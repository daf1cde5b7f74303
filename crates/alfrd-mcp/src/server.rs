//! MCP server implementation

use alfrd_domain::LlmProvider;
use alfrd_tools::ToolRegistry;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt::Display;
use std::io::{BufRead, BufReader, Write};
use tracing::{debug, error, info, warn};

use crate::error::McpError;
use crate::protocol::*;

/// MCP Server
///
/// Handles Model Context Protocol requests via stdio transport, dispatching
/// tool calls to a [`ToolRegistry`].
pub struct McpServer<L>
where
    L: LlmProvider,
{
    registry: ToolRegistry<L>,
}

impl<L> McpServer<L>
where
    L: LlmProvider + Send + Sync,
    L::Error: Display,
{
    /// Create a new MCP server
    pub fn new(registry: ToolRegistry<L>) -> Self {
        Self { registry }
    }

    /// Run the MCP server (stdio transport)
    ///
    /// Reads JSON-RPC requests from stdin and writes responses to stdout.
    pub fn run(&self) -> Result<(), McpError> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.serve(BufReader::new(stdin.lock()), stdout.lock())
    }

    /// Serve newline-delimited JSON-RPC until the reader is exhausted
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<(), McpError> {
        info!("MCP server started");

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            debug!("Received request: {}", line);

            if let Some(response) = self.handle_line(&line) {
                write_response(&mut writer, &response)?;
            }
        }

        info!("MCP server stopped");
        Ok(())
    }

    /// Handle one raw request line
    ///
    /// Returns `None` for notifications, which get no response.
    pub fn handle_line(&self, line: &str) -> Option<Value> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                let err = McpError::Json(e);
                return Some(encode(&JsonRpcError::new(
                    None,
                    err.error_code(),
                    format!("Parse error: {}", err),
                )));
            }
        };

        self.handle_request(request)
    }

    /// Handle a parsed JSON-RPC request
    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<Value> {
        let id = request.id.clone();

        if request.jsonrpc != "2.0" {
            let err = McpError::InvalidRequest(format!(
                "Unsupported jsonrpc version '{}'",
                request.jsonrpc
            ));
            return Some(error_response(id, &err));
        }

        if id.is_none() {
            debug!("Notification: {}", request.method);
            return None;
        }

        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(),
            "ping" => Ok(json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tool_call(request.params),
            other => Err(McpError::MethodNotFound(other.to_string())),
        };

        Some(match result {
            Ok(value) => encode(&JsonRpcResponse::new(id, value)),
            Err(e) => {
                warn!("Request '{}' failed: {}", request.method, e);
                error_response(id, &e)
            }
        })
    }

    /// Handle initialize request
    fn handle_initialize(&self) -> Result<Value, McpError> {
        let response = InitializeResponse {
            protocol_version: PROTOCOL_VERSION.to_string(),
            server_info: ServerInfo {
                name: "alfrd-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: Capabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
        };
        Ok(serde_json::to_value(response)?)
    }

    /// Handle tools/list request
    fn handle_tools_list(&self) -> Result<Value, McpError> {
        let response = ToolListResponse {
            tools: self.registry.definitions(),
        };
        Ok(serde_json::to_value(response)?)
    }

    /// Handle tools/call request
    fn handle_tool_call(&self, params: Value) -> Result<Value, McpError> {
        let params: ToolCallParams = serde_json::from_value(params)
            .map_err(|e| McpError::InvalidParams(format!("Malformed tools/call params: {}", e)))?;
        let arguments = params.arguments.unwrap_or_else(|| json!({}));

        info!("Tool call: {}", params.name);
        let output = self.registry.call(&params.name, arguments)?;
        Ok(serde_json::to_value(ToolCallResult::from_value(output)?)?)
    }
}

fn error_response(id: Option<Value>, err: &McpError) -> Value {
    encode(&JsonRpcError::new(id, err.error_code(), err.to_string()))
}

fn encode<T: Serialize>(response: &T) -> Value {
    serde_json::to_value(response).unwrap_or_else(|e| {
        error!("Failed to encode response: {}", e);
        json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": {"code": -32603, "message": format!("Internal error: {}", e)}
        })
    })
}

/// Write response as a single line
fn write_response<W: Write>(writer: &mut W, response: &Value) -> Result<(), McpError> {
    let response_str = serde_json::to_string(response)?;
    writeln!(writer, "{}", response_str)?;
    writer.flush()?;
    debug!("Sent response: {}", response_str);
    Ok(())
}
