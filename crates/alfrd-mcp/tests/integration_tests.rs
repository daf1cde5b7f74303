//! Integration tests for MCP server
//!
//! These tests drive the JSON-RPC handler with a scripted provider and check
//! the protocol envelope, tool dispatch and error codes.

use alfrd_llm::MockProvider;
use alfrd_mcp::McpServer;
use alfrd_tools::{PromptLibrary, ToolRegistry, ToolsConfig};
use serde_json::{json, Value};

fn server(llm: MockProvider) -> McpServer<MockProvider> {
    let registry = ToolRegistry::new(llm, ToolsConfig::default(), PromptLibrary::default())
        .with_known_types(["bill", "receipt"]);
    McpServer::new(registry)
}

fn call(server: &McpServer<MockProvider>, request: Value) -> Value {
    let line = serde_json::to_string(&request).unwrap();
    server.handle_line(&line).expect("request should get a response")
}

#[test]
fn test_protocol_initialize() {
    let server = server(MockProvider::default());
    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
    );

    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["serverInfo"]["name"], "alfrd-mcp");
    assert!(response["result"]["capabilities"]["tools"].is_object());
}

#[test]
fn test_protocol_tools_list() {
    let server = server(MockProvider::default());
    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
    );

    let tools = response["result"]["tools"].as_array().unwrap();
    let names: Vec<_> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["classify_document", "summarize_document", "detect_series"]);
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
}

#[test]
fn test_tool_call_classify() {
    let llm = MockProvider::new(
        r#"{"document_type": "bill", "confidence": 0.93, "reasoning": "Amount due", "tags": ["utility"]}"#,
    );
    let server = server(llm.clone());

    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {
                "name": "classify_document",
                "arguments": {"extracted_text": "PG&E Amount due $120.45", "filename": "pge.pdf"}
            }
        }),
    );

    let structured = &response["result"]["structuredContent"];
    assert_eq!(structured["document_type"], "bill");
    assert_eq!(structured["confidence"], 0.93);

    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("\"document_type\": \"bill\""));
    assert!(llm.last_call().unwrap().user_message.contains("- receipt"));
}

#[test]
fn test_tool_call_summarize_never_errors() {
    let server = server(MockProvider::failing());

    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {
                "name": "summarize_document",
                "arguments": {
                    "extracted_text": "Comcast statement",
                    "filename": "comcast.pdf",
                    "document_type": "bill"
                }
            }
        }),
    );

    assert!(response.get("error").is_none());
    let structured = &response["result"]["structuredContent"];
    assert_eq!(structured["summary"], "Comcast statement");
    assert!(structured["error"].is_string());
}

#[test]
fn test_tool_call_detect_series_failure_is_tool_error() {
    let server = server(MockProvider::new("I could not decide."));

    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 5,
            "method": "tools/call",
            "params": {
                "name": "detect_series",
                "arguments": {"summary": "Bill", "document_type": "bill"}
            }
        }),
    );

    assert_eq!(response["error"]["code"], -32000);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("after 3 attempt(s)"));
}

#[test]
fn test_unknown_tool() {
    let server = server(MockProvider::default());
    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 6,
            "method": "tools/call",
            "params": {"name": "shred_document", "arguments": {}}
        }),
    );

    assert_eq!(response["id"], 6);
    assert_eq!(response["error"]["code"], -32601);
}

#[test]
fn test_invalid_tool_arguments() {
    let server = server(MockProvider::default());
    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": {"name": "classify_document", "arguments": {"filename": "a.pdf"}}
        }),
    );

    assert_eq!(response["error"]["code"], -32602);
}

#[test]
fn test_missing_tool_name() {
    let server = server(MockProvider::default());
    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 8, "method": "tools/call", "params": {}}),
    );

    assert_eq!(response["error"]["code"], -32602);
}

#[test]
fn test_unknown_method() {
    let server = server(MockProvider::default());
    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 9, "method": "resources/list"}),
    );

    assert_eq!(response["error"]["code"], -32601);
}

#[test]
fn test_parse_error() {
    let server = server(MockProvider::default());
    let response = server.handle_line("{not json").unwrap();

    assert_eq!(response["error"]["code"], -32700);
    assert!(response["id"].is_null());
}

#[test]
fn test_notification_gets_no_response() {
    let server = server(MockProvider::default());
    let line = r#"{"jsonrpc": "2.0", "method": "notifications/initialized"}"#;
    assert!(server.handle_line(line).is_none());
}

#[test]
fn test_null_id_is_a_request() {
    let server = server(MockProvider::default());
    let line = r#"{"jsonrpc": "2.0", "id": null, "method": "tools/list"}"#;

    let response = server.handle_line(line).expect("null id still gets a response");
    assert!(response["id"].is_null());
    assert_eq!(response["result"]["tools"].as_array().unwrap().len(), 3);
}

#[test]
fn test_serve_writes_one_line_per_request() {
    let server = server(MockProvider::default());
    let input = [
        r#"{"jsonrpc": "2.0", "id": 1, "method": "initialize"}"#,
        "",
        r#"{"jsonrpc": "2.0", "method": "notifications/initialized"}"#,
        r#"{"jsonrpc": "2.0", "id": 2, "method": "tools/list"}"#,
    ]
    .join("\n");

    let mut output = Vec::new();
    server.serve(input.as_bytes(), &mut output).unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["id"], 1);
    assert_eq!(lines[1]["id"], 2);
}
