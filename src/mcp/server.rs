use super::jsonrpc::{json_rpc_error, json_rpc_response, parse_request, JsonRpcRequest, INVALID_PARAMS, METHOD_NOT_FOUND};
use super::tools::{tool_definitions, ToolServer};
use anyhow::Result;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub const SERVER_NAME: &str = "cainban";
pub const MCP_VERSION: &str = "2024-11-05";

pub struct McpServer {
    initialized: bool,
    tools: ToolServer,
}

impl McpServer {
    pub fn new(tools: ToolServer) -> Self {
        Self { initialized: false, tools }
    }

    pub fn tools(&self) -> &ToolServer {
        &self.tools
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Handles one raw input line. `None` means nothing is written back.
    pub fn handle_line(&mut self, line: &str) -> Option<Value> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match parse_request(line) {
            Ok(request) => self.handle(request),
            Err(response) => {
                tracing::warn!(error = %response["error"]["message"], "rejected frame");
                Some(response)
            }
        }
    }

    pub fn handle(&mut self, request: JsonRpcRequest) -> Option<Value> {
        let expects_response = request.expects_response();
        let method = request.method.as_str();

        match method {
            "initialize" => {
                self.initialized = true;
                Some(json_rpc_response(
                    request.id,
                    json!({
                        "protocolVersion": MCP_VERSION,
                        "capabilities": { "tools": {} },
                        "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") }
                    }),
                ))
            }
            "notifications/initialized" | "initialized" => {
                self.initialized = true;
                None
            }
            _ if !expects_response => {
                tracing::debug!(method, "ignoring notification");
                None
            }
            "ping" => Some(json_rpc_response(request.id, json!({}))),
            "tools/list" => Some(json_rpc_response(request.id, tool_definitions())),
            "tools/call" => {
                // Clients that skip the handshake are served anyway.
                self.initialized = true;
                Some(self.handle_tools_call(request.id, request.params))
            }
            other => {
                tracing::debug!(method = other, "unknown method");
                Some(json_rpc_error(request.id, METHOD_NOT_FOUND, "Method not found"))
            }
        }
    }

    fn handle_tools_call(&mut self, id: Option<Value>, params: Option<Value>) -> Value {
        let Some(Value::Object(params)) = params else {
            return json_rpc_error(id, INVALID_PARAMS, "Invalid params: expected an object with a tool name");
        };
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return json_rpc_error(id, INVALID_PARAMS, "Invalid params: name is required");
        };

        let empty = Map::new();
        let arguments = match params.get("arguments") {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(arguments)) => arguments,
            Some(_) => return json_rpc_error(id, INVALID_PARAMS, "Invalid params: arguments must be an object"),
        };

        match self.tools.call(name, arguments) {
            Ok(result) => json_rpc_response(id, result),
            Err(e) => {
                tracing::debug!(tool = name, code = e.code, message = %e.message, "tool call failed");
                json_rpc_error(id, e.code, &e.message)
            }
        }
    }
}

/// Serves newline-delimited JSON-RPC on stdin/stdout until stdin closes.
///
/// Stdout carries protocol frames only; diagnostics go through `tracing` to stderr.
pub async fn run(mut server: McpServer) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    tracing::info!(board = %server.tools().board(), "mcp server started");

    while let Some(line) = lines.next_line().await? {
        if let Some(response) = server.handle_line(&line) {
            let mut frame = serde_json::to_vec(&response)?;
            frame.push(b'\n');
            stdout.write_all(&frame).await?;
            stdout.flush().await?;
        }
    }

    tracing::info!("stdin closed, mcp server stopping");
    Ok(())
}
