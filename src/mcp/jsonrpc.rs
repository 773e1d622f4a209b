use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default, rename = "jsonrpc")]
    pub _jsonrpc: Option<String>,
    pub method: String,
    /// `Some(Value::Null)` for an explicit `"id": null`, `None` when the member is absent.
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Notifications carry no id member and never get a reply.
    pub fn expects_response(&self) -> bool {
        self.id.is_some()
    }
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Parses one frame. On failure returns the error response to send back:
/// -32700 for malformed JSON, -32600 for JSON that is not a request object.
pub fn parse_request(line: &str) -> Result<JsonRpcRequest, Value> {
    let value: Value = serde_json::from_str(line)
        .map_err(|e| json_rpc_error(None, PARSE_ERROR, &format!("Parse error: {}", e)))?;
    let id = value.get("id").cloned();

    serde_json::from_value(value)
        .map_err(|e| json_rpc_error(id, INVALID_REQUEST, &format!("Invalid Request: {}", e)))
}

pub fn json_rpc_response(id: Option<Value>, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

pub fn json_rpc_error(id: Option<Value>, code: i64, message: &str) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
}

/// `content` array of text items.
pub fn text_content<I, S>(lines: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::Array(
        lines
            .into_iter()
            .map(|line| json!({ "type": "text", "text": line.into() }))
            .collect(),
    )
}
