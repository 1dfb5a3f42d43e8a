//! MCP stdio server
//!
//! Reads JSON-RPC requests from the input stream, dispatches to handlers,
//! writes responses to the output stream. Requests are handled strictly in
//! arrival order; each response line is written whole and flushed before the
//! next line is processed.

use std::io::{self, Read, Write};

use serde_json::{json, Value};

use transparencia::client::PortalClient;

use crate::framing::LineFramer;
use crate::tools;
use crate::types::{
    JsonRpcRequest, JsonRpcResponse, ToolCallParams, APPLICATION_ERROR, INVALID_PARAMS,
    METHOD_NOT_FOUND, PARSE_ERROR,
};

const SERVER_NAME: &str = "portal-transparencia";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Read size for each chunk pulled off the input stream
const READ_CHUNK_SIZE: usize = 4096;

/// The MCP server: fixed configuration, no per-message state
pub struct McpServer {
    portal: PortalClient,
}

impl McpServer {
    pub fn new(portal: PortalClient) -> Self {
        Self { portal }
    }

    /// Run over stdin/stdout, blocking until stdin closes
    pub fn run_stdio(&self) {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run(stdin.lock(), stdout.lock());
    }

    /// Run over arbitrary streams, blocking until the input ends.
    ///
    /// An unterminated trailing line at end of stream is dropped.
    pub fn run<R: Read, W: Write>(&self, mut input: R, mut output: W) {
        let mut framer = LineFramer::new();
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            let n = match input.read(&mut chunk) {
                Ok(0) => break, // input closed
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::error!("input read failed: {e}");
                    break;
                }
            };
            for line in framer.push(&chunk[..n]) {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let response = self.handle_line(line);
                write_response(&mut output, &response);
            }
        }
        if !framer.pending().is_empty() {
            tracing::debug!("dropping unterminated trailing line");
        }
    }

    /// Parse one line and produce its response
    fn handle_line(&self, line: &str) -> JsonRpcResponse {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                return JsonRpcResponse::error(
                    None,
                    PARSE_ERROR,
                    format!("Erro ao processar mensagem: {e}"),
                );
            }
        };
        self.handle_request(&request)
    }

    fn handle_request(&self, req: &JsonRpcRequest) -> JsonRpcResponse {
        match req.method.as_str() {
            "initialize" => handle_initialize(req.id.clone()),
            "tools/list" => handle_tools_list(req.id.clone()),
            "tools/call" => self.handle_tools_call(req.id.clone(), &req.params),
            _ => JsonRpcResponse::error(
                req.id.clone(),
                METHOD_NOT_FOUND,
                format!("Método não implementado: {}", req.method),
            ),
        }
    }

    fn handle_tools_call(&self, id: Option<Value>, params: &Value) -> JsonRpcResponse {
        let call: ToolCallParams = match serde_json::from_value(params.clone()) {
            Ok(p) => p,
            Err(e) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string());
            }
        };

        tracing::debug!(tool = call.name.as_str(), "tools/call");
        match tools::call_tool(&self.portal, &call.name, &call.arguments) {
            Ok(result) => JsonRpcResponse::success(
                id,
                serde_json::to_value(result)
                    .unwrap_or_else(|_| json!({"error": "serialization failed"})),
            ),
            Err(message) => JsonRpcResponse::error(id, APPLICATION_ERROR, message),
        }
    }
}

fn handle_initialize(id: Option<Value>) -> JsonRpcResponse {
    JsonRpcResponse::success(
        id,
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION
            }
        }),
    )
}

fn handle_tools_list(id: Option<Value>) -> JsonRpcResponse {
    JsonRpcResponse::success(id, json!({ "tools": tools::list_tools() }))
}

/// Serialize a response as a single line and flush it
fn write_response<W: Write>(output: &mut W, response: &JsonRpcResponse) {
    if let Err(e) = serde_json::to_writer(&mut *output, response) {
        tracing::error!("failed to write response: {e}");
        return;
    }
    let _ = output.write_all(b"\n");
    let _ = output.flush();
}
