use crate::graph::GraphEngine;
use crate::ingest::LoadReport;
use crate::rpc::types::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Transport-agnostic JSON-RPC front end for the glossary graph.
///
/// Cloning is cheap: every clone shares the same immutable engine.
#[derive(Clone)]
pub struct GlossaryService {
    engine: Arc<GraphEngine>,
    report: Option<Arc<LoadReport>>,
}

impl GlossaryService {
    pub fn new(engine: Arc<GraphEngine>) -> Self {
        Self {
            engine,
            report: None,
        }
    }

    /// Attach the load report exposed by the health endpoint
    pub fn with_report(mut self, report: LoadReport) -> Self {
        self.report = Some(Arc::new(report));
        self
    }

    pub fn engine(&self) -> &GraphEngine {
        &self.engine
    }

    pub fn report(&self) -> Option<&LoadReport> {
        self.report.as_deref()
    }

    /// Process one raw JSON-RPC message.
    ///
    /// Malformed JSON yields a parse error response; notifications yield `None`.
    pub fn process_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match parse_message(line.as_bytes()) {
            Ok(value) => self.process_value(value),
            Err(response) => Some(response),
        }
    }

    /// Process well-formed JSON that should hold a single request.
    ///
    /// Anything that is not a request object (missing or non-string `method`,
    /// a batch array, an id of the wrong type) is an invalid request, not a parse error.
    pub fn process_value(&self, value: Value) -> Option<JsonRpcResponse> {
        let id = value
            .get("id")
            .and_then(JsonRpcId::from_value)
            .map(Value::from)
            .unwrap_or(Value::Null);

        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.process_request(request),
            Err(e) => Some(JsonRpcResponse::error(
                id,
                error_codes::INVALID_REQUEST,
                format!("Invalid request: {}", e),
            )),
        }
    }

    /// Process a decoded JSON-RPC request.
    ///
    /// Query outcomes such as unknown terms or missing paths are ordinary
    /// results; only protocol problems become JSON-RPC errors.
    pub fn process_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        // Notifications get no response
        let id: Value = request.id.clone()?.into();

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                id,
                error_codes::INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            ));
        }

        let start = Instant::now();
        let outcome = self.dispatch(&request.method, request.params);
        log::debug!(
            "{} handled in {} us",
            request.method,
            start.elapsed().as_micros()
        );

        Some(match outcome {
            Ok(result) => JsonRpcResponse::result(id, result),
            Err((code, message)) => JsonRpcResponse::error(id, code, message),
        })
    }

    fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, (i32, String)> {
        match method {
            methods::GET_TERM => {
                let req: TermRequest = decode_params(method, params)?;
                encode(TermResponse::from(self.engine.get_term(&req.term_name)))
            }
            methods::GET_ALL_TERMS => encode(AllTermsResponse::from(self.engine.all_terms())),
            methods::GET_TERM_RELATIONS => {
                let req: RelationsRequest = decode_params(method, params)?;
                encode(RelationsResponse::from(
                    self.engine.term_relations(&req.term_name, req.max_depth),
                ))
            }
            methods::FIND_PATH => {
                let req: PathRequest = decode_params(method, params)?;
                encode(PathResponse::from(self.engine.find_path(
                    &req.source_term,
                    &req.target_term,
                    req.max_depth,
                )))
            }
            methods::GET_GRAPH_STATS => {
                let req: StatsRequest = decode_params(method, params)?;
                encode(self.engine.stats(req.top_n))
            }
            _ => Err((
                error_codes::METHOD_NOT_FOUND,
                format!("Unknown method: {}", method),
            )),
        }
    }
}

/// Decode raw bytes as JSON, or build the -32700 response to send back
pub fn parse_message(raw: &[u8]) -> Result<Value, JsonRpcResponse> {
    serde_json::from_slice(raw).map_err(|e| {
        let id = std::str::from_utf8(raw)
            .ok()
            .and_then(extract_id_from_line)
            .unwrap_or(Value::Null);
        JsonRpcResponse::error(id, error_codes::PARSE_ERROR, format!("Parse error: {}", e))
    })
}

fn decode_params<T: DeserializeOwned>(method: &str, params: Option<Value>) -> Result<T, (i32, String)> {
    let params = match params {
        None | Some(Value::Null) => serde_json::json!({}),
        Some(p) => p,
    };
    serde_json::from_value(params).map_err(|e| {
        (
            error_codes::INVALID_PARAMS,
            format!("Invalid {} params: {}", method, e),
        )
    })
}

fn encode<T: Serialize>(value: T) -> Result<Value, (i32, String)> {
    serde_json::to_value(value).map_err(|e| {
        (
            error_codes::INTERNAL_ERROR,
            format!("JSON serialization error: {}", e),
        )
    })
}

/// Extract ID from JSON line (for error handling)
fn extract_id_from_line(line: &str) -> Option<Value> {
    // Try to extract ID field from malformed JSON
    if let Some(id_start) = line.find(r#""id":"#) {
        let id_str = &line[id_start + 5..];
        if let Some(id_end) = id_str.find(|c: char| c == ',' || c == '}') {
            let id_val = id_str[..id_end].trim();
            if id_val.len() >= 2 && id_val.starts_with('"') && id_val.ends_with('"') {
                return Some(Value::String(id_val[1..id_val.len() - 1].to_string()));
            } else if let Ok(num) = id_val.parse::<i64>() {
                return Some(Value::Number(num.into()));
            }
        }
    }
    None
}
