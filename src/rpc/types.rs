use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::graph::{PathResult, RelationListing, Term, TermListing, TermLookup};

/// JSON-RPC 2.0 request
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// `None` only when the member is absent (a notification); `"id": null` is `Some(Null)`
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<JsonRpcId>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 ID: string, number, or explicit null
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcId {
    String(String),
    Number(i64),
    Null,
}

impl JsonRpcId {
    /// Recover an id from an arbitrary JSON value, if it has a legal id shape
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(JsonRpcId::String(s.clone())),
            Value::Number(n) => n.as_i64().map(JsonRpcId::Number),
            Value::Null => Some(JsonRpcId::Null),
            _ => None,
        }
    }
}

impl From<JsonRpcId> for Value {
    fn from(id: JsonRpcId) -> Self {
        match id {
            JsonRpcId::String(s) => Value::String(s),
            JsonRpcId::Number(n) => Value::Number(n.into()),
            JsonRpcId::Null => Value::Null,
        }
    }
}

/// Runs only when the `id` member is present, so an explicit null stays distinguishable
fn present_id<'de, D>(deserializer: D) -> Result<Option<JsonRpcId>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonRpcId::deserialize(deserializer).map(Some)
}

/// JSON-RPC 2.0 response
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(flatten)]
    pub payload: JsonRpcResponsePayload,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum JsonRpcResponsePayload {
    Result { result: Value },
    Error { error: JsonRpcError },
}

/// JSON-RPC 2.0 error
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    pub fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            payload: JsonRpcResponsePayload::Result { result },
        }
    }

    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            payload: JsonRpcResponsePayload::Error {
                error: JsonRpcError {
                    code,
                    message: message.into(),
                    data: None,
                },
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.payload, JsonRpcResponsePayload::Error { .. })
    }
}

/// GetTerm params
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TermRequest {
    #[serde(default)]
    pub term_name: String,
}

/// GetTerm result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<Term>,
    pub found: bool,
}

impl From<TermLookup> for TermResponse {
    fn from(lookup: TermLookup) -> Self {
        match lookup {
            TermLookup::Found(term) => Self {
                term: Some(term),
                found: true,
            },
            TermLookup::NotFound => Self {
                term: None,
                found: false,
            },
        }
    }
}

/// GetAllTerms result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllTermsResponse {
    pub terms: Vec<Term>,
    pub total_count: usize,
}

impl From<TermListing> for AllTermsResponse {
    fn from(listing: TermListing) -> Self {
        Self {
            terms: listing.terms,
            total_count: listing.total_count,
        }
    }
}

/// GetTermRelations params. Absent `max_depth` decodes as 0.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RelationsRequest {
    #[serde(default)]
    pub term_name: String,
    #[serde(default)]
    pub max_depth: i32,
}

/// A relation as sent on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationMessage {
    pub source_term: String,
    pub target_term: String,
    pub relation_type: String,
}

/// GetTermRelations result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationsResponse {
    pub relations: Vec<RelationMessage>,
    pub total_count: usize,
}

impl From<RelationListing> for RelationsResponse {
    fn from(listing: RelationListing) -> Self {
        Self {
            relations: listing
                .relations
                .into_iter()
                .map(|r| RelationMessage {
                    source_term: r.source,
                    target_term: r.target,
                    relation_type: r.relation_type,
                })
                .collect(),
            total_count: listing.total_count,
        }
    }
}

/// FindPath params. Absent `max_depth` decodes as 0.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PathRequest {
    #[serde(default)]
    pub source_term: String,
    #[serde(default)]
    pub target_term: String,
    #[serde(default)]
    pub max_depth: i32,
}

/// FindPath result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResponse {
    #[serde(default)]
    pub path: Vec<String>,
    pub path_exists: bool,
    #[serde(default)]
    pub message: String,
}

impl From<PathResult> for PathResponse {
    fn from(result: PathResult) -> Self {
        let path_exists = result.path_exists();
        let message = result.message().to_string();
        Self {
            path: result.into_path(),
            path_exists,
            message,
        }
    }
}

/// GetGraphStats params. Absent `top_n` decodes as 0.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StatsRequest {
    #[serde(default)]
    pub top_n: i32,
}

/// Method names understood by the service
pub mod methods {
    pub const GET_TERM: &str = "GetTerm";
    pub const GET_ALL_TERMS: &str = "GetAllTerms";
    pub const GET_TERM_RELATIONS: &str = "GetTermRelations";
    pub const FIND_PATH: &str = "FindPath";
    pub const GET_GRAPH_STATS: &str = "GetGraphStats";
}

/// JSON-RPC error codes
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}
