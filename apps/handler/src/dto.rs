//! Function host custom-handler wire types.

use herald_core::{AppError, AppResult};
use herald_domain::DirectoryUserEvent;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Trigger binding name that carries the event in `Data`.
pub const EVENT_BINDING: &str = "event";

/// Invocation request posted by the function host.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvocationRequest {
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub metadata: Value,
}

impl InvocationRequest {
    /// Decodes the trigger event. The host may pass it either as an object or
    /// as a JSON-encoded string.
    pub fn event(&self) -> AppResult<DirectoryUserEvent> {
        let value = self.data.get(EVENT_BINDING).ok_or_else(|| {
            AppError::Validation(format!(
                "invocation data has no '{EVENT_BINDING}' binding"
            ))
        })?;

        let decoded = match value {
            Value::String(encoded) => serde_json::from_str(encoded.as_str()),
            other => serde_json::from_value(other.clone()),
        };

        decoded.map_err(|error| {
            AppError::Validation(format!("invalid directory user event payload: {error}"))
        })
    }

    /// Returns the host-assigned invocation id, when present.
    pub fn invocation_id(&self) -> Option<&str> {
        self.metadata
            .get("sys")
            .and_then(|sys| sys.get("RandGuid"))
            .and_then(Value::as_str)
    }
}

/// Invocation response returned to the function host.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvocationResponse {
    pub outputs: Map<String, Value>,
    pub logs: Vec<String>,
    pub return_value: Value,
}

impl InvocationResponse {
    pub fn completed(return_value: Value) -> Self {
        Self {
            outputs: Map::new(),
            logs: Vec::new(),
            return_value,
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            outputs: Map::new(),
            logs: vec![message],
            return_value: Value::Null,
        }
    }
}
