//! Classification of raw configuration documents

use serde_json::{Map, Value};
use thiserror::Error;

/// Why a configuration document could not be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Malformed configuration document: {0}")]
    Malformed(String),

    #[error("Configuration endpoint reported an error: {0}")]
    Rejected(String),
}

/// The shapes the configuration endpoint has been seen to return
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteDocument {
    /// Collections at the top level
    Legacy(Map<String, Value>),
    /// `{ "status": "success", "data": { ... } }`
    Enveloped(Map<String, Value>),
    /// An envelope whose status is anything but success
    EnvelopedError(String),
}

impl RemoteDocument {
    pub fn classify(raw: Value) -> Result<Self, DocumentError> {
        let mut map = match raw {
            Value::Object(map) => map,
            other => {
                return Err(DocumentError::Malformed(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )))
            }
        };

        let Some(status) = map.remove("status") else {
            return Ok(RemoteDocument::Legacy(map));
        };

        let succeeded = status
            .as_str()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case("success"));
        if !succeeded {
            let message = ["message", "error"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or_else(|| format!("status {}", status));
            return Ok(RemoteDocument::EnvelopedError(message));
        }

        match map.remove("data") {
            Some(Value::Object(data)) => Ok(RemoteDocument::Enveloped(data)),
            Some(other) => Err(DocumentError::Malformed(format!(
                "envelope data is {}, not an object",
                json_kind(&other)
            ))),
            None => Err(DocumentError::Malformed("envelope has no data".to_string())),
        }
    }

    /// The map holding the collections, or the reason there is none
    pub fn into_collections(self) -> Result<Map<String, Value>, DocumentError> {
        match self {
            RemoteDocument::Legacy(map) | RemoteDocument::Enveloped(map) => Ok(map),
            RemoteDocument::EnvelopedError(message) => Err(DocumentError::Rejected(message)),
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
