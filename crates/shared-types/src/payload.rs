//! Classification of raw analysis-service responses
//!
//! The service normally answers with an [`AnalysisResult`] object, but text
//! extraction endpoints and degraded deployments can return plain text or an
//! object without an `issues` array. Those bodies are kept verbatim so the
//! client can show them instead of attempting correlation.

use crate::types::AnalysisResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum AnalysisPayload {
    /// Object with an `issues` array that deserialized cleanly
    Structured(AnalysisResult),
    /// Anything else, as display text
    Unstructured(String),
}

impl AnalysisPayload {
    /// Classify a response body. Never fails: unparseable input is unstructured.
    pub fn from_json_str(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(value),
            Err(_) => AnalysisPayload::Unstructured(raw.to_string()),
        }
    }

    pub fn from_value(value: Value) -> Self {
        let has_issue_list = value.get("issues").is_some_and(Value::is_array);

        if has_issue_list {
            if let Ok(result) = serde_json::from_value::<AnalysisResult>(value.clone()) {
                return AnalysisPayload::Structured(result);
            }
        }

        match value {
            Value::String(text) => AnalysisPayload::Unstructured(text),
            other => AnalysisPayload::Unstructured(
                serde_json::to_string_pretty(&other).unwrap_or_else(|_| other.to_string()),
            ),
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisPayload::Structured(result) => Some(result),
            AnalysisPayload::Unstructured(_) => None,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, AnalysisPayload::Structured(_))
    }

    /// Display text for an unstructured body
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            AnalysisPayload::Structured(_) => None,
            AnalysisPayload::Unstructured(text) => Some(text),
        }
    }
}
