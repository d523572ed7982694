//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from the api-rpc crate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct MarkRequest {
    pub method: String,
    pub marker_type: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct MethodRequest {
    pub method: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkResponse {
    pub method: String,
    pub marker: Option<String>,
    pub marked: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnmarkResponse {
    pub method: String,
    pub marker: Option<String>,
    pub unmarked: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnmarkAllResponse {
    pub method: String,
    pub cleared: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkerEntry {
    pub marker: String,
    pub marker_type: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkersResponse {
    pub method: String,
    pub markers: Vec<MarkerEntry>,
}

/// Identifying fields of a job; absent fields are skipped
#[derive(Debug, Clone, Default, Serialize)]
pub struct TargetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetResponse {
    /// "kill", "discard" or None
    pub disposal_method: Option<String>,
}
