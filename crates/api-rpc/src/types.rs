//! RPC Request/Response Types
//!
//! Method names and their parameters/results. Params are always one JSON object.

use serde::{Deserialize, Serialize};

/// Registered method names
pub mod method {
    pub const MARK: &str = "disposal.mark.v1";
    pub const UNMARK: &str = "disposal.unmark.v1";
    pub const UNMARK_ALL: &str = "disposal.unmark_all.v1";
    pub const MARKERS: &str = "disposal.markers.v1";
    pub const TARGET: &str = "disposal.target.v1";
}

/// disposal.mark.v1 / disposal.unmark.v1
#[derive(Debug, Deserialize)]
pub struct MarkRequest {
    /// "kill" or "discard"
    pub method: String,
    /// "jid", "bid" or "class"
    pub marker_type: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkResponse {
    pub method: String,
    /// Encoded marker; absent when the value was empty and nothing was written
    pub marker: Option<String>,
    pub marked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnmarkResponse {
    pub method: String,
    pub marker: Option<String>,
    pub unmarked: bool,
}

/// disposal.unmark_all.v1 / disposal.markers.v1
#[derive(Debug, Deserialize)]
pub struct MethodRequest {
    pub method: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnmarkAllResponse {
    pub method: String,
    pub cleared: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerEntry {
    pub marker: String,
    /// Decoded parts; absent if the stored entry is not a well-formed marker
    pub marker_type: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkersResponse {
    pub method: String,
    pub markers: Vec<MarkerEntry>,
}

/// disposal.target.v1 - which disposal method would this job get?
#[derive(Debug, Default, Deserialize)]
pub struct TargetRequest {
    #[serde(default)]
    pub jid: Option<String>,
    #[serde(default)]
    pub bid: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetResponse {
    /// "kill", "discard" or null
    pub disposal_method: Option<String>,
}
