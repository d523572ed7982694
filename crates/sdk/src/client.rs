//! Disposal Admin Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    MarkRequest, MarkResponse, MarkersResponse, MethodRequest, TargetRequest, TargetResponse,
    UnmarkAllResponse, UnmarkResponse,
};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the marker administration API
///
/// Methods take the wire names: `"kill"`/`"discard"` for the disposal method
/// and `"jid"`/`"bid"`/`"class"` for the marker type. Anything else is
/// rejected by the daemon with a validation error (code 4000).
///
/// # Example
///
/// ```no_run
/// use disposal_sdk::DisposalAdminClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = DisposalAdminClient::connect("http://127.0.0.1:9528").await?;
/// client.mark("discard", "bid", "batch42").await?;
/// # Ok(())
/// # }
/// ```
pub struct DisposalAdminClient {
    client: HttpClient,
}

/// Send a request struct as named (object) params
fn object_params<T: Serialize>(request: &T) -> Result<ObjectParams> {
    let mut params = ObjectParams::new();
    match serde_json::to_value(request)? {
        serde_json::Value::Object(fields) => {
            for (name, value) in fields {
                params.insert(&name, value)?;
            }
            Ok(params)
        }
        other => Err(SdkError::Other(format!(
            "request must serialize to an object, got {}",
            other
        ))),
    }
}

impl DisposalAdminClient {
    /// Connect to the daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9528`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(REQUEST_TIMEOUT)
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    async fn call<T: Serialize, R: DeserializeOwned>(&self, method: &str, request: &T) -> Result<R> {
        let params = object_params(request)?;
        let response: R = self.client.request(method, params).await?;
        Ok(response)
    }

    /// Mark jobs matching `marker_type`/`value` for disposal
    ///
    /// An empty `value` is accepted and reported back with `marked == false`.
    pub async fn mark(
        &self,
        method: impl Into<String>,
        marker_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<MarkResponse> {
        let request = MarkRequest {
            method: method.into(),
            marker_type: marker_type.into(),
            value: value.into(),
        };
        self.call("disposal.mark.v1", &request).await
    }

    /// Remove a single marker
    pub async fn unmark(
        &self,
        method: impl Into<String>,
        marker_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<UnmarkResponse> {
        let request = MarkRequest {
            method: method.into(),
            marker_type: marker_type.into(),
            value: value.into(),
        };
        self.call("disposal.unmark.v1", &request).await
    }

    /// Remove every marker of one disposal method
    pub async fn unmark_all(&self, method: impl Into<String>) -> Result<UnmarkAllResponse> {
        let request = MethodRequest {
            method: method.into(),
        };
        self.call("disposal.unmark_all.v1", &request).await
    }

    /// List markers of one disposal method (no ordering guarantee)
    pub async fn markers(&self, method: impl Into<String>) -> Result<MarkersResponse> {
        let request = MethodRequest {
            method: method.into(),
        };
        self.call("disposal.markers.v1", &request).await
    }

    /// Which disposal method a job with these fields would get
    pub async fn target(&self, job: &TargetRequest) -> Result<TargetResponse> {
        self.call("disposal.target.v1", job).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_params_skip_absent_fields() {
        let request = TargetRequest {
            jid: Some("abc123".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, serde_json::json!({"jid": "abc123"}));
        assert!(object_params(&request).is_ok());
    }

    #[test]
    fn test_object_params_rejects_non_objects() {
        let err = object_params(&"just a string").unwrap_err();
        assert!(matches!(err, SdkError::Other(_)));
    }

    #[tokio::test]
    async fn test_unreachable_daemon_is_not_an_rpc_error() {
        // Grab a free port, then release it so nothing is listening there
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = DisposalAdminClient::connect(format!("http://127.0.0.1:{}", port))
            .await
            .unwrap();
        let err = client.markers("kill").await.unwrap_err();
        assert!(!matches!(err, SdkError::Rpc { .. }));
    }
}
