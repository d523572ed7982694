//! RPC Method Handlers
//!
//! Parses string parameters into domain types and delegates to DisposalClient.

use crate::error::to_rpc_error;
use crate::types::{
    MarkRequest, MarkResponse, MarkerEntry, MarkersResponse, MethodRequest, TargetRequest,
    TargetResponse, UnmarkAllResponse, UnmarkResponse,
};
use disposal_core::application::DisposalClient;
use disposal_core::domain::{DisposalMethod, JobDescriptor, Marker, MarkerType};
use disposal_core::error::AppError;
use jsonrpsee::types::ErrorObjectOwned;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    client: DisposalClient,
}

fn parse_method(method: &str) -> Result<DisposalMethod, ErrorObjectOwned> {
    method
        .parse()
        .map_err(|e| to_rpc_error(AppError::Domain(e)))
}

fn parse_marker(params: &MarkRequest) -> Result<(DisposalMethod, MarkerType), ErrorObjectOwned> {
    let marker_type: MarkerType = params
        .marker_type
        .parse()
        .map_err(|e| to_rpc_error(AppError::Domain(e)))?;
    Ok((parse_method(&params.method)?, marker_type))
}

fn encoded_if_written(written: bool, marker_type: MarkerType, value: &str) -> Option<String> {
    written.then(|| Marker::new(marker_type, value).encode())
}

impl RpcHandler {
    pub fn new(client: DisposalClient) -> Self {
        Self { client }
    }

    /// disposal.mark.v1
    pub async fn mark(&self, params: MarkRequest) -> Result<MarkResponse, ErrorObjectOwned> {
        let (method, marker_type) = parse_marker(&params)?;

        let marked = self
            .client
            .mark(method, marker_type, &params.value)
            .await
            .map_err(to_rpc_error)?;

        Ok(MarkResponse {
            method: method.to_string(),
            marker: encoded_if_written(marked, marker_type, &params.value),
            marked,
        })
    }

    /// disposal.unmark.v1
    pub async fn unmark(&self, params: MarkRequest) -> Result<UnmarkResponse, ErrorObjectOwned> {
        let (method, marker_type) = parse_marker(&params)?;

        let unmarked = self
            .client
            .unmark(method, marker_type, &params.value)
            .await
            .map_err(to_rpc_error)?;

        Ok(UnmarkResponse {
            method: method.to_string(),
            marker: encoded_if_written(unmarked, marker_type, &params.value),
            unmarked,
        })
    }

    /// disposal.unmark_all.v1
    pub async fn unmark_all(
        &self,
        params: MethodRequest,
    ) -> Result<UnmarkAllResponse, ErrorObjectOwned> {
        let method = parse_method(&params.method)?;

        self.client.unmark_all(method).await.map_err(to_rpc_error)?;

        Ok(UnmarkAllResponse {
            method: method.to_string(),
            cleared: true,
        })
    }

    /// disposal.markers.v1
    pub async fn markers(&self, params: MethodRequest) -> Result<MarkersResponse, ErrorObjectOwned> {
        let method = parse_method(&params.method)?;

        let markers = self
            .client
            .markers(method)
            .await
            .map_err(to_rpc_error)?
            .into_iter()
            .map(|marker| match Marker::decode(&marker) {
                Ok(decoded) => MarkerEntry {
                    marker_type: Some(decoded.marker_type.to_string()),
                    value: Some(decoded.value),
                    marker,
                },
                Err(_) => MarkerEntry {
                    marker,
                    marker_type: None,
                    value: None,
                },
            })
            .collect();

        Ok(MarkersResponse {
            method: method.to_string(),
            markers,
        })
    }

    /// disposal.target.v1
    pub async fn target(&self, params: TargetRequest) -> Result<TargetResponse, ErrorObjectOwned> {
        let job = JobDescriptor {
            jid: params.jid,
            bid: params.bid,
            class: params.class,
        };

        let target = self
            .client
            .target_disposal_method(&job)
            .await
            .map_err(to_rpc_error)?;

        Ok(TargetResponse {
            disposal_method: target.map(|method| method.to_string()),
        })
    }
}
