//! JSON-RPC Server
//!
//! Serves the marker administration API over HTTP on localhost.

use crate::error::invalid_params;
use crate::handler::RpcHandler;
use crate::types::{method, MarkRequest, MethodRequest, TargetRequest};
use disposal_core::application::DisposalClient;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_RPC_HOST: &str = "127.0.0.1";
pub const DEFAULT_RPC_PORT: u16 = 9528;

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    /// 0 picks a free port (see `RpcServer::start` return value)
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, client: DisposalClient) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(client)),
        }
    }

    /// Build the RPC module with every method registered
    fn module(&self) -> Result<RpcModule<()>, String> {
        let mut module = RpcModule::new(());

        let handler = self.handler.clone();
        module
            .register_async_method(method::MARK, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: MarkRequest = params.parse().map_err(invalid_params)?;
                    handler.mark(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method(method::UNMARK, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: MarkRequest = params.parse().map_err(invalid_params)?;
                    handler.unmark(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method(method::UNMARK_ALL, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: MethodRequest = params.parse().map_err(invalid_params)?;
                    handler.unmark_all(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method(method::MARKERS, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: MethodRequest = params.parse().map_err(invalid_params)?;
                    handler.markers(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method(method::TARGET, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: TargetRequest = params.parse().map_err(invalid_params)?;
                    handler.target(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        Ok(module)
    }

    /// Start the JSON-RPC server
    ///
    /// Returns the bound address (useful with port 0) and the server handle.
    pub async fn start(self) -> Result<(SocketAddr, ServerHandle), String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        let module = self.module()?;
        let handle = server.start(module);

        info!(addr = %local_addr, "JSON-RPC server started successfully");
        Ok((local_addr, handle))
    }
}
