//! JSON-RPC API Layer
//!
//! Marker administration surface: operators mark, unmark and list disposal
//! targets, and can ask which disposal method a given job would get.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use jsonrpsee::server::ServerHandle;
pub use server::{RpcServer, RpcServerConfig};
