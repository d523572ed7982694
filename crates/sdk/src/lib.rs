//! Job Disposal SDK - Rust Client Library
//!
//! Marks enqueued jobs for disposal through the daemon's JSON-RPC API.
//!
//! # Example
//!
//! ```no_run
//! use disposal_sdk::DisposalAdminClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DisposalAdminClient::connect("http://127.0.0.1:9528").await?;
//!
//!     // Kill every queued NightlyReportJob when a worker picks it up
//!     client.mark("kill", "class", "NightlyReportJob").await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::DisposalAdminClient;
pub use error::{Result, SdkError};
pub use types::{
    MarkResponse, MarkerEntry, MarkersResponse, TargetRequest, TargetResponse, UnmarkAllResponse,
    UnmarkResponse,
};
