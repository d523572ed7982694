// Application Layer - Use Cases and Business Logic

pub mod dispatch;
pub mod disposal_client;
pub mod interception;

// Re-exports
pub use dispatch::{DispatchGuard, DispatchOutcome, StoreFailurePolicy};
pub use disposal_client::DisposalClient;
pub use interception::{InterceptionHook, JobContext, PreExecutionHook};
