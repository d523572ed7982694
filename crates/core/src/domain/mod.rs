// Domain Layer - Pure business logic and entities

pub mod disposal;
pub mod error;
pub mod interception;
pub mod job;
pub mod marker;

// Re-exports
pub use disposal::DisposalMethod;
pub use error::DomainError;
pub use interception::{Interception, InterceptionState};
pub use job::JobDescriptor;
pub use marker::{Marker, MarkerType};
