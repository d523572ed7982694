// Port Layer - Interfaces for external dependencies

pub mod class_options;
pub mod marker_store;

// Re-exports
pub use class_options::{ClassOptions, StaticClassOptions};
pub use marker_store::MarkerStore;
