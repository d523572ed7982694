// Job Disposal Infrastructure - SQLite Adapter
// Implements: MarkerStore

mod connection;
mod error;
mod marker_store;
mod migration;

pub use connection::create_pool;
pub use marker_store::SqliteMarkerStore;
pub use migration::run_migrations;

// Note: sqlx::Error conversion lives in error.rs as a helper function
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
