// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid marker type: {0} (expected one of: jid, bid, class)")]
    InvalidMarkerType(String),

    #[error("Invalid disposal method: {0} (expected kill or discard)")]
    InvalidDisposalMethod(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
