//! RPC Error Types
//!
//! Maps application errors to JSON-RPC error codes.

use disposal_core::error::AppError;
use jsonrpsee::types::ErrorObjectOwned;

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const STORE_UNAVAILABLE: i32 = 5001;
}

/// Convert AppError to JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    match err {
        AppError::Domain(e) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, e.to_string(), None::<()>)
        }
        AppError::StoreUnavailable(msg) => {
            ErrorObjectOwned::owned(code::STORE_UNAVAILABLE, msg, None::<()>)
        }
    }
}

/// Re-tag a params deserialization failure as a validation error
pub fn invalid_params(err: ErrorObjectOwned) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(code::VALIDATION_ERROR, err.message().to_string(), None::<()>)
}
