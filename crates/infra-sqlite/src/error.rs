// sqlx::Error -> AppError mapping
//
// Every backend failure is StoreUnavailable from the caller's point of view;
// the message keeps the SQLite detail for logs.

use disposal_core::error::AppError;

pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    let detail = match &err {
        sqlx::Error::Database(db_err) => match db_err.code() {
            // SQLite result codes: https://www.sqlite.org/rescode.html
            Some(code) => match code.as_ref() {
                "5" => format!("database locked (SQLITE_BUSY): {}", db_err.message()),
                "6" => format!("table locked (SQLITE_LOCKED): {}", db_err.message()),
                "13" => format!("database full: {}", db_err.message()),
                other => format!("database error [{}]: {}", other, db_err.message()),
            },
            None => format!("database error: {}", db_err.message()),
        },
        sqlx::Error::PoolTimedOut => "connection pool timed out".to_string(),
        sqlx::Error::PoolClosed => "connection pool closed".to_string(),
        sqlx::Error::Io(io_err) => format!("io error: {}", io_err),
        sqlx::Error::ColumnNotFound(col) => format!("column not found: {}", col),
        _ => err.to_string(),
    };

    AppError::StoreUnavailable(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map_to_store_unavailable() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut);
        assert!(err.is_store_unavailable());
        assert!(err.to_string().contains("timed out"));

        let err = map_sqlx_error(sqlx::Error::PoolClosed);
        assert!(err.is_store_unavailable());
    }

    #[test]
    fn test_io_errors_keep_their_detail() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume");
        let err = map_sqlx_error(sqlx::Error::Io(io));
        assert!(err.is_store_unavailable());
        assert!(err.to_string().contains("read-only volume"));
    }
}
