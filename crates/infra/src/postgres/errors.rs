//! Mapping from driver errors to [`StoreError`].
//!
//! | SQLx error | SQLSTATE | StoreError | Scenario |
//! |------------|----------|------------|----------|
//! | Database | `23xxx` (integrity constraint violation) | `InvalidData` | Duplicate EAN, unknown unit/type name, negative value |
//! | Database | `22xxx` (data exception) | `InvalidData` | NUL byte or invalid encoding in a string, out-of-range number |
//! | Database | any other | `Unexpected` | Syntax, permission, serialization failures |
//! | PoolClosed / PoolTimedOut / Io / Tls | n/a | `Unexpected` | Connectivity |
//! | anything else | n/a | `Unexpected` | Decode errors and the like |

use nutrifacts_core::StoreError;

/// SQLSTATE class for integrity constraint violations.
const INTEGRITY_VIOLATION_CLASS: &str = "23";
/// SQLSTATE class for data exceptions: the values sent cannot be stored.
const DATA_EXCEPTION_CLASS: &str = "22";

/// Whether a SQLSTATE reports a problem with the data the client sent.
fn is_client_data_error(code: &str) -> bool {
    code.starts_with(INTEGRITY_VIOLATION_CLASS) || code.starts_with(DATA_EXCEPTION_CLASS)
}

pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code() {
                Some(code) if is_client_data_error(&code) => StoreError::invalid_data(msg),
                _ => StoreError::unexpected(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::unexpected(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::unexpected(format!("connection pool timed out in {}", operation))
        }
        other => StoreError::unexpected(format!("sqlx error in {}: {}", operation, other)),
    }
}
