//! Mapping of driver errors into the shared taxonomy.

use pricelist_core::Error;

/// Translate a sqlx error into the typed taxonomy.
///
/// Unique violations become `Duplicate` (409), other integrity
/// violations become `Constraint` (400), everything else surfaces as
/// `Storage` with the driver message preserved for diagnostics.
pub(crate) fn map_db_error(err: sqlx::Error) -> Error {
    match &err {
        sqlx::Error::Database(db) => {
            let message = db.message().to_string();
            match db.code().as_deref() {
                Some("23505") => Error::Duplicate(message),
                Some(code) if code.starts_with("23") => Error::Constraint(message),
                _ => Error::Storage(message),
            }
        }
        _ => Error::Storage(err.to_string()),
    }
}
