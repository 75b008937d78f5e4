pub mod ai_generation_store;
pub mod api_key_store;
pub mod media_store;
pub mod post_store;
pub mod taxonomy_store;
pub mod webhook_delivery_store;
pub mod webhook_store;

use crate::infrastructure::db::database::DatabaseError;

/// Failure modes shared by every store implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("record conflicts with an existing one")]
    Conflict,
    #[error("invalid input")]
    InvalidInput,
    #[error("record changed since it was read")]
    Stale,
    #[error("storage unavailable")]
    StorageUnavailable,
}

impl From<DatabaseError> for StoreError {
    fn from(_: DatabaseError) -> Self {
        StoreError::StorageUnavailable
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict,
            sqlx::Error::Database(db) if db.is_check_violation() => StoreError::InvalidInput,
            _ => {
                tracing::warn!(error = %err, "store query failed");
                StoreError::StorageUnavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StoreError;
    use crate::infrastructure::db::database::DatabaseError;

    #[test]
    fn given_database_error_when_converted_should_map_to_storage_unavailable() {
        let err = StoreError::from(DatabaseError::Query("boom".to_string()));
        assert_eq!(err, StoreError::StorageUnavailable);
    }

    #[test]
    fn given_row_not_found_when_converted_should_map_to_not_found() {
        assert_eq!(StoreError::from(sqlx::Error::RowNotFound), StoreError::NotFound);
    }
}
