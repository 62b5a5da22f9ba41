use thiserror::Error;

/// Failures at the store boundary. Fetch paths degrade to the last known
/// snapshot instead of surfacing these; write paths map them to API errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("record not found")]
    NotFound,

    #[error("duplicate record")]
    Duplicate,
}
