//! Unified persistence-layer error type.
//!
//! Store failures propagate unchanged inside [`RepoError::Database`];
//! repositories never convert them into a false success. Reads that miss
//! and writes that touch zero rows surface [`RepoError::NotFound`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    /// A fetch or row-count-checked write targeted a nonexistent id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// An expected column was absent or of the wrong shape.
    #[error("Row mapping failed: {0}")]
    Mapping(String),

    /// Any failure from the store, propagated unchanged.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepoError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
