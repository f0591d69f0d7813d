//! Persistence seam for instance rows.

use crate::models::DeleteOutcome;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Statements the service needs from the backing store.
///
/// Implementations bind every value as a parameter and never retry.
#[async_trait]
pub trait InstanceStore: Send + Sync {
    /// Append one row carrying `instance_id`. The assigned row id is not returned.
    async fn insert(&self, instance_id: i32) -> Result<(), StoreError>;

    /// Every stored instance id, in whatever order the store yields them.
    async fn list_all(&self) -> Result<Vec<i32>, StoreError>;

    /// Delete the row keyed by `row_id`.
    async fn delete(&self, row_id: i64) -> Result<DeleteOutcome, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
