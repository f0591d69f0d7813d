use crate::services::store::StoreError;
use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Instance not found: {0}")]
    NotFound(i64),

    #[error("Store failure: {0}")]
    StoreFailure(#[from] StoreError),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(_) => AppError::NotFound(anyhow::anyhow!("Instance not found")),
            ServiceError::StoreFailure(e) => AppError::DatabaseError(anyhow::Error::new(e)),
        }
    }
}
