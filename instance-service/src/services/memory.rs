//! In-process store used by tests.

use crate::models::{DeleteOutcome, Instance};
use crate::services::store::{InstanceStore, StoreError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Rows {
    next_row_id: i64,
    rows: Vec<Instance>,
}

/// Vector-backed [`InstanceStore`] with auto-incrementing row ids starting at 1.
#[derive(Debug, Default)]
pub struct InMemoryInstanceStore {
    rows: Mutex<Rows>,
    unavailable: AtomicBool,
}

impl InMemoryInstanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`] until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Copy of the stored rows in insertion order.
    pub fn snapshot(&self) -> Vec<Instance> {
        match self.rows.lock() {
            Ok(guard) => guard.rows.clone(),
            Err(poisoned) => poisoned.into_inner().rows.clone(),
        }
    }

    fn rows(&self) -> Result<MutexGuard<'_, Rows>, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store offline".to_string()));
        }
        self.rows
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("in-memory store mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl InstanceStore for InMemoryInstanceStore {
    async fn insert(&self, instance_id: i32) -> Result<(), StoreError> {
        let mut guard = self.rows()?;
        guard.next_row_id += 1;
        let row_id = guard.next_row_id;
        guard.rows.push(Instance {
            row_id,
            instance_id,
        });
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<i32>, StoreError> {
        let guard = self.rows()?;
        Ok(guard.rows.iter().map(|row| row.instance_id).collect())
    }

    async fn delete(&self, row_id: i64) -> Result<DeleteOutcome, StoreError> {
        let mut guard = self.rows()?;
        let before = guard.rows.len();
        guard.rows.retain(|row| row.row_id != row_id);
        let removed = (before - guard.rows.len()) as u64;
        Ok(DeleteOutcome::from_rows_affected(removed))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.rows().map(|_| ())
    }
}
