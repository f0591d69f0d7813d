//! Instance lifecycle rules on top of an [`InstanceStore`].

use crate::models::{CreatedInstance, DeleteOutcome, INSTANCE_ID_MAX, INSTANCE_ID_MIN};
use crate::services::error::ServiceError;
use crate::services::metrics::record_instance_operation;
use crate::services::store::InstanceStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use tracing::{error, info, instrument, warn};

/// Process-wide source of instance ids, seeded once.
///
/// Ids are drawn uniformly from `INSTANCE_ID_MIN..=INSTANCE_ID_MAX`. Collisions
/// are possible and are not checked.
#[derive(Debug)]
pub struct InstanceIdGenerator {
    rng: Mutex<StdRng>,
}

impl InstanceIdGenerator {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic generator for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn next_id(&self) -> i32 {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rng.gen_range(INSTANCE_ID_MIN..=INSTANCE_ID_MAX)
    }
}

#[derive(Clone)]
pub struct InstanceService {
    store: Arc<dyn InstanceStore>,
    ids: Arc<InstanceIdGenerator>,
}

impl InstanceService {
    pub fn new(store: Arc<dyn InstanceStore>, ids: Arc<InstanceIdGenerator>) -> Self {
        Self { store, ids }
    }

    pub fn store(&self) -> &Arc<dyn InstanceStore> {
        &self.store
    }

    /// Generate an instance id and persist it as a new row.
    #[instrument(skip(self))]
    pub async fn create(&self) -> Result<CreatedInstance, ServiceError> {
        let instance_id = self.ids.next_id();

        if let Err(e) = self.store.insert(instance_id).await {
            error!(error = %e, instance_id = instance_id, "Failed to insert instance");
            record_instance_operation("create", "error");
            return Err(e.into());
        }

        record_instance_operation("create", "success");
        info!(instance_id = instance_id, "Instance created");
        Ok(CreatedInstance { instance_id })
    }

    /// All stored instance ids; empty when nothing has been created.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<i32>, ServiceError> {
        match self.store.list_all().await {
            Ok(instances) => {
                record_instance_operation("list", "success");
                Ok(instances)
            }
            Err(e) => {
                error!(error = %e, "Failed to list instances");
                record_instance_operation("list", "error");
                Err(e.into())
            }
        }
    }

    /// Delete the row keyed by `row_id`.
    #[instrument(skip(self))]
    pub async fn terminate(&self, row_id: i64) -> Result<(), ServiceError> {
        match self.store.delete(row_id).await {
            Ok(DeleteOutcome::Deleted) => {
                record_instance_operation("terminate", "success");
                info!(row_id = row_id, "Instance terminated");
                Ok(())
            }
            Ok(DeleteOutcome::NotFound) => {
                record_instance_operation("terminate", "not_found");
                warn!(row_id = row_id, "Instance to terminate not found");
                Err(ServiceError::NotFound(row_id))
            }
            Err(e) => {
                error!(error = %e, row_id = row_id, "Failed to terminate instance");
                record_instance_operation("terminate", "error");
                Err(e.into())
            }
        }
    }
}
