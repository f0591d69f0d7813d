//! Services module for instance-service.

pub mod database;
pub mod error;
pub mod instance;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::Database;
pub use error::ServiceError;
pub use instance::{InstanceIdGenerator, InstanceService};
pub use memory::InMemoryInstanceStore;
pub use metrics::{
    get_metrics, init_metrics, record_http_request, record_instance_operation,
};
pub use store::{InstanceStore, StoreError};
