//! Domain models for instance-service.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lower bound (inclusive) of generated instance ids.
pub const INSTANCE_ID_MIN: i32 = 100_000;
/// Upper bound (inclusive) of generated instance ids.
pub const INSTANCE_ID_MAX: i32 = 999_999;

/// A persisted instance row.
///
/// `row_id` is assigned by the store and is the deletion key. `instance_id` is
/// a display identifier and may repeat across rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Instance {
    #[sqlx(rename = "id")]
    pub row_id: i64,
    #[sqlx(rename = "instance")]
    pub instance_id: i32,
}

/// Result of a successful create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedInstance {
    pub instance_id: i32,
}

/// Whether a delete statement removed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

impl DeleteOutcome {
    pub fn from_rows_affected(rows: u64) -> Self {
        if rows > 0 {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        }
    }
}
