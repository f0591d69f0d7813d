//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateInstanceResponse {
    pub instance_id: i32,
    pub status: String,
}

impl CreateInstanceResponse {
    pub fn created(instance_id: i32) -> Self {
        Self {
            instance_id,
            status: "created".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListInstancesResponse {
    pub instances: Vec<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TerminateInstanceResponse {
    pub status: String,
    pub deleted_id: i64,
}

impl TerminateInstanceResponse {
    pub fn success(deleted_id: i64) -> Self {
        Self {
            status: "success".to_string(),
            deleted_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HelloRequest {
    #[serde(default)]
    pub name: String,
}

/// Also used for the greeting error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct HelloResponse {
    pub message: String,
}
