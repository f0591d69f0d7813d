//! Common test utilities for instance-service integration tests.

#![allow(dead_code)]

use instance_service::config::{DatabaseConfig, InstanceConfig};
use instance_service::services::InMemoryInstanceStore;
use instance_service::startup::Application;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::{Arc, Once};

static TRACING: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = std::env::var("TEST_LOG").unwrap_or_else(|_| "warn".to_string());
        service_core::observability::init_tracing("instance-service-test", &filter, None);
    });
}

/// Configuration for tests. The database section points at `TEST_DATABASE_*`
/// when set and is otherwise unused by the in-memory store.
pub fn test_config() -> InstanceConfig {
    InstanceConfig {
        common: CoreConfig { port: 0 }, // Random port
        service_name: "instance-service".to_string(),
        service_version: env!("CARGO_PKG_VERSION").to_string(),
        log_level: "warn".to_string(),
        otlp_endpoint: None,
        database: DatabaseConfig {
            host: std::env::var("TEST_DATABASE_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: std::env::var("TEST_DATABASE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5432),
            user: std::env::var("TEST_DATABASE_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: Secret::new(
                std::env::var("TEST_DATABASE_PASSWORD").unwrap_or_else(|_| "postgres".to_string()),
            ),
            name: std::env::var("TEST_DATABASE_NAME")
                .unwrap_or_else(|_| "instances_test".to_string()),
            max_connections: 5,
            min_connections: 1,
        },
    }
}

/// Test application wrapper.

pub struct TestApp {
    pub address: String,
    pub http_port: u16,
    pub store: Arc<InMemoryInstanceStore>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// POST /api/ec2/create and return the generated instance id.
    pub async fn create_instance(&self) -> i64 {
        let response = self
            .client
            .post(self.url("/api/ec2/create"))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        body["instance_id"].as_i64().expect("instance_id missing")
    }

    /// GET /api/ec2/list and return the instance ids.
    pub async fn list_instances(&self) -> Vec<i64> {
        let response = self
            .client
            .get(self.url("/api/ec2/list"))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        body["instances"]
            .as_array()
            .expect("instances must be an array")
            .iter()
            .map(|v| v.as_i64().expect("instance ids are integers"))
            .collect()
    }

    pub async fn terminate(&self, id: &str) -> reqwest::Response {
        self.client
            .post(self.url(&format!("/api/ec/terminate/{}", id)))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Spawn the application on a random port backed by an in-memory store.
pub async fn spawn_app() -> TestApp {
    init_tracing();

    let store = Arc::new(InMemoryInstanceStore::new());
    let app = Application::with_store(test_config(), store.clone())
        .await
        .expect("Failed to build application");

    let http_port = app.http_port();
    let address = format!("http://127.0.0.1:{}", http_port);

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    // Wait for the server to accept connections
    let client = reqwest::Client::new();
    let health_url = format!("{}/health", address);
    for _ in 0..50 {
        if client.get(&health_url).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }

    TestApp {
        address,
        http_port,
        store,
        client,
    }
}
