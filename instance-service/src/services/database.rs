//! PostgreSQL store adapter for instance-service.

use crate::config::DatabaseConfig;
use crate::models::DeleteOutcome;
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::store::{InstanceStore, StoreError};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use service_core::error::AppError;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use std::time::Duration;
use tracing::{info, instrument};

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool and verify connectivity.
    #[instrument(skip(config), fields(service = "instance-service", host = %config.host, db = %config.name))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            port = config.port,
            user = %config.user,
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to PostgreSQL"
        );

        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(config.password.expose_secret())
            .database(&config.name)
            .ssl_mode(PgSslMode::Disable);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        let db = Self { pool };
        db.health_check()
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::Error::new(e)))?;

        info!("PostgreSQL connection pool established");

        Ok(db)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl InstanceStore for Database {
    #[instrument(skip(self))]
    async fn insert(&self, instance_id: i32) -> Result<(), StoreError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["insert_instance"])
            .start_timer();

        sqlx::query("INSERT INTO instances (instance) VALUES ($1)")
            .bind(instance_id)
            .execute(&self.pool)
            .await?;

        timer.observe_duration();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<i32>, StoreError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_instances"])
            .start_timer();

        let instances: Vec<i32> = sqlx::query_scalar("SELECT instance FROM instances")
            .fetch_all(&self.pool)
            .await?;

        timer.observe_duration();
        Ok(instances)
    }

    #[instrument(skip(self))]
    async fn delete(&self, row_id: i64) -> Result<DeleteOutcome, StoreError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_instance"])
            .start_timer();

        let result = sqlx::query("DELETE FROM instances WHERE id = $1")
            .bind(row_id)
            .execute(&self.pool)
            .await?;

        timer.observe_duration();
        Ok(DeleteOutcome::from_rows_affected(result.rows_affected()))
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), StoreError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["health_check"])
            .start_timer();

        sqlx::query("SELECT 1").execute(&self.pool).await?;

        timer.observe_duration();
        Ok(())
    }
}
