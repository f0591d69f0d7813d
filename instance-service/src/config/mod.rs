//! Configuration module for instance-service.

use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct InstanceConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Secret<String>,
    pub name: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl InstanceConfig {
    /// Load from the process environment (and `.env`). Read once at startup.
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_vars(common, |key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_vars<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::ConfigError(anyhow::anyhow!("{} is required", key)))
        };

        Ok(Self {
            common,
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| "instance-service".to_string()),
            service_version: lookup("SERVICE_VERSION")
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|v| !v.is_empty()),
            database: DatabaseConfig {
                host: lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: parse_or(&lookup, "POSTGRES_PORT", 5432)?,
                user: required("POSTGRES_USER")?,
                password: Secret::new(required("POSTGRES_PASSWORD")?),
                name: required("POSTGRES_DB")?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
                min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", 1)?,
            },
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} is invalid ({}): {}", key, raw, e))
        }),
        None => Ok(default),
    }
}
