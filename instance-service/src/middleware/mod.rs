//! HTTP middleware specific to instance-service.

pub mod metrics;

pub use metrics::metrics_middleware;
