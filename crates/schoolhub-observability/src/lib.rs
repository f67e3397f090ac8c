//! # SchoolHub Observability
//!
//! Structured logging and Prometheus metrics.
//!
//! - [`logging`]: subscriber setup and per-request log lines
//! - [`metrics`]: recorder setup, HTTP metrics and domain counters
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: full filter override
//! - `LOG_LEVEL`: level for the application crates (default: `info`)
//! - `LOG_DIR`: when set, also write daily-rolling JSON logs there
//! - `OBSERVABILITY_ENABLED`: set to `false` or `0` to disable metrics

pub mod logging;
pub mod metrics;

pub use logging::{init_tracing, logging_middleware};
pub use metrics::{
    PrometheusHandle, init_metrics, is_observability_enabled, metrics_middleware, metrics_router,
    track_auth_failure, track_resource_created,
};
