//! Resource modules, one per collection.
//!
//! Each has the same layout: `controller.rs` (HTTP handlers and their OpenAPI
//! annotations), `service.rs` (store calls and population) and `router.rs`.

use schoolhub_core::AppError;
use schoolhub_db::StoreError;
use tracing::{error, warn};

pub mod classrooms;
pub mod schools;
pub mod students;

/// Writes that the store refuses are the caller's problem: 400 with the store's message.
pub(crate) fn rejected_write(err: StoreError) -> AppError {
    warn!(error = %err, "Store rejected write");
    AppError::bad_request(err)
}

pub(crate) fn store_failure(err: StoreError) -> AppError {
    error!(error = %err, "Store operation failed");
    AppError::internal(err)
}
