//! # SchoolHub Core
//!
//! Core types shared by every SchoolHub crate.
//!
//! - [`errors`]: the [`AppError`] type and its HTTP rendering
//! - [`serde`]: lenient deserializers used by request payloads
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("School not found"));
//! assert_eq!(error.status, axum::http::StatusCode::NOT_FOUND);
//! ```

pub mod errors;
pub mod serde;

pub use errors::{
    AUTHENTICATION_FAILED, AppError, FallbackErrorResponse, FieldError, MessageResponse,
    PERMISSION_DENIED, ValidationErrorResponse,
};
