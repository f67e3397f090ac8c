//! # SchoolHub Auth
//!
//! Identity claims and bearer-token utilities.
//!
//! - [`claims`]: the [`Claims`] carried by a token and the closed [`Role`] set
//! - [`jwt`]: token creation and verification
//!
//! The API only verifies tokens; minting is used by the CLI and by tests.
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_auth::{Role, create_access_token, verify_token};
//!
//! let token = create_access_token("42", Role::Admin, &jwt_config)?;
//! let claims = verify_token(&token, &jwt_config)?;
//! assert_eq!(claims.role, Role::Admin);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, Role, UnknownRole};
pub use jwt::{create_access_token, create_token_with_expiry, verify_token};
