//! Request gates for the `/api` routes.
//!
//! - [`auth`]: bearer-token verification and the [`AuthUser`](auth::AuthUser) extractor
//! - [`role`]: the per-route role gate
//!
//! # Chain
//!
//! 1. `authenticate` verifies `Authorization: Bearer <token>` and stores the claims
//!    in the request extensions, or answers 401
//! 2. `require_roles` compares the stored role with the route's [`RoleGate`](role::RoleGate),
//!    or answers 403
//! 3. The handler runs
//!
//! ```ignore
//! Router::new()
//!     .route("/", post(create_school))
//!     .route_layer(middleware::from_fn_with_state(SUPERADMIN_ONLY, require_roles))
//! ```

pub mod auth;
pub mod role;
