//! Role-based authorization middleware.
//!
//! A [`RoleGate`] is fixed when the router is built and carried as the state of
//! [`require_roles`]. It only reads the claims left by
//! [`authenticate`](crate::middleware::auth::authenticate), so it must sit inside it.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use schoolhub_auth::Role;
use schoolhub_core::AppError;
use schoolhub_observability::track_auth_failure;
use tracing::warn;

use crate::middleware::auth::AuthUser;

/// The roles permitted on a group of routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGate {
    allowed: &'static [Role],
}

/// School mutations.
pub const SUPERADMIN_ONLY: RoleGate = RoleGate::new(&[Role::Superadmin]);
/// Classroom and student mutations.
pub const ADMIN_ONLY: RoleGate = RoleGate::new(&[Role::Admin]);

impl RoleGate {
    pub const fn new(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    pub fn permits(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }
}

/// Answers 403 unless the caller's role is in the gate. Without claims (the gate
/// was mounted outside `authenticate`) it answers 401.
pub async fn require_roles(
    State(gate): State<RoleGate>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(AuthUser(claims)) = req.extensions().get::<AuthUser>() else {
        warn!("Role gate reached without an authenticated identity");
        track_auth_failure("missing_identity");
        return Err(AppError::unauthorized());
    };

    if !gate.permits(claims.role) {
        warn!(
            user.id = %claims.user_id,
            user.role = %claims.role,
            method = %req.method(),
            path = %req.uri().path(),
            "Role not permitted"
        );
        track_auth_failure("forbidden");
        return Err(AppError::forbidden());
    }

    Ok(next.run(req).await)
}
