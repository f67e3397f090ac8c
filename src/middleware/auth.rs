use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use schoolhub_auth::{Claims, verify_token};
use schoolhub_core::AppError;
use schoolhub_observability::track_auth_failure;
use tracing::debug;

use crate::state::AppState;

/// Claims of the caller, placed in the request extensions by [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> &str {
        &self.0.user_id
    }
}

/// Verifies the bearer token and attaches [`AuthUser`] to the request.
///
/// Every failure answers the same 401; the reason only reaches the debug log.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(authorization) = req.headers().typed_get::<Authorization<Bearer>>() else {
        debug!("Missing or malformed authorization header");
        track_auth_failure("missing_token");
        return Err(AppError::unauthorized());
    };

    let claims = verify_token(authorization.token(), &state.jwt_config).inspect_err(|_| {
        track_auth_failure("invalid_token");
    })?;

    debug!(user.id = %claims.user_id, user.role = %claims.role, "Authenticated request");
    req.extensions_mut().insert(AuthUser(claims));
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(AppError::unauthorized)
    }
}
