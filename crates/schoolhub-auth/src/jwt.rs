//! JWT creation and verification.
//!
//! Tokens are HS256-signed with [`JwtConfig::secret`]. Verification checks the
//! signature and the `exp` claim; every failure collapses into the same
//! [`AppError::unauthorized`] so callers cannot tell a forged token from an
//! expired one.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use schoolhub_config::JwtConfig;
use schoolhub_core::AppError;

use crate::claims::{Claims, Role};

/// Creates a token for `user_id` with the configured lifetime.
pub fn create_access_token(
    user_id: &str,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    create_token_with_expiry(user_id, role, jwt_config.access_token_expiry, jwt_config)
}

/// Creates a token that expires `expiry_secs` from now. A negative value yields an
/// already-expired token.
pub fn create_token_with_expiry(
    user_id: &str,
    role: Role,
    expiry_secs: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = (now + expiry_secs).max(0) as usize;

    let claims = Claims {
        user_id: user_id.to_string(),
        role,
        exp,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies a token and returns its claims.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!(error = %e, "Token verification failed");
        AppError::unauthorized()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_round_trip_preserves_identity() {
        let jwt_config = config("test_secret_key_for_testing_purposes");
        let token = create_access_token("user-1", Role::Admin, &jwt_config).unwrap();

        let claims = verify_token(&token, &jwt_config).unwrap();
        assert_eq!(claims.user_id, "user-1");
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let token = create_access_token("user-1", Role::Admin, &config("one")).unwrap();
        let err = verify_token(&token, &config("two")).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.error.to_string(), "Authentication failed!");
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let jwt_config = config("secret");
        let token = create_token_with_expiry("user-1", Role::Admin, -3600, &jwt_config).unwrap();
        let err = verify_token(&token, &jwt_config).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_garbage_is_unauthorized() {
        let err = verify_token("not.a.token", &config("secret")).unwrap_err();
        assert_eq!(err.error.to_string(), "Authentication failed!");
    }
}
