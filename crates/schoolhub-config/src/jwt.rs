use crate::{ConfigError, parsed_or, required};

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime in seconds of tokens minted by `schoolhub-cli issue-token`.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: required("JWT_SECRET")?,
            access_token_expiry: parsed_or("JWT_ACCESS_EXPIRY", 3600)?, // 1 hour
        })
    }
}
