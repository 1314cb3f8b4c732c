use anyhow::{bail, Context};
use std::env;

pub const DEFAULT_ISSUER: &str = "portfolio-cms";
const MIN_SECRET_LEN: usize = 32;
const MAX_ACCESS_EXPIRY: i64 = 86400;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64, // Expiration in seconds
}

impl JwtConfig {
    fn parse_expiry(key: &str, default: &str) -> anyhow::Result<i64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<i64>()
            .with_context(|| format!("Invalid {} value", key))
    }

    /// Load JWT configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let secret_key = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let access_token_expiry = Self::parse_expiry("JWT_ACCESS_EXPIRY", "3600")?;
        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.to_string());

        let config = Self {
            secret_key,
            issuer,
            access_token_expiry,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        // HS256 needs at least 32 bytes of key material
        if self.secret_key.len() < MIN_SECRET_LEN {
            bail!("JWT_SECRET must be at least 32 characters long for HS256 algorithm");
        }
        if self.access_token_expiry <= 0 || self.access_token_expiry > MAX_ACCESS_EXPIRY {
            bail!("JWT_ACCESS_EXPIRY must be between 1 and 86400 seconds (24 hours)");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, expiry: i64) -> JwtConfig {
        JwtConfig {
            secret_key: secret.to_string(),
            issuer: DEFAULT_ISSUER.to_string(),
            access_token_expiry: expiry,
        }
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let err = config("too-short", 3600).validate().unwrap_err();
        assert!(err.to_string().contains("at least 32 characters"));
    }

    #[test]
    fn test_expiry_must_be_within_a_day() {
        let secret = "0123456789abcdef0123456789abcdef";
        assert!(config(secret, 0).validate().is_err());
        assert!(config(secret, 86401).validate().is_err());
        assert!(config(secret, 86400).validate().is_ok());
    }
}
