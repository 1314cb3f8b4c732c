use anyhow::Context;
use std::env;
use std::str::FromStr;

use crate::modules::admin::adapter::outgoing::jwt::JwtConfig;
use crate::modules::admin::adapter::outgoing::security::argon2_hasher::{
    DEFAULT_ITERATIONS, DEFAULT_MEMORY_KIB, DEFAULT_PARALLELISM,
};

pub const DEFAULT_PAGE_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argon2Config {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Clone, PartialEq, Eq)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub redis_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub argon2: Argon2Config,
    pub storage_bucket_prefix: String,
    pub storage_public_base_url: String,
    pub page_cache_ttl_secs: u64,
    pub max_upload_bytes: usize,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

fn require_env(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{key} is not set in .env file"))
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Reads the process environment. Call after the `.env` file is loaded.
    pub fn from_env() -> anyhow::Result<Self> {
        let bootstrap_admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.trim().is_empty() => {
                Some(BootstrapAdmin { email, password })
            }
            _ => None,
        };

        Ok(Self {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            host: env_or("HOST", "127.0.0.1"),
            port: parse_env("PORT", 8080)?,
            jwt: JwtConfig::from_env()?,
            argon2: Argon2Config {
                memory_kib: parse_env("ARGON2_MEMORY_KIB", DEFAULT_MEMORY_KIB)?,
                iterations: parse_env("ARGON2_ITERATIONS", DEFAULT_ITERATIONS)?,
                parallelism: parse_env("ARGON2_PARALLELISM", DEFAULT_PARALLELISM)?,
            },
            storage_bucket_prefix: env_or("STORAGE_BUCKET_PREFIX", "portfolio"),
            storage_public_base_url: env_or(
                "STORAGE_PUBLIC_BASE_URL",
                "https://storage.googleapis.com",
            ),
            page_cache_ttl_secs: parse_env("PAGE_CACHE_TTL_SECS", DEFAULT_PAGE_CACHE_TTL_SECS)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            bootstrap_admin,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
