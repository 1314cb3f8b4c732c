pub mod identity_provider_postgres;
pub mod jwt;
pub mod sea_orm_entity;
pub mod security;
pub mod session_revocation_redis;

pub use identity_provider_postgres::PostgresIdentityProvider;
pub use jwt::{JwtConfig, JwtTokenService};
pub use security::Argon2Hasher;
pub use session_revocation_redis::RedisSessionRevocation;
