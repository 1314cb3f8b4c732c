use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RevocationError {
    #[error("Revocation store error: {0}")]
    Store(String),
}

/// Signed-out sessions. Entries only need to outlive the token they revoke.
#[async_trait]
pub trait SessionRevocation: Send + Sync {
    async fn revoke(&self, session_id: Uuid, ttl_seconds: i64) -> Result<(), RevocationError>;

    async fn is_revoked(&self, session_id: Uuid) -> Result<bool, RevocationError>;
}
