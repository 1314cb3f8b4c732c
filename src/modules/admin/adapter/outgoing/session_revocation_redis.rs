use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::admin::application::ports::outgoing::{RevocationError, SessionRevocation};

/// Signed-out admin sessions kept in Redis.
///
/// ```text
/// admin:revoked_session:{session_id} -> "1"
/// ```
///
/// The key lives as long as the access token it revokes; Redis TTL does the
/// cleanup.
#[derive(Clone)]
pub struct RedisSessionRevocation {
    pool: Arc<Pool>,
}

impl RedisSessionRevocation {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    fn session_key(session_id: Uuid) -> String {
        format!("admin:revoked_session:{session_id}")
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, RevocationError> {
        self.pool
            .get()
            .await
            .map_err(|e| RevocationError::Store(format!("Pool error: {}", e)))
    }
}

#[async_trait]
impl SessionRevocation for RedisSessionRevocation {
    async fn revoke(&self, session_id: Uuid, ttl_seconds: i64) -> Result<(), RevocationError> {
        // Already expired tokens need no entry
        let Ok(ttl) = u64::try_from(ttl_seconds) else {
            return Ok(());
        };
        if ttl == 0 {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        conn.set_ex::<_, _, ()>(Self::session_key(session_id), "1", ttl)
            .await
            .map_err(|e| RevocationError::Store(e.to_string()))?;

        Ok(())
    }

    async fn is_revoked(&self, session_id: Uuid) -> Result<bool, RevocationError> {
        let mut conn = self.get_conn().await?;

        let exists: bool = conn
            .exists(Self::session_key(session_id))
            .await
            .map_err(|e| RevocationError::Store(e.to_string()))?;

        Ok(exists)
    }
}
