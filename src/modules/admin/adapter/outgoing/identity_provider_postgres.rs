use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::sea_orm_entity::admins::{self, ActiveModel, Column, Entity};
use crate::modules::admin::application::domain::session::{Credentials, Session};
use crate::modules::admin::application::ports::outgoing::{
    IdentityError, IdentityProvider, PasswordHasher, SessionRevocation, TokenProvider,
};

/// Admin accounts in Postgres, sessions as signed access tokens, sign-out as
/// a revocation entry keyed by session id.
#[derive(Clone)]
pub struct PostgresIdentityProvider {
    db: Arc<DatabaseConnection>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenProvider>,
    revocation: Arc<dyn SessionRevocation>,
}

fn backend<E: std::fmt::Display>(e: E) -> IdentityError {
    IdentityError::Backend(e.to_string())
}

impl PostgresIdentityProvider {
    pub fn new(
        db: Arc<DatabaseConnection>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenProvider>,
        revocation: Arc<dyn SessionRevocation>,
    ) -> Self {
        Self {
            db,
            hasher,
            tokens,
            revocation,
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<admins::Model>, IdentityError> {
        Entity::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&*self.db)
            .await
            .map_err(backend)
    }

    /// Creates the first admin account when no account with `email` exists.
    /// Returns `true` when a row was inserted.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool, IdentityError> {
        let credentials = Credentials::new(email, password)
            .map_err(|e| IdentityError::Backend(format!("Invalid bootstrap admin: {e}")))?;

        if self.find_by_email(&credentials.email).await?.is_some() {
            debug!("Bootstrap admin {} already exists", credentials.email);
            return Ok(false);
        }

        let password_hash = self
            .hasher
            .hash_password(&credentials.password)
            .await
            .map_err(backend)?;

        let now = Utc::now().fixed_offset();
        ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(credentials.email.clone()),
            password_hash: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await
        .map_err(backend)?;

        info!("Bootstrap admin {} created", credentials.email);
        Ok(true)
    }
}

#[async_trait]
impl IdentityProvider for PostgresIdentityProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, IdentityError> {
        let admin = self
            .find_by_email(&credentials.email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        let matches = self
            .hasher
            .verify_password(&credentials.password, &admin.password_hash)
            .await
            .map_err(|e| {
                error!("Password verification failed for {}: {}", admin.email, e);
                backend(e)
            })?;
        if !matches {
            return Err(IdentityError::InvalidCredentials);
        }

        let session_id = Uuid::new_v4();
        let issued = self
            .tokens
            .issue_access_token(admin.id, session_id, &admin.email)
            .map_err(backend)?;

        Ok(Session {
            session_id,
            admin_id: admin.id,
            email: admin.email,
            access_token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    async fn sign_out(&self, session: &Session) -> Result<(), IdentityError> {
        let ttl = (session.expires_at - Utc::now()).num_seconds();
        self.revocation
            .revoke(session.session_id, ttl)
            .await
            .map_err(|e| {
                error!("Failed to revoke session {}: {}", session.session_id, e);
                backend(e)
            })
    }

    async fn current_session(&self, access_token: &str) -> Result<Option<Session>, IdentityError> {
        let claims = match self.tokens.verify_access_token(access_token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!("Access token rejected: {}", e);
                return Ok(None);
            }
        };

        // Fail closed: an unreachable revocation store is an error, not a pass.
        if self.revocation.is_revoked(claims.sid).await.map_err(backend)? {
            debug!("Session {} was signed out", claims.sid);
            return Ok(None);
        }

        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);

        Ok(Some(Session {
            session_id: claims.sid,
            admin_id: claims.sub,
            email: claims.email,
            access_token: access_token.to_string(),
            expires_at,
        }))
    }

    async fn update_password(
        &self,
        session: &Session,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let admin = Entity::find_by_id(session.admin_id)
            .one(&*self.db)
            .await
            .map_err(backend)?
            .ok_or_else(|| {
                warn!("Session {} refers to a missing admin", session.session_id);
                IdentityError::Backend("Admin account not found".to_string())
            })?;

        let matches = self
            .hasher
            .verify_password(current_password, &admin.password_hash)
            .await
            .map_err(backend)?;
        if !matches {
            return Err(IdentityError::InvalidCredentials);
        }

        let password_hash = self
            .hasher
            .hash_password(new_password)
            .await
            .map_err(backend)?;

        let mut active: ActiveModel = admin.into();
        active.password_hash = Set(password_hash);
        active.update(&*self.db).await.map_err(backend)?;

        info!("Password updated for admin {}", session.admin_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::admin::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
    use crate::modules::admin::application::ports::outgoing::{HashError, RevocationError};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Stores passwords as `plain:<password>`.
    struct PlainHasher;

    #[async_trait]
    impl PasswordHasher for PlainHasher {
        async fn hash_password(&self, password: &str) -> Result<String, HashError> {
            Ok(format!("plain:{password}"))
        }

        async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
            Ok(hash == format!("plain:{password}"))
        }
    }

    #[derive(Default)]
    struct MemoryRevocation {
        revoked: Mutex<HashSet<Uuid>>,
    }

    #[async_trait]
    impl SessionRevocation for MemoryRevocation {
        async fn revoke(&self, session_id: Uuid, _ttl: i64) -> Result<(), RevocationError> {
            self.revoked.lock().unwrap().insert(session_id);
            Ok(())
        }

        async fn is_revoked(&self, session_id: Uuid) -> Result<bool, RevocationError> {
            Ok(self.revoked.lock().unwrap().contains(&session_id))
        }
    }

    fn tokens() -> Arc<JwtTokenService> {
        Arc::new(JwtTokenService::new(JwtConfig {
            secret_key: "FAKE_JWT_SECRET_DO_NOT_USE_IN_PROD".to_string(),
            issuer: "test_issuer".to_string(),
            access_token_expiry: 600,
        }))
    }

    fn admin_row(email: &str, password: &str) -> admins::Model {
        let now = Utc::now().fixed_offset();
        admins::Model {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: format!("plain:{password}"),
            created_at: now,
            updated_at: now,
        }
    }

    fn provider(db: MockDatabase) -> PostgresIdentityProvider {
        PostgresIdentityProvider::new(
            Arc::new(db.into_connection()),
            Arc::new(PlainHasher),
            tokens(),
            Arc::new(MemoryRevocation::default()),
        )
    }

    fn creds(password: &str) -> Credentials {
        Credentials::new("admin@example.com", password).unwrap()
    }

    #[tokio::test]
    async fn test_sign_in_issues_verifiable_session() {
        let row = admin_row("admin@example.com", "secret1");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row.clone()]]);
        let identity = provider(db);

        let session = identity.sign_in(&creds("secret1")).await.unwrap();

        assert_eq!(session.admin_id, row.id);
        assert_eq!(session.email, "admin@example.com");
        assert!(!session.is_expired());

        let current = identity
            .current_session(&session.access_token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.session_id, session.session_id);
        assert_eq!(current.expires_at.timestamp(), session.expires_at.timestamp());
    }

    #[tokio::test]
    async fn test_sign_in_unknown_email_is_invalid_credentials() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<admins::Model>::new()]);

        let err = provider(db).sign_in(&creds("secret1")).await.unwrap_err();

        assert_eq!(err, IdentityError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password_is_invalid_credentials() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![admin_row("admin@example.com", "secret1")]]);

        let err = provider(db).sign_in(&creds("secret2")).await.unwrap_err();

        assert_eq!(err, IdentityError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_signed_out_session_is_no_longer_current() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![admin_row("admin@example.com", "secret1")]]);
        let identity = provider(db);
        let session = identity.sign_in(&creds("secret1")).await.unwrap();

        identity.sign_out(&session).await.unwrap();

        assert_eq!(identity.current_session(&session.access_token).await, Ok(None));
    }

    #[tokio::test]
    async fn test_garbage_token_has_no_session() {
        let identity = provider(MockDatabase::new(DatabaseBackend::Postgres));

        assert_eq!(identity.current_session("not-a-token").await, Ok(None));
    }

    #[tokio::test]
    async fn test_update_password_checks_current_password() {
        let row = admin_row("admin@example.com", "secret1");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row.clone()]]);
        let identity = provider(db);
        let session = Session {
            session_id: Uuid::new_v4(),
            admin_id: row.id,
            email: row.email.clone(),
            access_token: "t".to_string(),
            expires_at: Utc::now(),
        };

        let err = identity
            .update_password(&session, "not-it", "newpass1")
            .await
            .unwrap_err();

        assert_eq!(err, IdentityError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_update_password_stores_new_hash() {
        let row = admin_row("admin@example.com", "secret1");
        let mut updated = row.clone();
        updated.password_hash = "plain:newpass1".to_string();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row.clone()], vec![updated]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]);
        let identity = provider(db);
        let session = Session {
            session_id: Uuid::new_v4(),
            admin_id: row.id,
            email: row.email.clone(),
            access_token: "t".to_string(),
            expires_at: Utc::now(),
        };

        identity
            .update_password(&session, "secret1", "newpass1")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_ensure_admin_skips_existing_account() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![admin_row("admin@example.com", "secret1")]]);

        let created = provider(db)
            .ensure_admin("Admin@Example.com", "secret1")
            .await
            .unwrap();

        assert!(!created);
    }

    #[tokio::test]
    async fn test_ensure_admin_inserts_missing_account() {
        let row = admin_row("admin@example.com", "secret1");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<admins::Model>::new(), vec![row]]);

        let created = provider(db)
            .ensure_admin("admin@example.com", "secret1")
            .await
            .unwrap();

        assert!(created);
    }
}
