use async_trait::async_trait;

use crate::modules::admin::application::domain::session::{Credentials, Session};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Identity backend error: {0}")]
    Backend(String),
}

/// The external identity collaborator. Exactly these four calls.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, IdentityError>;

    async fn sign_out(&self, session: &Session) -> Result<(), IdentityError>;

    /// `None` when the token is missing, expired or revoked.
    async fn current_session(&self, access_token: &str) -> Result<Option<Session>, IdentityError>;

    /// Fails with `InvalidCredentials` when `current_password` is wrong.
    async fn update_password(
        &self,
        session: &Session,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), IdentityError>;
}
