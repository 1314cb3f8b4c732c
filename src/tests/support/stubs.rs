use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::modules::admin::application::domain::session::{Credentials, Session};
use crate::modules::admin::application::ports::outgoing::{IdentityError, IdentityProvider};
use crate::modules::media::application::domain::entities::{
    generate_object_key, Bucket, UploadFile, UploadResult,
};
use crate::modules::media::application::ports::incoming::use_cases::{UploadError, UploadMedia};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse";

// ============================================================================
// Identity
// ============================================================================

/// A single-admin identity provider that keeps its sessions in memory.
pub struct StubIdentity {
    admin_id: Uuid,
    password: Mutex<String>,
    sessions: Mutex<HashMap<String, Session>>,
    sign_in_calls: AtomicUsize,
}

impl Default for StubIdentity {
    fn default() -> Self {
        Self {
            admin_id: Uuid::new_v4(),
            password: Mutex::new(ADMIN_PASSWORD.to_string()),
            sessions: Mutex::new(HashMap::new()),
            sign_in_calls: AtomicUsize::new(0),
        }
    }
}

impl StubIdentity {
    /// Opens a session without going through `sign_in` and returns its token.
    pub fn issue(&self) -> String {
        self.open_session().access_token
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn current(&self, access_token: &str) -> Option<Session> {
        self.sessions.lock().unwrap().get(access_token).cloned()
    }

    pub fn revoke_all(&self) {
        self.sessions.lock().unwrap().clear();
    }

    pub fn password(&self) -> String {
        self.password.lock().unwrap().clone()
    }

    fn open_session(&self) -> Session {
        let session = Session {
            session_id: Uuid::new_v4(),
            admin_id: self.admin_id,
            email: ADMIN_EMAIL.to_string(),
            access_token: format!("stub-token-{}", Uuid::new_v4()),
            expires_at: Utc::now() + Duration::hours(1),
        };
        self.sessions
            .lock()
            .unwrap()
            .insert(session.access_token.clone(), session.clone());
        session
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, IdentityError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        if credentials.email != ADMIN_EMAIL || credentials.password != self.password() {
            return Err(IdentityError::InvalidCredentials);
        }
        Ok(self.open_session())
    }

    async fn sign_out(&self, session: &Session) -> Result<(), IdentityError> {
        self.sessions.lock().unwrap().remove(&session.access_token);
        Ok(())
    }

    async fn current_session(&self, access_token: &str) -> Result<Option<Session>, IdentityError> {
        Ok(self.current(access_token))
    }

    async fn update_password(
        &self,
        _session: &Session,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let mut password = self.password.lock().unwrap();
        if *password != current_password {
            return Err(IdentityError::InvalidCredentials);
        }
        *password = new_password.to_string();
        Ok(())
    }
}

/// Every call fails as if the backend were down.
pub struct UnreachableIdentity;

#[async_trait]
impl IdentityProvider for UnreachableIdentity {
    async fn sign_in(&self, _credentials: &Credentials) -> Result<Session, IdentityError> {
        Err(IdentityError::Backend("connection refused".to_string()))
    }

    async fn sign_out(&self, _session: &Session) -> Result<(), IdentityError> {
        Err(IdentityError::Backend("connection refused".to_string()))
    }

    async fn current_session(&self, _access_token: &str) -> Result<Option<Session>, IdentityError> {
        Err(IdentityError::Backend("connection refused".to_string()))
    }

    async fn update_password(
        &self,
        _session: &Session,
        _current_password: &str,
        _new_password: &str,
    ) -> Result<(), IdentityError> {
        Err(IdentityError::Backend("connection refused".to_string()))
    }
}

// ============================================================================
// Uploads
// ============================================================================

/// Honors each bucket's allow-list and hands back `https://cdn.test` URLs.
#[derive(Default)]
pub struct FakeUploads {
    calls: AtomicUsize,
    deleted: Mutex<Vec<(Bucket, String)>>,
    fail: Mutex<Option<String>>,
}

impl FakeUploads {
    pub fn png(name: &str) -> UploadFile {
        UploadFile {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: bytes::Bytes::from_static(b"\x89PNG\r\n\x1a\n"),
        }
    }

    /// Makes every later upload fail with a storage error.
    pub fn failing(message: &str) -> Self {
        let uploads = Self::default();
        *uploads.fail.lock().unwrap() = Some(message.to_string());
        uploads
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn deleted(&self) -> Vec<(Bucket, String)> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadMedia for FakeUploads {
    async fn upload(
        &self,
        file: UploadFile,
        bucket: Bucket,
        path: Option<String>,
    ) -> Result<UploadResult, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !bucket.allows(&file.content_type) {
            return Err(UploadError::TypeNotAllowed {
                mime: file.content_type,
                bucket,
            });
        }
        if let Some(message) = self.fail.lock().unwrap().clone() {
            return Err(UploadError::Storage(message));
        }

        let path = path.unwrap_or_else(|| generate_object_key(&file.file_name));
        Ok(UploadResult {
            url: format!("https://cdn.test/{}/{}", bucket, path),
            path,
        })
    }

    async fn delete_file(&self, bucket: Bucket, path: &str) -> bool {
        self.deleted.lock().unwrap().push((bucket, path.to_string()));
        true
    }
}
