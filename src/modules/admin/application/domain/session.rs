use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::Serialize;
use uuid::Uuid;

use crate::modules::content::application::domain::form::FieldErrors;

pub const MIN_PASSWORD_LEN: usize = 6;

/// An authenticated admin session as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub session_id: Uuid,
    pub admin_id: Uuid,
    pub email: String,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Not checked yet.
    Unknown,
    Authenticated(Session),
    Unauthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    SignedOut,
}

/// What the admin surface should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminView {
    Loading,
    Login,
    Console,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Result<Self, FieldErrors> {
        let email = email.trim();
        let mut errors = FieldErrors::new();

        if !EmailAddress::is_valid(email) {
            errors.add("email", "Please enter a valid email");
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            errors.add("password", "Password must be at least 6 characters");
        }

        errors.into_result()?;

        Ok(Self {
            email: email.to_lowercase(),
            password: password.to_string(),
        })
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}

impl PasswordChange {
    pub fn new(current: &str, new: &str, confirm: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let short = |s: &str| s.chars().count() < MIN_PASSWORD_LEN;

        if short(current) {
            errors.add("current_password", "Current password is required");
        }
        if short(new) {
            errors.add("new_password", "New password must be at least 6 characters");
        }
        if short(confirm) {
            errors.add("confirm_password", "Please confirm your new password");
        } else if new != confirm {
            errors.add("confirm_password", "Passwords don't match");
        }

        errors.into_result()?;

        Ok(Self {
            current_password: current.to_string(),
            new_password: new.to_string(),
        })
    }
}
