use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::modules::content::application::domain::entities::Collection;
use crate::modules::content::application::domain::form::{FieldErrors, FormData};
use crate::modules::media::application::ports::incoming::use_cases::UploadError;

/// Deleting a record needs an explicit yes from the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManagerError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Deletion was not confirmed")]
    NotConfirmed,

    #[error("Record not found")]
    NotFound,

    #[error(transparent)]
    Upload(UploadError),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// One manager's local state as shown in the admin console.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSnapshot {
    pub collection: Collection,
    pub items: Vec<serde_json::Value>,
    /// Record currently loaded into the form, if editing.
    pub editing: Option<Uuid>,
    pub form: Option<FormData>,
}

/// Counts shown at the top of the admin console.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminOverview {
    pub profile_configured: bool,
    pub counts: BTreeMap<Collection, usize>,
}
