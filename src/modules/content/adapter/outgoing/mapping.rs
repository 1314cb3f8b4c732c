use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::DbErr;

use crate::modules::content::application::ports::outgoing::ContentRepositoryError;

pub(crate) fn to_json<T: serde::Serialize>(
    data: &T,
) -> Result<serde_json::Value, ContentRepositoryError> {
    serde_json::to_value(data)
        .map_err(|e| ContentRepositoryError::SerializationError(e.to_string()))
}

pub(crate) fn from_json<T: serde::de::DeserializeOwned>(
    json: &serde_json::Value,
) -> Result<T, ContentRepositoryError> {
    serde_json::from_value(json.clone())
        .map_err(|e| ContentRepositoryError::SerializationError(e.to_string()))
}

pub(crate) fn map_db_err(e: DbErr) -> ContentRepositoryError {
    ContentRepositoryError::DatabaseError(e.to_string())
}

pub(crate) fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}
