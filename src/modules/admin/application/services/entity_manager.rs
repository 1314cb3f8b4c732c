use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::modules::admin::application::domain::manager::{
    CollectionSnapshot, Confirmation, ManagerError,
};
use crate::modules::content::application::domain::entities::{Collection, ContentEntity};
use crate::modules::content::application::domain::form::FormData;
use crate::modules::content::application::domain::schemas::FormEntity;
use crate::modules::content::application::ports::outgoing::{
    ContentRepository, ContentRepositoryError,
};
use crate::modules::media::application::domain::entities::UploadFile;
use crate::modules::media::application::ports::incoming::use_cases::UploadMedia;
use crate::modules::portfolio::application::ports::incoming::use_cases::PageRevalidator;

/// Object-safe view of a manager so the console and the routes can address
/// any collection by name.
#[async_trait]
pub trait CollectionManager: Send + Sync {
    fn collection(&self) -> Collection;

    /// Replaces local state with the store's ordered list.
    async fn load(&mut self) -> Result<(), ManagerError>;

    /// Puts the manager in edit mode for `id` and returns the prefilled form.
    fn edit(&mut self, id: Uuid) -> Result<FormData, ManagerError>;

    fn cancel_edit(&mut self);

    fn editing(&self) -> Option<Uuid>;

    /// Validates, uploads the attachment if any, then updates the record being
    /// edited or inserts a new one. Returns the saved record.
    async fn submit(
        &mut self,
        form: FormData,
        upload: Option<UploadFile>,
    ) -> Result<serde_json::Value, ManagerError>;

    async fn delete(&mut self, id: Uuid, confirmation: Confirmation) -> Result<(), ManagerError>;

    fn snapshot(&self) -> CollectionSnapshot;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops local state and leaves edit mode. No store call.
    fn clear(&mut self);
}

// ============================================================================
// Shared steps
// ============================================================================

pub(crate) fn store_error(collection: Collection, op: &str, e: ContentRepositoryError) -> ManagerError {
    match e {
        ContentRepositoryError::NotFound => {
            warn!("{} {}: record not found", collection, op);
            ManagerError::NotFound
        }
        other => {
            error!("{} {} failed: {}", collection, op, other);
            ManagerError::Store(other.to_string())
        }
    }
}

/// Runs the upload for `E`'s media field and writes the public URL into the
/// form. Without an upload, an edit keeps the record's current media URL
/// unless the form sets that field itself.
pub(crate) async fn attach_media<E: FormEntity>(
    uploads: &dyn UploadMedia,
    form: &mut FormData,
    upload: Option<UploadFile>,
    current: Option<&E>,
) -> Result<(), ManagerError> {
    match (upload, E::MEDIA) {
        (Some(_), None) => Err(ManagerError::Unsupported(
            "this collection has no media field",
        )),
        (Some(file), Some(slot)) => {
            let uploaded = uploads
                .upload(file, slot.bucket, None)
                .await
                .map_err(|e| {
                    error!("{} media upload failed: {}", E::COLLECTION, e);
                    ManagerError::Upload(e)
                })?;
            form.set(slot.field, uploaded.url);
            Ok(())
        }
        (None, Some(slot)) => {
            if !form.contains(slot.field) {
                if let Some(url) = current.and_then(|r| r.media_url()) {
                    form.set(slot.field, url);
                }
            }
            Ok(())
        }
        (None, None) => Ok(()),
    }
}

fn to_json<E: ContentEntity>(record: &E) -> Result<serde_json::Value, ManagerError> {
    serde_json::to_value(record).map_err(|e| ManagerError::Store(e.to_string()))
}

// ============================================================================
// EntityManager
// ============================================================================

/// Local list state plus create / edit / delete for one list collection.
pub struct EntityManager<E: FormEntity> {
    repo: Arc<dyn ContentRepository<E>>,
    uploads: Arc<dyn UploadMedia>,
    revalidator: Arc<dyn PageRevalidator>,
    items: Vec<E>,
    editing: Option<Uuid>,
    form: Option<FormData>,
}

impl<E: FormEntity> EntityManager<E> {
    pub fn new(
        repo: Arc<dyn ContentRepository<E>>,
        uploads: Arc<dyn UploadMedia>,
        revalidator: Arc<dyn PageRevalidator>,
    ) -> Self {
        Self {
            repo,
            uploads,
            revalidator,
            items: Vec::new(),
            editing: None,
            form: None,
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// Loads `record` into the form without persisting anything.
    pub fn edit_record(&mut self, record: &E) -> FormData {
        let form = record.to_form();
        self.editing = Some(record.id());
        self.form = Some(form.clone());
        form
    }

    pub async fn submit_record(
        &mut self,
        mut form: FormData,
        upload: Option<UploadFile>,
    ) -> Result<E, ManagerError> {
        E::schema().validate(&form).map_err(ManagerError::Validation)?;

        let current = self
            .editing
            .and_then(|id| self.items.iter().find(|r| r.id() == id));
        attach_media::<E>(self.uploads.as_ref(), &mut form, upload, current).await?;

        let draft = E::draft_from_form(&form).map_err(ManagerError::Validation)?;

        let saved = match self.editing {
            Some(id) => self.repo.update(id, draft).await,
            None => self.repo.insert(draft).await,
        }
        .map_err(|e| store_error(E::COLLECTION, "save", e))?;

        match self.repo.list().await {
            Ok(items) => self.items = items,
            Err(e) => {
                warn!(
                    "{} refetch after save failed, merging locally: {}",
                    E::COLLECTION,
                    e
                );
                self.items.retain(|r| r.id() != saved.id());
                self.items.push(saved.clone());
                self.items.sort_by(E::display_order);
            }
        }

        info!("{} record {} saved", E::COLLECTION, saved.id());

        self.editing = None;
        self.form = None;
        self.revalidator.revalidate().await;

        Ok(saved)
    }
}

#[async_trait]
impl<E: FormEntity> CollectionManager for EntityManager<E> {
    fn collection(&self) -> Collection {
        E::COLLECTION
    }

    async fn load(&mut self) -> Result<(), ManagerError> {
        self.items = self
            .repo
            .list()
            .await
            .map_err(|e| store_error(E::COLLECTION, "load", e))?;
        Ok(())
    }

    fn edit(&mut self, id: Uuid) -> Result<FormData, ManagerError> {
        let record = self
            .items
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(ManagerError::NotFound)?;
        Ok(self.edit_record(&record))
    }

    fn cancel_edit(&mut self) {
        self.editing = None;
        self.form = None;
    }

    fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    async fn submit(
        &mut self,
        form: FormData,
        upload: Option<UploadFile>,
    ) -> Result<serde_json::Value, ManagerError> {
        let saved = self.submit_record(form, upload).await?;
        to_json(&saved)
    }

    async fn delete(&mut self, id: Uuid, confirmation: Confirmation) -> Result<(), ManagerError> {
        if confirmation != Confirmation::Confirmed {
            return Err(ManagerError::NotConfirmed);
        }

        self.repo
            .delete(id)
            .await
            .map_err(|e| store_error(E::COLLECTION, "delete", e))?;

        self.items.retain(|r| r.id() != id);
        if self.editing == Some(id) {
            self.cancel_edit();
        }

        info!("{} record {} deleted", E::COLLECTION, id);
        self.revalidator.revalidate().await;

        Ok(())
    }

    fn snapshot(&self) -> CollectionSnapshot {
        CollectionSnapshot {
            collection: E::COLLECTION,
            items: self
                .items
                .iter()
                .filter_map(|r| serde_json::to_value(r).ok())
                .collect(),
            editing: self.editing,
            form: self.form.clone(),
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
        self.cancel_edit();
    }
}
