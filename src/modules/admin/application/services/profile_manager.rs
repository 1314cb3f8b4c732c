use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::entity_manager::{attach_media, store_error, CollectionManager};
use crate::modules::admin::application::domain::manager::{
    CollectionSnapshot, Confirmation, ManagerError,
};
use crate::modules::content::application::domain::entities::{Collection, Profile};
use crate::modules::content::application::domain::form::FormData;
use crate::modules::content::application::domain::schemas::FormEntity;
use crate::modules::content::application::ports::outgoing::ContentRepository;
use crate::modules::media::application::domain::entities::UploadFile;
use crate::modules::media::application::ports::incoming::use_cases::UploadMedia;
use crate::modules::portfolio::application::ports::incoming::use_cases::PageRevalidator;

/// The profile is a single record: saving updates the one held, or creates
/// it when none exists yet. It cannot be deleted from the console.
pub struct ProfileManager {
    repo: Arc<dyn ContentRepository<Profile>>,
    uploads: Arc<dyn UploadMedia>,
    revalidator: Arc<dyn PageRevalidator>,
    profile: Option<Profile>,
    form: Option<FormData>,
}

impl ProfileManager {
    pub fn new(
        repo: Arc<dyn ContentRepository<Profile>>,
        uploads: Arc<dyn UploadMedia>,
        revalidator: Arc<dyn PageRevalidator>,
    ) -> Self {
        Self {
            repo,
            uploads,
            revalidator,
            profile: None,
            form: None,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub async fn save(
        &mut self,
        mut form: FormData,
        upload: Option<UploadFile>,
    ) -> Result<Profile, ManagerError> {
        Profile::schema()
            .validate(&form)
            .map_err(ManagerError::Validation)?;

        let current = self.current().await?;

        attach_media::<Profile>(
            self.uploads.as_ref(),
            &mut form,
            upload,
            current.as_ref(),
        )
        .await?;

        let draft = Profile::draft_from_form(&form).map_err(ManagerError::Validation)?;

        let saved = match &current {
            Some(current) => self.repo.update(current.id, draft).await,
            None => self.repo.insert(draft).await,
        }
        .map_err(|e| store_error(Collection::Profile, "save", e))?;

        info!("profile {} saved", saved.id);

        self.profile = Some(saved.clone());
        self.form = None;
        self.revalidator.revalidate().await;

        Ok(saved)
    }

    /// The held row, or whatever the store has when nothing is held. The
    /// store decides between insert and update, not the local copy.
    async fn current(&self) -> Result<Option<Profile>, ManagerError> {
        if let Some(held) = &self.profile {
            return Ok(Some(held.clone()));
        }
        let rows = self
            .repo
            .list()
            .await
            .map_err(|e| store_error(Collection::Profile, "save", e))?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl CollectionManager for ProfileManager {
    fn collection(&self) -> Collection {
        Collection::Profile
    }

    async fn load(&mut self) -> Result<(), ManagerError> {
        let rows = self
            .repo
            .list()
            .await
            .map_err(|e| store_error(Collection::Profile, "load", e))?;
        self.profile = rows.into_iter().next();
        Ok(())
    }

    fn edit(&mut self, id: Uuid) -> Result<FormData, ManagerError> {
        let form = self
            .profile
            .as_ref()
            .filter(|p| p.id == id)
            .map(|p| p.to_form())
            .ok_or(ManagerError::NotFound)?;
        self.form = Some(form.clone());
        Ok(form)
    }

    fn cancel_edit(&mut self) {
        self.form = None;
    }

    fn editing(&self) -> Option<Uuid> {
        self.form
            .as_ref()
            .and(self.profile.as_ref())
            .map(|p| p.id)
    }

    async fn submit(
        &mut self,
        form: FormData,
        upload: Option<UploadFile>,
    ) -> Result<serde_json::Value, ManagerError> {
        let saved = self.save(form, upload).await?;
        serde_json::to_value(&saved).map_err(|e| ManagerError::Store(e.to_string()))
    }

    async fn delete(&mut self, _id: Uuid, _confirmation: Confirmation) -> Result<(), ManagerError> {
        Err(ManagerError::Unsupported("the profile cannot be deleted"))
    }

    fn snapshot(&self) -> CollectionSnapshot {
        CollectionSnapshot {
            collection: Collection::Profile,
            items: self
                .profile
                .iter()
                .filter_map(|p| serde_json::to_value(p).ok())
                .collect(),
            editing: self.editing(),
            form: self
                .form
                .clone()
                .or_else(|| self.profile.as_ref().map(|p| p.to_form())),
        }
    }

    fn len(&self) -> usize {
        usize::from(self.profile.is_some())
    }

    fn clear(&mut self) {
        self.profile = None;
        self.form = None;
    }
}
