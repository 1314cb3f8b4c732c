use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::content::adapter::outgoing::mapping::{map_db_err, now};
use crate::modules::content::adapter::outgoing::sea_orm_entity::profile::{
    self, ActiveModel, Column, Entity,
};
use crate::modules::content::application::domain::entities::{Profile, ProfileDraft};
use crate::modules::content::application::ports::outgoing::{
    ContentRepository, ContentRepositoryError,
};

/// The `profile` table holds at most one row; `list` returns it (or nothing)
/// so the singleton shares the collection port.
#[derive(Clone)]
pub struct ProfileRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProfileRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentRepository<Profile> for ProfileRepositoryPostgres {
    async fn list(&self) -> Result<Vec<Profile>, ContentRepositoryError> {
        let row = Entity::find()
            .order_by_asc(Column::CreatedAt)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.into_iter().map(model_to_profile).collect())
    }

    async fn insert(&self, draft: ProfileDraft) -> Result<Profile, ContentRepositoryError> {
        let stamp = now();
        let mut model = draft_to_active(draft);
        model.id = Set(Uuid::new_v4());
        model.created_at = Set(stamp);
        model.updated_at = Set(stamp);

        let saved = model.insert(&*self.db).await.map_err(map_db_err)?;

        Ok(model_to_profile(saved))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: ProfileDraft,
    ) -> Result<Profile, ContentRepositoryError> {
        let mut model = draft_to_active(draft);
        model.updated_at = Set(now());

        let saved = Entity::update_many()
            .set(model)
            .filter(Column::Id.eq(id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .next()
            .ok_or(ContentRepositoryError::NotFound)?;

        Ok(model_to_profile(saved))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ContentRepositoryError> {
        let res = Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if res.rows_affected == 0 {
            return Err(ContentRepositoryError::NotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn draft_to_active(draft: ProfileDraft) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        name: Set(draft.name),
        title: Set(draft.title),
        bio: Set(draft.bio),
        location: Set(draft.location),
        email: Set(draft.email),
        phone: Set(draft.phone),
        github_url: Set(draft.github_url),
        linkedin_url: Set(draft.linkedin_url),
        website_url: Set(draft.website_url),
        avatar_url: Set(draft.avatar_url),
        resume_url: Set(draft.resume_url),
        years_of_experience: Set(draft.years_of_experience),
        created_at: NotSet,
        updated_at: NotSet,
    }
}

fn model_to_profile(model: profile::Model) -> Profile {
    Profile {
        id: model.id,
        name: model.name,
        title: model.title,
        bio: model.bio,
        location: model.location,
        email: model.email,
        phone: model.phone,
        github_url: model.github_url,
        linkedin_url: model.linkedin_url,
        website_url: model.website_url,
        avatar_url: model.avatar_url,
        resume_url: model.resume_url,
        years_of_experience: model.years_of_experience,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}
