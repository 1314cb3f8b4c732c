use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::content::adapter::outgoing::mapping::{from_json, map_db_err, now, to_json};
use crate::modules::content::adapter::outgoing::sea_orm_entity::projects::{
    self, ActiveModel, Column, Entity,
};
use crate::modules::content::application::domain::entities::{Project, ProjectDraft};
use crate::modules::content::application::ports::outgoing::{
    ContentRepository, ContentRepositoryError,
};

// ============================================================================
// Repository Implementation
// ============================================================================

#[derive(Clone)]
pub struct ProjectRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProjectRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentRepository<Project> for ProjectRepositoryPostgres {
    async fn list(&self) -> Result<Vec<Project>, ContentRepositoryError> {
        let rows = Entity::find()
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        rows.into_iter().map(model_to_project).collect()
    }

    async fn insert(&self, draft: ProjectDraft) -> Result<Project, ContentRepositoryError> {
        let mut model = draft_to_active(draft)?;
        model.id = Set(Uuid::new_v4());
        model.created_at = Set(now());

        let saved = model.insert(&*self.db).await.map_err(map_db_err)?;

        model_to_project(saved)
    }

    async fn update(
        &self,
        id: Uuid,
        draft: ProjectDraft,
    ) -> Result<Project, ContentRepositoryError> {
        let saved = Entity::update_many()
            .set(draft_to_active(draft)?)
            .filter(Column::Id.eq(id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .next()
            .ok_or(ContentRepositoryError::NotFound)?;

        model_to_project(saved)
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

fn draft_to_active(draft: ProjectDraft) -> Result<ActiveModel, ContentRepositoryError> {
    Ok(ActiveModel {
        id: NotSet,
        title: Set(draft.title),
        description: Set(draft.description),
        technologies: Set(to_json(&draft.technologies)?),
        github_url: Set(draft.github_url),
        live_url: Set(draft.live_url),
        image_url: Set(draft.image_url),
        featured: Set(draft.featured),
        created_at: NotSet,
    })
}

fn model_to_project(model: projects::Model) -> Result<Project, ContentRepositoryError> {
    Ok(Project {
        id: model.id,
        title: model.title,
        description: model.description,
        technologies: from_json(&model.technologies)?,
        github_url: model.github_url,
        live_url: model.live_url,
        image_url: model.image_url,
        featured: model.featured,
        created_at: model.created_at.into(),
    })
}

// ============================================================================
// Tests
// ============================================================================
