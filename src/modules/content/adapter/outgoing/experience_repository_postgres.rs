use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::content::adapter::outgoing::mapping::{from_json, map_db_err, now, to_json};
use crate::modules::content::adapter::outgoing::sea_orm_entity::experience::{
    self, ActiveModel, Column, Entity,
};
use crate::modules::content::application::domain::entities::{Experience, ExperienceDraft};
use crate::modules::content::application::ports::outgoing::{
    ContentRepository, ContentRepositoryError,
};

#[derive(Clone)]
pub struct ExperienceRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ExperienceRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentRepository<Experience> for ExperienceRepositoryPostgres {
    async fn list(&self) -> Result<Vec<Experience>, ContentRepositoryError> {
        let rows = Entity::find()
            .order_by_desc(Column::StartDate)
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        rows.into_iter().map(model_to_experience).collect()
    }

    async fn insert(&self, draft: ExperienceDraft) -> Result<Experience, ContentRepositoryError> {
        let mut model = draft_to_active(draft)?;
        model.id = Set(Uuid::new_v4());
        model.created_at = Set(now());

        let saved = model.insert(&*self.db).await.map_err(map_db_err)?;

        model_to_experience(saved)
    }

    async fn update(
        &self,
        id: Uuid,
        draft: ExperienceDraft,
    ) -> Result<Experience, ContentRepositoryError> {
        let saved = Entity::update_many()
            .set(draft_to_active(draft)?)
            .filter(Column::Id.eq(id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .next()
            .ok_or(ContentRepositoryError::NotFound)?;

        model_to_experience(saved)
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

fn draft_to_active(draft: ExperienceDraft) -> Result<ActiveModel, ContentRepositoryError> {
    Ok(ActiveModel {
        id: NotSet,
        company: Set(draft.company),
        position: Set(draft.position),
        start_date: Set(draft.start_date),
        end_date: Set(draft.end_date),
        description: Set(draft.description),
        technologies: Set(to_json(&draft.technologies)?),
        created_at: NotSet,
    })
}

fn model_to_experience(model: experience::Model) -> Result<Experience, ContentRepositoryError> {
    Ok(Experience {
        id: model.id,
        company: model.company,
        position: model.position,
        start_date: model.start_date,
        end_date: model.end_date,
        description: model.description,
        technologies: from_json(&model.technologies)?,
        created_at: model.created_at.into(),
    })
}
