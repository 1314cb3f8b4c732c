use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::content::adapter::outgoing::mapping::{map_db_err, now};
use crate::modules::content::adapter::outgoing::sea_orm_entity::education::{
    self, ActiveModel, Column, Entity,
};
use crate::modules::content::application::domain::entities::{Education, EducationDraft};
use crate::modules::content::application::ports::outgoing::{
    ContentRepository, ContentRepositoryError,
};

#[derive(Clone)]
pub struct EducationRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl EducationRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentRepository<Education> for EducationRepositoryPostgres {
    async fn list(&self) -> Result<Vec<Education>, ContentRepositoryError> {
        let rows = Entity::find()
            .order_by_desc(Column::StartDate)
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(model_to_education).collect())
    }

    async fn insert(&self, draft: EducationDraft) -> Result<Education, ContentRepositoryError> {
        let mut model = draft_to_active(draft);
        model.id = Set(Uuid::new_v4());
        model.created_at = Set(now());

        let saved = model.insert(&*self.db).await.map_err(map_db_err)?;

        Ok(model_to_education(saved))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: EducationDraft,
    ) -> Result<Education, ContentRepositoryError> {
        let saved = Entity::update_many()
            .set(draft_to_active(draft))
            .filter(Column::Id.eq(id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .next()
            .ok_or(ContentRepositoryError::NotFound)?;

        Ok(model_to_education(saved))
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

fn draft_to_active(draft: EducationDraft) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        institution: Set(draft.institution),
        degree: Set(draft.degree),
        field_of_study: Set(draft.field_of_study),
        start_date: Set(draft.start_date),
        end_date: Set(draft.end_date),
        gpa: Set(draft.gpa),
        description: Set(draft.description),
        created_at: NotSet,
    }
}

fn model_to_education(model: education::Model) -> Education {
    Education {
        id: model.id,
        institution: model.institution,
        degree: model.degree,
        field_of_study: model.field_of_study,
        start_date: model.start_date,
        end_date: model.end_date,
        gpa: model.gpa,
        description: model.description,
        created_at: model.created_at.into(),
    }
}
