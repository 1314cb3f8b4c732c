use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::content::adapter::outgoing::mapping::{map_db_err, now};
use crate::modules::content::adapter::outgoing::sea_orm_entity::skills::{
    self, ActiveModel, Column, Entity,
};
use crate::modules::content::application::domain::entities::{Skill, SkillDraft};
use crate::modules::content::application::ports::outgoing::{
    ContentRepository, ContentRepositoryError,
};

#[derive(Clone)]
pub struct SkillRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl SkillRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentRepository<Skill> for SkillRepositoryPostgres {
    async fn list(&self) -> Result<Vec<Skill>, ContentRepositoryError> {
        let rows = Entity::find()
            .order_by_asc(SimpleExpr::from(Func::lower(Expr::col(Column::Name))))
            .order_by_asc(Column::Name)
            .order_by_asc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(model_to_skill).collect())
    }

    async fn insert(&self, draft: SkillDraft) -> Result<Skill, ContentRepositoryError> {
        let mut model = draft_to_active(draft);
        model.id = Set(Uuid::new_v4());
        model.created_at = Set(now());

        let saved = model.insert(&*self.db).await.map_err(map_db_err)?;

        Ok(model_to_skill(saved))
    }

    async fn update(&self, id: Uuid, draft: SkillDraft) -> Result<Skill, ContentRepositoryError> {
        let saved = Entity::update_many()
            .set(draft_to_active(draft))
            .filter(Column::Id.eq(id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .next()
            .ok_or(ContentRepositoryError::NotFound)?;

        Ok(model_to_skill(saved))
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

fn draft_to_active(draft: SkillDraft) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        name: Set(draft.name),
        category: Set(draft.category),
        icon_url: Set(draft.icon_url),
        created_at: NotSet,
    }
}

fn model_to_skill(model: skills::Model) -> Skill {
    Skill {
        id: model.id,
        name: model.name,
        category: model.category,
        icon_url: model.icon_url,
        created_at: model.created_at.into(),
    }
}

// ============================================================================
// Tests
// ============================================================================
