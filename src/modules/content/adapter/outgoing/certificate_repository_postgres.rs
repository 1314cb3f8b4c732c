use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::content::adapter::outgoing::mapping::{map_db_err, now};
use crate::modules::content::adapter::outgoing::sea_orm_entity::certificates::{
    self, ActiveModel, Column, Entity,
};
use crate::modules::content::application::domain::entities::{Certificate, CertificateDraft};
use crate::modules::content::application::ports::outgoing::{
    ContentRepository, ContentRepositoryError,
};

#[derive(Clone)]
pub struct CertificateRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl CertificateRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentRepository<Certificate> for CertificateRepositoryPostgres {
    async fn list(&self) -> Result<Vec<Certificate>, ContentRepositoryError> {
        let rows = Entity::find()
            .order_by_desc(Column::IssueDate)
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(model_to_certificate).collect())
    }

    async fn insert(
        &self,
        draft: CertificateDraft,
    ) -> Result<Certificate, ContentRepositoryError> {
        let mut model = draft_to_active(draft);
        model.id = Set(Uuid::new_v4());
        model.created_at = Set(now());

        let saved = model.insert(&*self.db).await.map_err(map_db_err)?;

        Ok(model_to_certificate(saved))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: CertificateDraft,
    ) -> Result<Certificate, ContentRepositoryError> {
        let saved = Entity::update_many()
            .set(draft_to_active(draft))
            .filter(Column::Id.eq(id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .next()
            .ok_or(ContentRepositoryError::NotFound)?;

        Ok(model_to_certificate(saved))
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

fn draft_to_active(draft: CertificateDraft) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        title: Set(draft.title),
        issuer: Set(draft.issuer),
        issue_date: Set(draft.issue_date),
        expiry_date: Set(draft.expiry_date),
        credential_id: Set(draft.credential_id),
        credential_url: Set(draft.credential_url),
        image_url: Set(draft.image_url),
        created_at: NotSet,
    }
}

fn model_to_certificate(model: certificates::Model) -> Certificate {
    Certificate {
        id: model.id,
        title: model.title,
        issuer: model.issuer,
        issue_date: model.issue_date,
        expiry_date: model.expiry_date,
        credential_id: model.credential_id,
        credential_url: model.credential_url,
        image_url: model.image_url,
        created_at: model.created_at.into(),
    }
}
