use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::content::application::domain::entities::{
    Certificate, ContentEntity, Education, Experience, Profile, Project, Skill,
};
use crate::modules::content::application::ports::outgoing::portfolio_stats_query::PortfolioStatsQuery;

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentRepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

//
// ──────────────────────────────────────────────────────────
// Outgoing Port
// ──────────────────────────────────────────────────────────
//

/// Table-store access for one collection. Last write wins; there is no
/// version check on `update`.
#[async_trait]
pub trait ContentRepository<E: ContentEntity>: Send + Sync {
    /// Every record, in the collection's display order.
    async fn list(&self) -> Result<Vec<E>, ContentRepositoryError>;

    async fn insert(&self, draft: E::Draft) -> Result<E, ContentRepositoryError>;

    /// Rewrites every writable column of `id`. The identifier never changes.
    async fn update(&self, id: Uuid, draft: E::Draft) -> Result<E, ContentRepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), ContentRepositoryError>;
}

/// Every store port the renderer and the admin managers need, built once
/// at startup.
#[derive(Clone)]
pub struct ContentStore {
    pub profile: Arc<dyn ContentRepository<Profile>>,
    pub skills: Arc<dyn ContentRepository<Skill>>,
    pub education: Arc<dyn ContentRepository<Education>>,
    pub experience: Arc<dyn ContentRepository<Experience>>,
    pub projects: Arc<dyn ContentRepository<Project>>,
    pub certificates: Arc<dyn ContentRepository<Certificate>>,
    pub stats: Arc<dyn PortfolioStatsQuery>,
}
