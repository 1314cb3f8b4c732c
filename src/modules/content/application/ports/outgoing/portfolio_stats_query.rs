use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub total_projects: i64,
    pub total_skills: i64,
    pub years_experience: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait PortfolioStatsQuery: Send + Sync {
    async fn stats(&self) -> Result<PortfolioStats, StatsQueryError>;
}
