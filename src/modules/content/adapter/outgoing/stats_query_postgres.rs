use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, Statement};
use std::sync::Arc;

use crate::modules::content::application::ports::outgoing::{
    PortfolioStats, PortfolioStatsQuery, StatsQueryError,
};

/// Reads the summary row produced by the `get_portfolio_stats()` SQL function.
#[derive(Clone)]
pub struct StatsQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl StatsQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn stats_stmt() -> Statement {
        Statement::from_string(
            DatabaseBackend::Postgres,
            r#"
            SELECT
                total_projects,
                total_skills,
                years_experience
            FROM get_portfolio_stats()
            "#,
        )
    }

    fn map_db_err(e: DbErr) -> StatsQueryError {
        StatsQueryError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl PortfolioStatsQuery for StatsQueryPostgres {
    async fn stats(&self) -> Result<PortfolioStats, StatsQueryError> {
        let row = self
            .db
            .query_one(Self::stats_stmt())
            .await
            .map_err(Self::map_db_err)?;

        // The function always yields one row; an empty result means empty tables.
        let Some(row) = row else {
            return Ok(PortfolioStats::default());
        };

        let total_projects: i64 = row
            .try_get("", "total_projects")
            .map_err(Self::map_db_err)?;
        let total_skills: i64 = row.try_get("", "total_skills").map_err(Self::map_db_err)?;
        let years_experience: i32 = row
            .try_get("", "years_experience")
            .map_err(Self::map_db_err)?;

        Ok(PortfolioStats {
            total_projects,
            total_skills,
            years_experience,
        })
    }
}
