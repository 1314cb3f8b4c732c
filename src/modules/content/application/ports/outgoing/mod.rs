pub mod content_repository;
pub mod portfolio_stats_query;

pub use content_repository::{ContentRepository, ContentRepositoryError, ContentStore};
pub use portfolio_stats_query::{PortfolioStats, PortfolioStatsQuery, StatsQueryError};
