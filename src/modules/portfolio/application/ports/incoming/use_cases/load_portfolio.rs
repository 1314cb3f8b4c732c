use async_trait::async_trait;

use crate::modules::portfolio::application::domain::page::PortfolioSnapshot;

/// Reads every collection and the stats summary for the public page.
/// Never fails: a read that errors leaves its part of the snapshot empty.
#[async_trait]
pub trait LoadPortfolioUseCase: Send + Sync {
    async fn execute(&self) -> PortfolioSnapshot;
}
