use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::portfolio::application::domain::page::PublicPage;

#[async_trait]
pub trait RenderPageUseCase: Send + Sync {
    async fn page(&self) -> Arc<PublicPage>;
}

/// Invalidates the rendered public page after an admin mutation.
#[async_trait]
pub trait PageRevalidator: Send + Sync {
    async fn revalidate(&self);
}
