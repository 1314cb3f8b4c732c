use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::modules::portfolio::application::domain::page::PublicPage;
use crate::modules::portfolio::application::ports::incoming::use_cases::{
    LoadPortfolioUseCase, PageRevalidator, RenderPageUseCase,
};

struct CachedPage {
    page: Arc<PublicPage>,
    rendered_at: Instant,
    generation: u64,
}

/// In-process cache of the rendered public page.
///
/// A page is served from cache until its TTL runs out or `revalidate` is
/// called. A render that races with `revalidate` is stored under the old
/// generation, so the next request renders again.
pub struct PortfolioPageCache {
    loader: Arc<dyn LoadPortfolioUseCase>,
    ttl: Option<Duration>,
    slot: RwLock<Option<CachedPage>>,
    generation: AtomicU64,
}

impl PortfolioPageCache {
    /// `ttl_secs == 0` disables caching.
    pub fn new(loader: Arc<dyn LoadPortfolioUseCase>, ttl_secs: u64) -> Self {
        Self {
            loader,
            ttl: (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs)),
            slot: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    async fn render(&self) -> Arc<PublicPage> {
        let snapshot = self.loader.execute().await;
        Arc::new(PublicPage::from_snapshot(snapshot))
    }
}

#[async_trait]
impl RenderPageUseCase for PortfolioPageCache {
    async fn page(&self) -> Arc<PublicPage> {
        let Some(ttl) = self.ttl else {
            return self.render().await;
        };

        let generation = self.generation.load(Ordering::Acquire);

        if let Some(cached) = self.slot.read().await.as_ref() {
            if cached.generation == generation && cached.rendered_at.elapsed() < ttl {
                return Arc::clone(&cached.page);
            }
        }

        debug!("Rendering public page (generation {})", generation);
        let page = self.render().await;

        *self.slot.write().await = Some(CachedPage {
            page: Arc::clone(&page),
            rendered_at: Instant::now(),
            generation,
        });

        page
    }
}

#[async_trait]
impl PageRevalidator for PortfolioPageCache {
    async fn revalidate(&self) {
        let next = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        *self.slot.write().await = None;
        info!("Public page invalidated (generation {})", next);
    }
}
