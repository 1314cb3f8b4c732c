use crate::modules::admin::application::ports::outgoing::IdentityProvider;
use crate::modules::admin::application::services::{AdminWorkspaces, ConsoleFactory};
use crate::modules::media::application::ports::incoming::use_cases::UploadMedia;
use crate::modules::portfolio::application::ports::incoming::use_cases::{
    BuildContactLinkUseCase, PageRevalidator, RenderPageUseCase,
};
use crate::modules::portfolio::application::services::{
    ContactLinkService, LoadPortfolioService, PortfolioPageCache,
};
use crate::tests::support::fakes::{InMemoryContent, RecordingRevalidator};
use crate::tests::support::stubs::{FakeUploads, StubIdentity};
use crate::AppState;
use actix_web::web;
use std::sync::Arc;

pub struct TestAppStateBuilder {
    content: InMemoryContent,
    render_page: Option<Arc<dyn RenderPageUseCase>>,
    contact_link: Option<Arc<dyn BuildContactLinkUseCase>>,
    identity: Arc<dyn IdentityProvider>,
    upload_media: Arc<dyn UploadMedia>,
    revalidator: Arc<dyn PageRevalidator>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            content: InMemoryContent::default(),
            render_page: None,
            contact_link: None,
            identity: Arc::new(StubIdentity::default()),
            upload_media: Arc::new(FakeUploads::default()),
            revalidator: Arc::new(RecordingRevalidator::default()),
        }
    }
}

impl TestAppStateBuilder {
    /// Content behind both the public page and the admin managers, unless a
    /// page renderer is set explicitly.
    pub fn with_content(mut self, content: InMemoryContent) -> Self {
        self.content = content;
        self
    }

    pub fn with_render_page(mut self, render_page: Arc<dyn RenderPageUseCase>) -> Self {
        self.render_page = Some(render_page);
        self
    }

    pub fn with_contact_link(mut self, uc: impl BuildContactLinkUseCase + 'static) -> Self {
        self.contact_link = Some(Arc::new(uc));
        self
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_upload_media(mut self, uploads: Arc<dyn UploadMedia>) -> Self {
        self.upload_media = uploads;
        self
    }

    pub fn with_revalidator(mut self, revalidator: Arc<dyn PageRevalidator>) -> Self {
        self.revalidator = revalidator;
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let render_page = self.render_page.unwrap_or_else(|| {
            Arc::new(PortfolioPageCache::new(
                Arc::new(LoadPortfolioService::new(self.content.store())),
                60,
            ))
        });
        let contact_link = self
            .contact_link
            .unwrap_or_else(|| Arc::new(ContactLinkService::new(Arc::clone(&render_page))));

        let factory = ConsoleFactory::new(
            self.identity,
            self.content.store(),
            Arc::clone(&self.upload_media),
            self.revalidator,
        );

        web::Data::new(AppState {
            render_page,
            contact_link,
            admin: Arc::new(AdminWorkspaces::new(factory)),
            upload_media: self.upload_media,
        })
    }
}
