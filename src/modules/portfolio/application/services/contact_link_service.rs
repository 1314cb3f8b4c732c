use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::portfolio::application::domain::contact::{
    build_contact_link, ContactError, ContactForm, ContactLink,
};
use crate::modules::portfolio::application::ports::incoming::use_cases::{
    BuildContactLinkUseCase, RenderPageUseCase,
};

/// Builds the contact deep link against the phone number shown on the
/// public page.
pub struct ContactLinkService {
    pages: Arc<dyn RenderPageUseCase>,
}

impl ContactLinkService {
    pub fn new(pages: Arc<dyn RenderPageUseCase>) -> Self {
        Self { pages }
    }
}

#[async_trait]
impl BuildContactLinkUseCase for ContactLinkService {
    async fn execute(&self, form: ContactForm) -> Result<ContactLink, ContactError> {
        // Validate before touching the page so a bad form costs no store read.
        form.validate().map_err(ContactError::Invalid)?;

        let page = self.pages.page().await;
        build_contact_link(&form, page.contact_phone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::portfolio::application::domain::page::{PortfolioSnapshot, PublicPage};
    use crate::tests::support::fixtures::profile;

    struct FixedPage(Arc<PublicPage>);

    #[async_trait]
    impl RenderPageUseCase for FixedPage {
        async fn page(&self) -> Arc<PublicPage> {
            Arc::clone(&self.0)
        }
    }

    fn service(snapshot: PortfolioSnapshot) -> ContactLinkService {
        ContactLinkService::new(Arc::new(FixedPage(Arc::new(PublicPage::from_snapshot(
            snapshot,
        )))))
    }

    fn form() -> ContactForm {
        ContactForm {
            name: "Rina".into(),
            email: "rina@example.com".into(),
            subject: "Hi".into(),
            message: "Hello there".into(),
        }
    }

    #[tokio::test]
    async fn uses_profile_phone() {
        let mut owner = profile("Ada");
        owner.phone = Some("+1 (555) 010-2000".into());

        let link = service(PortfolioSnapshot {
            profile: Some(owner),
            ..Default::default()
        })
        .execute(form())
        .await
        .unwrap();

        assert!(link.url.starts_with("https://wa.me/15550102000?text="));
    }

    #[tokio::test]
    async fn without_profile_phone_is_not_configured() {
        let err = service(PortfolioSnapshot::default())
            .execute(form())
            .await
            .unwrap_err();

        assert_eq!(err, ContactError::PhoneNotConfigured);
    }
}
