use async_trait::async_trait;

use crate::modules::portfolio::application::domain::contact::{
    ContactError, ContactForm, ContactLink,
};

#[async_trait]
pub trait BuildContactLinkUseCase: Send + Sync {
    async fn execute(&self, form: ContactForm) -> Result<ContactLink, ContactError>;
}
