use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::entity_manager::{CollectionManager, EntityManager};
use super::profile_manager::ProfileManager;
use crate::modules::admin::application::domain::manager::{AdminOverview, CollectionSnapshot};
use crate::modules::admin::application::domain::session::{
    AdminView, Credentials, PasswordChange, Session, SessionEvent, SessionState,
};
use crate::modules::admin::application::ports::outgoing::{IdentityError, IdentityProvider};
use crate::modules::content::application::domain::entities::{
    Certificate, Collection, Education, Experience, Project, Skill,
};
use crate::modules::content::application::domain::form::FieldErrors;
use crate::modules::content::application::ports::outgoing::ContentStore;
use crate::modules::media::application::ports::incoming::use_cases::UploadMedia;
use crate::modules::portfolio::application::ports::incoming::use_cases::PageRevalidator;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsoleError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Identity provider error: {0}")]
    Identity(String),
}

impl From<IdentityError> for ConsoleError {
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::InvalidCredentials => ConsoleError::InvalidCredentials,
            IdentityError::Backend(msg) => ConsoleError::Identity(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsoleSnapshot {
    pub view: AdminView,
    pub email: Option<String>,
    pub overview: AdminOverview,
    pub collections: Vec<CollectionSnapshot>,
}

/// Shared dependencies every console is built from.
#[derive(Clone)]
pub struct ConsoleFactory {
    identity: Arc<dyn IdentityProvider>,
    store: ContentStore,
    uploads: Arc<dyn UploadMedia>,
    revalidator: Arc<dyn PageRevalidator>,
}

impl ConsoleFactory {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: ContentStore,
        uploads: Arc<dyn UploadMedia>,
        revalidator: Arc<dyn PageRevalidator>,
    ) -> Self {
        Self {
            identity,
            store,
            uploads,
            revalidator,
        }
    }

    pub fn identity(&self) -> Arc<dyn IdentityProvider> {
        Arc::clone(&self.identity)
    }

    pub fn build(&self) -> AdminConsole {
        let uploads = &self.uploads;
        let revalidator = &self.revalidator;

        AdminConsole {
            identity: Arc::clone(&self.identity),
            state: SessionState::Unknown,
            loading: false,
            profile: ProfileManager::new(
                self.store.profile.clone(),
                uploads.clone(),
                revalidator.clone(),
            ),
            skills: EntityManager::new(
                self.store.skills.clone(),
                uploads.clone(),
                revalidator.clone(),
            ),
            education: EntityManager::new(
                self.store.education.clone(),
                uploads.clone(),
                revalidator.clone(),
            ),
            experience: EntityManager::new(
                self.store.experience.clone(),
                uploads.clone(),
                revalidator.clone(),
            ),
            projects: EntityManager::new(
                self.store.projects.clone(),
                uploads.clone(),
                revalidator.clone(),
            ),
            certificates: EntityManager::new(
                self.store.certificates.clone(),
                uploads.clone(),
                revalidator.clone(),
            ),
        }
    }
}

/// One admin's session gate plus the six collection managers it unlocks.
pub struct AdminConsole {
    identity: Arc<dyn IdentityProvider>,
    state: SessionState,
    loading: bool,
    pub profile: ProfileManager,
    pub skills: EntityManager<Skill>,
    pub education: EntityManager<Education>,
    pub experience: EntityManager<Experience>,
    pub projects: EntityManager<Project>,
    pub certificates: EntityManager<Certificate>,
}

impl AdminConsole {
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn view(&self) -> AdminView {
        match &self.state {
            SessionState::Unknown => AdminView::Loading,
            SessionState::Authenticated(_) if self.loading => AdminView::Loading,
            SessionState::Authenticated(_) => AdminView::Console,
            SessionState::Unauthenticated => AdminView::Login,
        }
    }

    /// Asks the provider whether `access_token` is still a live session.
    /// A new session triggers the bulk load; a dead one signs out locally.
    pub async fn check_session(&mut self, access_token: &str) -> Result<AdminView, ConsoleError> {
        match self.identity.current_session(access_token).await? {
            Some(session) => {
                let same = self
                    .session()
                    .is_some_and(|s| s.session_id == session.session_id);
                if !same {
                    self.on_session_change(SessionEvent::SignedIn(session)).await;
                }
            }
            None => {
                self.on_session_change(SessionEvent::SignedOut).await;
            }
        }
        Ok(self.view())
    }

    /// Returns the collections whose initial load failed. Those stay empty.
    pub async fn sign_in(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Vec<Collection>, ConsoleError> {
        let credentials = Credentials::new(email, password).map_err(ConsoleError::Validation)?;

        let session = self.identity.sign_in(&credentials).await.map_err(|e| {
            warn!("Admin sign-in rejected for {}: {}", credentials.email, e);
            ConsoleError::from(e)
        })?;

        info!("Admin {} signed in", session.email);
        Ok(self.on_session_change(SessionEvent::SignedIn(session)).await)
    }

    /// Local state is cleared even when the provider call fails.
    pub async fn sign_out(&mut self) -> Result<(), ConsoleError> {
        if let Some(session) = self.session().cloned() {
            if let Err(e) = self.identity.sign_out(&session).await {
                warn!("Provider sign-out failed for {}: {}", session.email, e);
            }
            info!("Admin {} signed out", session.email);
        }
        self.on_session_change(SessionEvent::SignedOut).await;
        Ok(())
    }

    pub async fn on_session_change(&mut self, event: SessionEvent) -> Vec<Collection> {
        match event {
            SessionEvent::SignedIn(session) => {
                self.state = SessionState::Authenticated(session);
                self.loading = true;
                let failed = self.load_all().await;
                self.loading = false;
                failed
            }
            SessionEvent::SignedOut => {
                for c in Collection::ALL {
                    self.manager(c).clear();
                }
                self.state = SessionState::Unauthenticated;
                Vec::new()
            }
        }
    }

    async fn load_all(&mut self) -> Vec<Collection> {
        let (profile, skills, education, experience, projects, certificates) = futures::join!(
            self.profile.load(),
            self.skills.load(),
            self.education.load(),
            self.experience.load(),
            self.projects.load(),
            self.certificates.load(),
        );

        [
            (Collection::Profile, profile),
            (Collection::Skills, skills),
            (Collection::Education, education),
            (Collection::Experience, experience),
            (Collection::Projects, projects),
            (Collection::Certificates, certificates),
        ]
        .into_iter()
        .filter_map(|(c, result)| result.err().map(|_| c))
        .collect()
    }

    pub fn manager(&mut self, collection: Collection) -> &mut dyn CollectionManager {
        match collection {
            Collection::Profile => &mut self.profile,
            Collection::Skills => &mut self.skills,
            Collection::Education => &mut self.education,
            Collection::Experience => &mut self.experience,
            Collection::Projects => &mut self.projects,
            Collection::Certificates => &mut self.certificates,
        }
    }

    fn managers(&self) -> [&dyn CollectionManager; 6] {
        [
            &self.profile,
            &self.skills,
            &self.education,
            &self.experience,
            &self.projects,
            &self.certificates,
        ]
    }

    pub fn overview(&self) -> AdminOverview {
        AdminOverview {
            profile_configured: self.profile.profile().is_some(),
            counts: self
                .managers()
                .iter()
                .filter(|m| m.collection() != Collection::Profile)
                .map(|m| (m.collection(), m.len()))
                .collect(),
        }
    }

    pub fn snapshot(&self) -> ConsoleSnapshot {
        ConsoleSnapshot {
            view: self.view(),
            email: self.session().map(|s| s.email.clone()),
            overview: self.overview(),
            collections: self.managers().iter().map(|m| m.snapshot()).collect(),
        }
    }

    pub async fn change_password(
        &mut self,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), ConsoleError> {
        let change = PasswordChange::new(current, new, confirm).map_err(ConsoleError::Validation)?;
        let session = self.session().cloned().ok_or(ConsoleError::NotAuthenticated)?;

        self.identity
            .update_password(&session, &change.current_password, &change.new_password)
            .await
            .map_err(|e| match e {
                IdentityError::InvalidCredentials => ConsoleError::Validation(FieldErrors::single(
                    "current_password",
                    "Current password is incorrect",
                )),
                other => ConsoleError::from(other),
            })?;

        info!("Admin {} changed password", session.email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::fakes::{InMemoryContent, RecordingRevalidator};
    use crate::tests::support::fixtures::{
        certificate_draft, education_draft, experience_draft, profile_draft, project_draft,
        skill_draft, valid_form,
    };
    use crate::tests::support::stubs::{FakeUploads, StubIdentity, ADMIN_EMAIL, ADMIN_PASSWORD};

    fn seeded() -> InMemoryContent {
        let content = InMemoryContent::default();
        content.profile.seed(profile_draft("Ada"));
        content.skills.seed(skill_draft("Rust"));
        content.education.seed(education_draft("ITB", "2015-08-01"));
        content.experience.seed(experience_draft("Acme", "2020-01-01"));
        content.projects.seed(project_draft("Portfolio"));
        content
            .certificates
            .seed(certificate_draft("AAD", "2022-05-10"));
        content
    }

    fn console(content: &InMemoryContent, identity: Arc<StubIdentity>) -> AdminConsole {
        ConsoleFactory::new(
            identity,
            content.store(),
            Arc::new(FakeUploads::default()),
            Arc::new(RecordingRevalidator::default()),
        )
        .build()
    }

    #[tokio::test]
    async fn starts_in_loading_view() {
        let content = InMemoryContent::default();
        let c = console(&content, Arc::new(StubIdentity::default()));
        assert_eq!(c.view(), AdminView::Loading);
        assert_eq!(c.state(), &SessionState::Unknown);
    }

    #[tokio::test]
    async fn sign_in_loads_all_six_collections() {
        let content = seeded();
        let mut c = console(&content, Arc::new(StubIdentity::default()));

        let failed = c.sign_in(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

        assert!(failed.is_empty());
        assert_eq!(c.view(), AdminView::Console);
        for collection in Collection::ALL {
            assert_eq!(c.manager(collection).len(), 1, "{collection}");
        }
        let overview = c.overview();
        assert!(overview.profile_configured);
        assert_eq!(overview.counts.len(), 5);
    }

    #[tokio::test]
    async fn sign_in_reports_collections_that_failed_to_load() {
        let content = seeded();
        content.projects.fail_reads(true);
        let mut c = console(&content, Arc::new(StubIdentity::default()));

        let failed = c.sign_in(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

        assert_eq!(failed, vec![Collection::Projects]);
        assert_eq!(c.view(), AdminView::Console);
        assert!(c.projects.is_empty());
    }

    #[tokio::test]
    async fn profile_save_after_failed_sign_in_load_keeps_a_single_row() {
        let content = seeded();
        content.profile.fail_reads(true);
        let mut c = console(&content, Arc::new(StubIdentity::default()));

        let failed = c.sign_in(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
        assert_eq!(failed, vec![Collection::Profile]);
        content.profile.fail_reads(false);

        c.manager(Collection::Profile)
            .submit(valid_form(Collection::Profile), None)
            .await
            .unwrap();

        assert_eq!(content.profile.rows().len(), 1);
        assert_eq!(c.manager(Collection::Profile).len(), 1);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_provider() {
        let identity = Arc::new(StubIdentity::default());
        let mut c = console(&InMemoryContent::default(), identity.clone());

        let err = c.sign_in("nope", "123").await.unwrap_err();

        match err {
            ConsoleError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(identity.sign_in_calls(), 0);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let mut c = console(&InMemoryContent::default(), Arc::new(StubIdentity::default()));

        let err = c.sign_in(ADMIN_EMAIL, "wrong-password").await.unwrap_err();

        assert_eq!(err, ConsoleError::InvalidCredentials);
        assert_eq!(c.view(), AdminView::Loading);
    }

    #[tokio::test]
    async fn sign_out_clears_every_collection_before_login_view() {
        let content = seeded();
        let identity = Arc::new(StubIdentity::default());
        let mut c = console(&content, identity.clone());
        c.sign_in(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
        let token = c.session().unwrap().access_token.clone();

        c.sign_out().await.unwrap();

        assert_eq!(c.view(), AdminView::Login);
        for collection in Collection::ALL {
            assert_eq!(c.manager(collection).len(), 0, "{collection}");
        }
        assert_eq!(identity.current(&token), None);
    }

    #[tokio::test]
    async fn revoked_session_found_by_check_clears_state() {
        let content = seeded();
        let identity = Arc::new(StubIdentity::default());
        let mut c = console(&content, identity.clone());
        c.sign_in(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
        let token = c.session().unwrap().access_token.clone();

        identity.revoke_all();
        let view = c.check_session(&token).await.unwrap();

        assert_eq!(view, AdminView::Login);
        assert!(c.skills.is_empty());
        assert!(c.profile.profile().is_none());
    }

    #[tokio::test]
    async fn check_session_with_live_token_keeps_loaded_state() {
        let content = seeded();
        let mut c = console(&content, Arc::new(StubIdentity::default()));
        c.sign_in(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
        let token = c.session().unwrap().access_token.clone();
        let loads = content.skills.list_calls();

        let view = c.check_session(&token).await.unwrap();

        assert_eq!(view, AdminView::Console);
        assert_eq!(content.skills.list_calls(), loads);
    }

    #[tokio::test]
    async fn change_password_maps_wrong_current_password_to_field_error() {
        let identity = Arc::new(StubIdentity::default());
        let mut c = console(&InMemoryContent::default(), identity.clone());
        c.sign_in(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

        let err = c
            .change_password("not-it!", "newpass1", "newpass1")
            .await
            .unwrap_err();

        match err {
            ConsoleError::Validation(errors) => assert_eq!(
                errors.get("current_password"),
                Some("Current password is incorrect")
            ),
            other => panic!("expected validation error, got {other:?}"),
        }

        c.change_password(ADMIN_PASSWORD, "newpass1", "newpass1")
            .await
            .unwrap();
        assert_eq!(identity.password(), "newpass1");
    }

    #[tokio::test]
    async fn change_password_requires_a_session() {
        let mut c = console(&InMemoryContent::default(), Arc::new(StubIdentity::default()));

        let err = c
            .change_password("oldpass", "newpass1", "newpass1")
            .await
            .unwrap_err();

        assert_eq!(err, ConsoleError::NotAuthenticated);
    }
}
