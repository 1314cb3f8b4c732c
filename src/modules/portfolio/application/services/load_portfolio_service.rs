use async_trait::async_trait;
use std::fmt::Display;
use tracing::warn;

use crate::modules::content::application::ports::outgoing::ContentStore;
use crate::modules::portfolio::application::domain::page::PortfolioSnapshot;
use crate::modules::portfolio::application::ports::incoming::use_cases::LoadPortfolioUseCase;

pub struct LoadPortfolioService {
    store: ContentStore,
}

impl LoadPortfolioService {
    pub fn new(store: ContentStore) -> Self {
        Self { store }
    }
}

fn or_empty<T: Default, E: Display>(what: &str, result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| {
        warn!("Failed to load {} for public page: {}", what, e);
        T::default()
    })
}

#[async_trait]
impl LoadPortfolioUseCase for LoadPortfolioService {
    async fn execute(&self) -> PortfolioSnapshot {
        let s = &self.store;

        let (profile, skills, education, experience, projects, certificates, stats) = futures::join!(
            s.profile.list(),
            s.skills.list(),
            s.education.list(),
            s.experience.list(),
            s.projects.list(),
            s.certificates.list(),
            s.stats.stats(),
        );

        PortfolioSnapshot {
            profile: or_empty("profile", profile).into_iter().next(),
            skills: or_empty("skills", skills),
            education: or_empty("education", education),
            experience: or_empty("experience", experience),
            projects: or_empty("projects", projects),
            certificates: or_empty("certificates", certificates),
            stats: stats
                .map_err(|e| warn!("Failed to load portfolio stats: {}", e))
                .ok(),
        }
    }
}
