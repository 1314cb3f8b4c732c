use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::modules::content::application::domain::entities::{
    Certificate, CertificateDraft, ContentEntity, Education, EducationDraft, Experience,
    ExperienceDraft, Profile, ProfileDraft, Project, ProjectDraft, Skill, SkillDraft,
};
use crate::modules::content::application::ports::outgoing::{
    ContentRepository, ContentRepositoryError, ContentStore, PortfolioStats, PortfolioStatsQuery,
    StatsQueryError,
};
use crate::modules::portfolio::application::ports::incoming::use_cases::PageRevalidator;

// ============================================================================
// Entities built from drafts, the way the table store would
// ============================================================================

pub trait FromDraft: ContentEntity {
    /// `existing` is the row being updated; its id and timestamps survive.
    fn from_draft(id: Uuid, draft: Self::Draft, existing: Option<&Self>) -> Self;
}

impl FromDraft for Profile {
    fn from_draft(id: Uuid, d: ProfileDraft, existing: Option<&Self>) -> Self {
        Profile {
            id,
            name: d.name,
            title: d.title,
            bio: d.bio,
            location: d.location,
            email: d.email,
            phone: d.phone,
            github_url: d.github_url,
            linkedin_url: d.linkedin_url,
            website_url: d.website_url,
            avatar_url: d.avatar_url,
            resume_url: d.resume_url,
            years_of_experience: d.years_of_experience,
            created_at: existing.map(|e| e.created_at).unwrap_or_else(Utc::now),
            updated_at: Utc::now(),
        }
    }
}

impl FromDraft for Skill {
    fn from_draft(id: Uuid, d: SkillDraft, existing: Option<&Self>) -> Self {
        Skill {
            id,
            name: d.name,
            category: d.category,
            icon_url: d.icon_url,
            created_at: existing.map(|e| e.created_at).unwrap_or_else(Utc::now),
        }
    }
}

impl FromDraft for Education {
    fn from_draft(id: Uuid, d: EducationDraft, existing: Option<&Self>) -> Self {
        Education {
            id,
            institution: d.institution,
            degree: d.degree,
            field_of_study: d.field_of_study,
            start_date: d.start_date,
            end_date: d.end_date,
            gpa: d.gpa,
            description: d.description,
            created_at: existing.map(|e| e.created_at).unwrap_or_else(Utc::now),
        }
    }
}

impl FromDraft for Experience {
    fn from_draft(id: Uuid, d: ExperienceDraft, existing: Option<&Self>) -> Self {
        Experience {
            id,
            company: d.company,
            position: d.position,
            start_date: d.start_date,
            end_date: d.end_date,
            description: d.description,
            technologies: d.technologies,
            created_at: existing.map(|e| e.created_at).unwrap_or_else(Utc::now),
        }
    }
}

impl FromDraft for Project {
    fn from_draft(id: Uuid, d: ProjectDraft, existing: Option<&Self>) -> Self {
        Project {
            id,
            title: d.title,
            description: d.description,
            technologies: d.technologies,
            github_url: d.github_url,
            live_url: d.live_url,
            image_url: d.image_url,
            featured: d.featured,
            created_at: existing.map(|e| e.created_at).unwrap_or_else(Utc::now),
        }
    }
}

impl FromDraft for Certificate {
    fn from_draft(id: Uuid, d: CertificateDraft, existing: Option<&Self>) -> Self {
        Certificate {
            id,
            title: d.title,
            issuer: d.issuer,
            issue_date: d.issue_date,
            expiry_date: d.expiry_date,
            credential_id: d.credential_id,
            credential_url: d.credential_url,
            image_url: d.image_url,
            created_at: existing.map(|e| e.created_at).unwrap_or_else(Utc::now),
        }
    }
}

// ============================================================================
// In-memory table
// ============================================================================

pub struct InMemoryRepository<E> {
    rows: Mutex<Vec<E>>,
    list_calls: AtomicUsize,
    write_calls: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
            write_calls: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }
}

impl<E: FromDraft> InMemoryRepository<E> {
    /// Inserts a row without counting it as a write.
    pub fn seed(&self, draft: E::Draft) -> E {
        let row = E::from_draft(Uuid::new_v4(), draft, None);
        self.rows.lock().unwrap().push(row.clone());
        row
    }

    pub fn rows(&self) -> Vec<E> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(E::display_order);
        rows
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Store calls other than `list`.
    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    /// Total number of calls of any kind.
    pub fn calls(&self) -> usize {
        self.list_calls() + self.write_calls()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn begin_write(&self) -> Result<(), ContentRepositoryError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ContentRepositoryError::DatabaseError(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl<E: FromDraft> ContentRepository<E> for InMemoryRepository<E> {
    async fn list(&self) -> Result<Vec<E>, ContentRepositoryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ContentRepositoryError::DatabaseError(
                "connection refused".to_string(),
            ));
        }
        Ok(self.rows())
    }

    async fn insert(&self, draft: E::Draft) -> Result<E, ContentRepositoryError> {
        self.begin_write()?;
        let row = E::from_draft(Uuid::new_v4(), draft, None);
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, draft: E::Draft) -> Result<E, ContentRepositoryError> {
        self.begin_write()?;
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(ContentRepositoryError::NotFound)?;
        let updated = E::from_draft(id, draft, Some(&*slot));
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ContentRepositoryError> {
        self.begin_write()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        if rows.len() == before {
            return Err(ContentRepositoryError::NotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Whole store
// ============================================================================

#[derive(Default)]
pub struct FakeStats {
    stats: Mutex<PortfolioStats>,
    fail: AtomicBool,
}

#[async_trait]
impl PortfolioStatsQuery for FakeStats {
    async fn stats(&self) -> Result<PortfolioStats, StatsQueryError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StatsQueryError::DatabaseError("function missing".into()));
        }
        Ok(*self.stats.lock().unwrap())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryContent {
    pub profile: Arc<InMemoryRepository<Profile>>,
    pub skills: Arc<InMemoryRepository<Skill>>,
    pub education: Arc<InMemoryRepository<Education>>,
    pub experience: Arc<InMemoryRepository<Experience>>,
    pub projects: Arc<InMemoryRepository<Project>>,
    pub certificates: Arc<InMemoryRepository<Certificate>>,
    pub stats: Arc<FakeStats>,
}

impl InMemoryContent {
    pub fn store(&self) -> ContentStore {
        ContentStore {
            profile: self.profile.clone(),
            skills: self.skills.clone(),
            education: self.education.clone(),
            experience: self.experience.clone(),
            projects: self.projects.clone(),
            certificates: self.certificates.clone(),
            stats: self.stats.clone(),
        }
    }

    pub fn set_stats(&self, stats: PortfolioStats) {
        *self.stats.stats.lock().unwrap() = stats;
    }

    pub fn fail_stats(&self, fail: bool) {
        self.stats.fail.store(fail, Ordering::SeqCst);
    }
}

// ============================================================================
// Revalidation
// ============================================================================

#[derive(Default)]
pub struct RecordingRevalidator {
    calls: AtomicUsize,
}

impl RecordingRevalidator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageRevalidator for RecordingRevalidator {
    async fn revalidate(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}
