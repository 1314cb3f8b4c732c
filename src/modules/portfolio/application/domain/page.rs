use chrono::Datelike;
use serde::Serialize;
use uuid::Uuid;

use crate::modules::content::application::domain::entities::{
    period_label, Certificate, Education, Experience, Profile, Project, Skill,
};
use crate::modules::content::application::ports::outgoing::PortfolioStats;

pub const MAX_PROJECT_CARDS: usize = 6;

const FALLBACK_NAME: &str = "Developer Portfolio";

/// Everything the public page reads, fetched in one fan-out. A collection
/// that failed to load is empty, a failed profile or stats read is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioSnapshot {
    pub profile: Option<Profile>,
    pub skills: Vec<Skill>,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub certificates: Vec<Certificate>,
    pub stats: Option<PortfolioStats>,
}

/// A page section either has data to show or a placeholder telling the
/// visitor nothing has been set up yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    Ready { data: T },
    NotConfigured { message: String },
}

impl<T> Section<T> {
    fn not_configured(what: &str) -> Self {
        Section::NotConfigured {
            message: format!("{what} not yet configured"),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Section::Ready { data } => Some(data),
            Section::NotConfigured { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Section::Ready { .. })
    }
}

impl<T> Section<Vec<T>> {
    fn from_list(items: Vec<T>, what: &str) -> Self {
        if items.is_empty() {
            Self::not_configured(what)
        } else {
            Section::Ready { data: items }
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Section payloads
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hero {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub resume_url: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub website_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct About {
    pub bio: String,
    pub location: Option<String>,
    pub stats: PortfolioStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceCard {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub period: String,
    pub description: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationCard {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub period: String,
    pub gpa: Option<f64>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCard {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillBadge {
    pub name: String,
    pub category: String,
    pub icon_url: Option<String>,
}

/// Skills are shown as two marquee rows; the first row takes the larger half.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRows {
    pub first: Vec<SkillBadge>,
    pub second: Vec<SkillBadge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateCard {
    pub id: Uuid,
    pub title: String,
    pub issuer: String,
    pub issued_year: i32,
    pub expiry_year: Option<i32>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Footer {
    pub name: String,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub email: Option<String>,
}

//
// ──────────────────────────────────────────────────────────
// Page
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicPage {
    /// No profile has been created yet; the page invites the owner to the
    /// admin panel.
    pub demo_mode: bool,
    pub hero: Section<Hero>,
    pub about: Section<About>,
    pub experience: Section<Vec<ExperienceCard>>,
    pub projects: Section<Vec<ProjectCard>>,
    pub skills: Section<SkillRows>,
    pub education: Section<Vec<EducationCard>>,
    pub certificates: Section<Vec<CertificateCard>>,
    pub contact: Section<Contact>,
    pub footer: Footer,
}

impl PublicPage {
    pub fn from_snapshot(snapshot: PortfolioSnapshot) -> Self {
        let PortfolioSnapshot {
            profile,
            skills,
            education,
            experience,
            projects,
            certificates,
            stats,
        } = snapshot;

        let footer = Footer {
            name: profile
                .as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_else(|| FALLBACK_NAME.to_string()),
            github_url: profile.as_ref().and_then(|p| p.github_url.clone()),
            linkedin_url: profile.as_ref().and_then(|p| p.linkedin_url.clone()),
            email: profile.as_ref().and_then(|p| p.email.clone()),
        };

        let (hero, about, contact) = match &profile {
            Some(p) => (
                Section::Ready { data: hero(p) },
                Section::Ready {
                    data: About {
                        bio: p.bio.clone(),
                        location: p.location.clone(),
                        stats: stats.unwrap_or_default(),
                    },
                },
                Section::Ready {
                    data: Contact {
                        email: p.email.clone(),
                        phone: p.phone.clone(),
                        location: p.location.clone(),
                    },
                },
            ),
            None => (
                Section::not_configured("Profile"),
                Section::not_configured("Profile"),
                Section::not_configured("Contact details"),
            ),
        };

        let skills = if skills.is_empty() {
            Section::not_configured("Skills")
        } else {
            Section::Ready {
                data: skill_rows(skills),
            }
        };

        PublicPage {
            demo_mode: profile.is_none(),
            hero,
            about,
            experience: Section::from_list(
                experience.into_iter().map(experience_card).collect(),
                "Experience",
            ),
            projects: Section::from_list(
                projects
                    .into_iter()
                    .take(MAX_PROJECT_CARDS)
                    .map(project_card)
                    .collect(),
                "Projects",
            ),
            skills,
            education: Section::from_list(
                education.into_iter().map(education_card).collect(),
                "Education",
            ),
            certificates: Section::from_list(
                certificates.into_iter().map(certificate_card).collect(),
                "Certificates",
            ),
            contact,
            footer,
        }
    }

    /// Phone number configured on the profile, if any.
    pub fn contact_phone(&self) -> Option<&str> {
        self.contact
            .data()
            .and_then(|c| c.phone.as_deref())
            .filter(|p| !p.trim().is_empty())
    }
}

fn hero(p: &Profile) -> Hero {
    Hero {
        name: p.name.clone(),
        title: p.title.clone(),
        bio: p.bio.clone(),
        avatar_url: p.avatar_url.clone(),
        resume_url: p.resume_url.clone(),
        github_url: p.github_url.clone(),
        linkedin_url: p.linkedin_url.clone(),
        website_url: p.website_url.clone(),
    }
}

fn experience_card(e: Experience) -> ExperienceCard {
    ExperienceCard {
        id: e.id,
        period: period_label(e.start_date, e.end_date),
        company: e.company,
        position: e.position,
        description: e.description,
        technologies: e.technologies,
    }
}

fn education_card(e: Education) -> EducationCard {
    EducationCard {
        id: e.id,
        period: period_label(e.start_date, e.end_date),
        institution: e.institution,
        degree: e.degree,
        field_of_study: e.field_of_study,
        gpa: e.gpa,
        description: e.description,
    }
}

fn project_card(p: Project) -> ProjectCard {
    ProjectCard {
        id: p.id,
        title: p.title,
        description: p.description,
        technologies: p.technologies,
        github_url: p.github_url,
        live_url: p.live_url,
        image_url: p.image_url,
        featured: p.featured,
    }
}

fn certificate_card(c: Certificate) -> CertificateCard {
    CertificateCard {
        id: c.id,
        issued_year: c.issue_date.year(),
        expiry_year: c.expiry_date.map(|d| d.year()),
        title: c.title,
        issuer: c.issuer,
        credential_id: c.credential_id,
        credential_url: c.credential_url,
        image_url: c.image_url,
    }
}

fn skill_rows(skills: Vec<Skill>) -> SkillRows {
    let split = skills.len().div_ceil(2);
    let mut badges: Vec<SkillBadge> = skills
        .into_iter()
        .map(|s| SkillBadge {
            name: s.name,
            category: s.category,
            icon_url: s.icon_url,
        })
        .collect();
    let second = badges.split_off(split);

    SkillRows {
        first: badges,
        second,
    }
}
