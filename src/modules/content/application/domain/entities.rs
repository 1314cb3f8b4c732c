use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

//
// ──────────────────────────────────────────────────────────
// Collections
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Profile,
    Skills,
    Education,
    Experience,
    Projects,
    Certificates,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Profile,
        Collection::Skills,
        Collection::Education,
        Collection::Experience,
        Collection::Projects,
        Collection::Certificates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Profile => "profile",
            Collection::Skills => "skills",
            Collection::Education => "education",
            Collection::Experience => "experience",
            Collection::Projects => "projects",
            Collection::Certificates => "certificates",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown collection: {0}")]
pub struct UnknownCollection(pub String);

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCollection(s.to_string()))
    }
}

/// A record kind stored in one of the six collections.
///
/// `Draft` is the writable part of the record: everything except the
/// store-generated identifier and timestamps.
pub trait ContentEntity: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    type Draft: Clone + fmt::Debug + Send + Sync + 'static;

    const COLLECTION: Collection;

    fn id(&self) -> Uuid;

    /// Order in which the store lists this collection.
    fn display_order(a: &Self, b: &Self) -> Ordering;
}

/// `"2019 - 2022"`, or `"2021 - Present"` when the range is open.
pub fn period_label(start: NaiveDate, end: Option<NaiveDate>) -> String {
    match end {
        Some(end) => format!("{} - {}", start.year(), end.year()),
        None => format!("{} - Present", start.year()),
    }
}

//
// ──────────────────────────────────────────────────────────
// Profile (singleton)
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub title: String,
    pub bio: String,
    pub location: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub website_url: Option<String>,
    pub avatar_url: Option<String>,
    pub resume_url: Option<String>,
    pub years_of_experience: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileDraft {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub location: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub website_url: Option<String>,
    pub avatar_url: Option<String>,
    pub resume_url: Option<String>,
    pub years_of_experience: i32,
}

impl ContentEntity for Profile {
    type Draft = ProfileDraft;
    const COLLECTION: Collection = Collection::Profile;

    fn id(&self) -> Uuid {
        self.id
    }

    fn display_order(a: &Self, b: &Self) -> Ordering {
        a.created_at.cmp(&b.created_at)
    }
}

//
// ──────────────────────────────────────────────────────────
// Skill
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub icon_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkillDraft {
    pub name: String,
    pub category: String,
    pub icon_url: Option<String>,
}

impl ContentEntity for Skill {
    type Draft = SkillDraft;
    const COLLECTION: Collection = Collection::Skills;

    fn id(&self) -> Uuid {
        self.id
    }

    /// Case-insensitive by name, matching `ORDER BY LOWER(name)` in the store.
    fn display_order(a: &Self, b: &Self) -> Ordering {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.created_at.cmp(&b.created_at))
    }
}

//
// ──────────────────────────────────────────────────────────
// Education
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub gpa: Option<f64>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EducationDraft {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub gpa: Option<f64>,
    pub description: String,
}

impl ContentEntity for Education {
    type Draft = EducationDraft;
    const COLLECTION: Collection = Collection::Education;

    fn id(&self) -> Uuid {
        self.id
    }

    fn display_order(a: &Self, b: &Self) -> Ordering {
        b.start_date.cmp(&a.start_date)
    }
}

//
// ──────────────────────────────────────────────────────────
// Experience
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: String,
    pub technologies: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceDraft {
    pub company: String,
    pub position: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: String,
    pub technologies: Vec<String>,
}

impl ContentEntity for Experience {
    type Draft = ExperienceDraft;
    const COLLECTION: Collection = Collection::Experience;

    fn id(&self) -> Uuid {
        self.id
    }

    fn display_order(a: &Self, b: &Self) -> Ordering {
        b.start_date.cmp(&a.start_date)
    }
}

//
// ──────────────────────────────────────────────────────────
// Project
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
}

impl ContentEntity for Project {
    type Draft = ProjectDraft;
    const COLLECTION: Collection = Collection::Projects;

    fn id(&self) -> Uuid {
        self.id
    }

    fn display_order(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

//
// ──────────────────────────────────────────────────────────
// Certificate
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: Uuid,
    pub title: String,
    pub issuer: String,
    pub issue_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CertificateDraft {
    pub title: String,
    pub issuer: String,
    pub issue_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub image_url: Option<String>,
}

impl ContentEntity for Certificate {
    type Draft = CertificateDraft;
    const COLLECTION: Collection = Collection::Certificates;

    fn id(&self) -> Uuid {
        self.id
    }

    fn display_order(a: &Self, b: &Self) -> Ordering {
        b.issue_date.cmp(&a.issue_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn collection_round_trips_through_path_segment() {
        for c in Collection::ALL {
            assert_eq!(c.as_str().parse::<Collection>().unwrap(), c);
        }
        assert!("uploads".parse::<Collection>().is_err());
    }

    #[test]
    fn period_label_renders_open_range_as_present() {
        assert_eq!(period_label(date("2021-03-01"), None), "2021 - Present");
        assert_eq!(
            period_label(date("2016-09-01"), Some(date("2020-06-30"))),
            "2016 - 2020"
        );
    }

    #[test]
    fn education_orders_newest_start_first() {
        let older = Education {
            id: Uuid::new_v4(),
            institution: "A".into(),
            degree: "BSc".into(),
            field_of_study: "CS".into(),
            start_date: date("2012-09-01"),
            end_date: Some(date("2016-06-01")),
            gpa: None,
            description: String::new(),
            created_at: Utc::now(),
        };
        let newer = Education {
            start_date: date("2017-09-01"),
            ..older.clone()
        };

        let mut list = vec![older.clone(), newer.clone()];
        list.sort_by(Education::display_order);
        assert_eq!(list[0].start_date, newer.start_date);
    }

    #[test]
    fn skills_order_by_name() {
        let skill = |name: &str| Skill {
            id: Uuid::new_v4(),
            name: name.into(),
            category: "Backend".into(),
            icon_url: None,
            created_at: Utc::now(),
        };

        let mut list = vec![skill("Rust"), skill("Go"), skill("Postgres")];
        list.sort_by(Skill::display_order);
        let names: Vec<_> = list.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Go", "Postgres", "Rust"]);
    }

    #[test]
    fn skills_order_ignores_case() {
        let skill = |name: &str| Skill {
            id: Uuid::new_v4(),
            name: name.into(),
            category: "Tools".into(),
            icon_url: None,
            created_at: Utc::now(),
        };

        let mut list = vec![skill("docker"), skill("Rust"), skill("AWS"), skill("bash")];
        list.sort_by(Skill::display_order);
        let names: Vec<_> = list.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["AWS", "bash", "docker", "Rust"]);
    }
}
