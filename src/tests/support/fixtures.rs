use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::modules::content::application::domain::entities::{
    CertificateDraft, Collection, EducationDraft, ExperienceDraft, Profile, ProfileDraft,
    ProjectDraft, SkillDraft,
};
use crate::modules::content::application::domain::form::FormData;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("fixture date")
}

pub fn profile(name: &str) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        name: name.to_string(),
        title: "Flutter Developer".to_string(),
        bio: "Ships mobile apps".to_string(),
        location: Some("Bandung".to_string()),
        email: Some("owner@example.com".to_string()),
        phone: None,
        github_url: None,
        linkedin_url: None,
        website_url: None,
        avatar_url: None,
        resume_url: None,
        years_of_experience: 3,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn profile_draft(name: &str) -> ProfileDraft {
    ProfileDraft {
        name: name.to_string(),
        title: "Flutter Developer".to_string(),
        bio: "Ships mobile apps".to_string(),
        years_of_experience: 3,
        ..Default::default()
    }
}

pub fn skill_draft(name: &str) -> SkillDraft {
    SkillDraft {
        name: name.to_string(),
        category: "Languages".to_string(),
        icon_url: None,
    }
}

pub fn project_draft(title: &str) -> ProjectDraft {
    ProjectDraft {
        title: title.to_string(),
        description: "A project".to_string(),
        technologies: vec!["Flutter".to_string()],
        ..Default::default()
    }
}

pub fn education_draft(institution: &str, start: &str) -> EducationDraft {
    EducationDraft {
        institution: institution.to_string(),
        degree: "BSc".to_string(),
        field_of_study: "Computer Science".to_string(),
        start_date: date(start),
        end_date: None,
        gpa: Some(3.5),
        description: String::new(),
    }
}

pub fn experience_draft(company: &str, start: &str) -> ExperienceDraft {
    ExperienceDraft {
        company: company.to_string(),
        position: "Engineer".to_string(),
        start_date: date(start),
        end_date: None,
        description: "Built things".to_string(),
        technologies: vec!["Dart".to_string()],
    }
}

pub fn certificate_draft(title: &str, issued: &str) -> CertificateDraft {
    CertificateDraft {
        title: title.to_string(),
        issuer: "Google".to_string(),
        issue_date: date(issued),
        expiry_date: None,
        credential_id: None,
        credential_url: None,
        image_url: None,
    }
}

/// A form that passes validation for `collection`.
pub fn valid_form(collection: Collection) -> FormData {
    match collection {
        Collection::Profile => FormData::new()
            .with("name", "Ada Lovelace")
            .with("title", "Engineer")
            .with("bio", "Writes programs")
            .with("years_of_experience", "7"),
        Collection::Skills => FormData::new()
            .with("name", "Rust")
            .with("category", "Languages"),
        Collection::Education => FormData::new()
            .with("institution", "ITB")
            .with("degree", "BSc")
            .with("field_of_study", "Informatics")
            .with("start_date", "2015-08-01")
            .with("end_date", "2019-07-01")
            .with("gpa", "3.6"),
        Collection::Experience => FormData::new()
            .with("company", "Acme")
            .with("position", "Mobile Engineer")
            .with("start_date", "2020-01-01")
            .with("description", "Built the app")
            .with("technologies", "Flutter, Dart"),
        Collection::Projects => FormData::new()
            .with("title", "Portfolio")
            .with("description", "This site")
            .with("technologies", "Rust, actix-web"),
        Collection::Certificates => FormData::new()
            .with("title", "Associate Android Developer")
            .with("issuer", "Google")
            .with("issue_date", "2022-05-10"),
    }
}
