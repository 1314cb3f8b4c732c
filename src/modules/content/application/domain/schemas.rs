use crate::modules::content::application::domain::entities::{
    Certificate, CertificateDraft, ContentEntity, Education, EducationDraft, Experience,
    ExperienceDraft, Profile, ProfileDraft, Project, ProjectDraft, Skill, SkillDraft,
};
use crate::modules::content::application::domain::form::{
    format_date, join_list, FieldErrors, FieldKind, FieldSpec, FormData, FormSchema,
};
use crate::modules::media::application::domain::entities::Bucket;

/// Form field that holds the public URL of an uploaded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaSlot {
    pub bucket: Bucket,
    pub field: &'static str,
}

/// Binds an entity to its admin form: validation schema, form -> draft,
/// and record -> form for edit mode.
pub trait FormEntity: ContentEntity {
    const MEDIA: Option<MediaSlot>;

    fn schema() -> &'static FormSchema;

    fn draft_from_form(form: &FormData) -> Result<Self::Draft, FieldErrors>;

    fn to_form(&self) -> FormData;

    fn media_url(&self) -> Option<&str>;
}

fn required_date(
    form: &FormData,
    field: &'static str,
) -> Result<chrono::NaiveDate, FieldErrors> {
    form.date(field).ok_or_else(|| {
        FieldErrors::single(field, format!("{field} must be a valid date (YYYY-MM-DD)"))
    })
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

// ============================================================================
// Profile
// ============================================================================

pub static PROFILE_FORM: FormSchema = FormSchema {
    name: "profile",
    fields: &[
        FieldSpec::required("name", "Name", FieldKind::Text, "Name is required"),
        FieldSpec::required("title", "Title", FieldKind::Text, "Title is required"),
        FieldSpec::required("bio", "Bio", FieldKind::Text, "Bio is required"),
        FieldSpec::optional("location", "Location", FieldKind::Text),
        FieldSpec::optional("email", "Email", FieldKind::Email),
        FieldSpec::optional("phone", "Phone", FieldKind::Text),
        FieldSpec::optional("github_url", "GitHub URL", FieldKind::Url),
        FieldSpec::optional("linkedin_url", "LinkedIn URL", FieldKind::Url),
        FieldSpec::optional("website_url", "Website URL", FieldKind::Url),
        FieldSpec::optional("avatar_url", "Avatar", FieldKind::Url),
        FieldSpec::optional("resume_url", "Resume URL", FieldKind::Url),
        FieldSpec::optional(
            "years_of_experience",
            "Years of experience",
            FieldKind::Integer { min: 0 },
        ),
    ],
};

impl FormEntity for Profile {
    const MEDIA: Option<MediaSlot> = Some(MediaSlot {
        bucket: Bucket::Avatars,
        field: "avatar_url",
    });

    fn schema() -> &'static FormSchema {
        &PROFILE_FORM
    }

    fn draft_from_form(form: &FormData) -> Result<ProfileDraft, FieldErrors> {
        PROFILE_FORM.validate(form)?;

        let years = form.integer("years_of_experience").unwrap_or(0);

        Ok(ProfileDraft {
            name: form.text("name"),
            title: form.text("title"),
            bio: form.text("bio"),
            location: form.optional_text("location"),
            email: form.optional_text("email"),
            phone: form.optional_text("phone"),
            github_url: form.optional_text("github_url"),
            linkedin_url: form.optional_text("linkedin_url"),
            website_url: form.optional_text("website_url"),
            avatar_url: form.optional_text("avatar_url"),
            resume_url: form.optional_text("resume_url"),
            years_of_experience: i32::try_from(years).unwrap_or(i32::MAX),
        })
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("name", &self.name)
            .with("title", &self.title)
            .with("bio", &self.bio)
            .with("location", opt(&self.location))
            .with("email", opt(&self.email))
            .with("phone", opt(&self.phone))
            .with("github_url", opt(&self.github_url))
            .with("linkedin_url", opt(&self.linkedin_url))
            .with("website_url", opt(&self.website_url))
            .with("avatar_url", opt(&self.avatar_url))
            .with("resume_url", opt(&self.resume_url))
            .with("years_of_experience", self.years_of_experience.to_string())
    }

    fn media_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }
}

// ============================================================================
// Skill
// ============================================================================

pub static SKILL_FORM: FormSchema = FormSchema {
    name: "skill",
    fields: &[
        FieldSpec::required("name", "Name", FieldKind::Text, "Skill name is required"),
        FieldSpec::required("category", "Category", FieldKind::Text, "Category is required"),
        FieldSpec::optional("icon_url", "Icon", FieldKind::Url),
    ],
};

impl FormEntity for Skill {
    const MEDIA: Option<MediaSlot> = Some(MediaSlot {
        bucket: Bucket::Skills,
        field: "icon_url",
    });

    fn schema() -> &'static FormSchema {
        &SKILL_FORM
    }

    fn draft_from_form(form: &FormData) -> Result<SkillDraft, FieldErrors> {
        SKILL_FORM.validate(form)?;

        Ok(SkillDraft {
            name: form.text("name"),
            category: form.text("category"),
            icon_url: form.optional_text("icon_url"),
        })
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("name", &self.name)
            .with("category", &self.category)
            .with("icon_url", opt(&self.icon_url))
    }

    fn media_url(&self) -> Option<&str> {
        self.icon_url.as_deref()
    }
}

// ============================================================================
// Education
// ============================================================================

pub static EDUCATION_FORM: FormSchema = FormSchema {
    name: "education",
    fields: &[
        FieldSpec::required(
            "institution",
            "Institution",
            FieldKind::Text,
            "Institution name is required",
        ),
        FieldSpec::required("degree", "Degree", FieldKind::Text, "Degree is required"),
        FieldSpec::required(
            "field_of_study",
            "Field of study",
            FieldKind::Text,
            "Field of study is required",
        ),
        FieldSpec::required(
            "start_date",
            "Start date",
            FieldKind::Date,
            "Start date is required",
        ),
        FieldSpec::optional("end_date", "End date", FieldKind::Date),
        FieldSpec::optional("gpa", "GPA", FieldKind::Decimal { min: 0.0, max: 4.0 }),
        FieldSpec::optional("description", "Description", FieldKind::Text),
    ],
};

impl FormEntity for Education {
    const MEDIA: Option<MediaSlot> = None;

    fn schema() -> &'static FormSchema {
        &EDUCATION_FORM
    }

    fn draft_from_form(form: &FormData) -> Result<EducationDraft, FieldErrors> {
        EDUCATION_FORM.validate(form)?;

        Ok(EducationDraft {
            institution: form.text("institution"),
            degree: form.text("degree"),
            field_of_study: form.text("field_of_study"),
            start_date: required_date(form, "start_date")?,
            end_date: form.date("end_date"),
            gpa: form.decimal("gpa"),
            description: form.text("description"),
        })
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("institution", &self.institution)
            .with("degree", &self.degree)
            .with("field_of_study", &self.field_of_study)
            .with("start_date", format_date(self.start_date))
            .with("end_date", self.end_date.map(format_date).unwrap_or_default())
            .with("gpa", self.gpa.map(|g| g.to_string()).unwrap_or_default())
            .with("description", &self.description)
    }

    fn media_url(&self) -> Option<&str> {
        None
    }
}

// ============================================================================
// Experience
// ============================================================================

pub static EXPERIENCE_FORM: FormSchema = FormSchema {
    name: "experience",
    fields: &[
        FieldSpec::required("company", "Company", FieldKind::Text, "Company name is required"),
        FieldSpec::required("position", "Position", FieldKind::Text, "Position is required"),
        FieldSpec::required(
            "start_date",
            "Start date",
            FieldKind::Date,
            "Start date is required",
        ),
        FieldSpec::optional("end_date", "End date", FieldKind::Date),
        FieldSpec::required(
            "description",
            "Description",
            FieldKind::Text,
            "Description is required",
        ),
        FieldSpec::required(
            "technologies",
            "Technologies",
            FieldKind::List,
            "Technologies are required",
        ),
    ],
};

impl FormEntity for Experience {
    const MEDIA: Option<MediaSlot> = None;

    fn schema() -> &'static FormSchema {
        &EXPERIENCE_FORM
    }

    fn draft_from_form(form: &FormData) -> Result<ExperienceDraft, FieldErrors> {
        EXPERIENCE_FORM.validate(form)?;

        Ok(ExperienceDraft {
            company: form.text("company"),
            position: form.text("position"),
            start_date: required_date(form, "start_date")?,
            end_date: form.date("end_date"),
            description: form.text("description"),
            technologies: form.list("technologies"),
        })
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("company", &self.company)
            .with("position", &self.position)
            .with("start_date", format_date(self.start_date))
            .with("end_date", self.end_date.map(format_date).unwrap_or_default())
            .with("description", &self.description)
            .with("technologies", join_list(&self.technologies))
    }

    fn media_url(&self) -> Option<&str> {
        None
    }
}

// ============================================================================
// Project
// ============================================================================

pub static PROJECT_FORM: FormSchema = FormSchema {
    name: "project",
    fields: &[
        FieldSpec::required("title", "Title", FieldKind::Text, "Project title is required"),
        FieldSpec::required(
            "description",
            "Description",
            FieldKind::Text,
            "Description is required",
        ),
        FieldSpec::required(
            "technologies",
            "Technologies",
            FieldKind::List,
            "Technologies are required",
        ),
        FieldSpec::optional("github_url", "GitHub URL", FieldKind::Url),
        FieldSpec::optional("live_url", "Live URL", FieldKind::Url),
        FieldSpec::optional("image_url", "Image", FieldKind::Url),
        FieldSpec::optional("featured", "Featured", FieldKind::Flag),
    ],
};

impl FormEntity for Project {
    const MEDIA: Option<MediaSlot> = Some(MediaSlot {
        bucket: Bucket::Projects,
        field: "image_url",
    });

    fn schema() -> &'static FormSchema {
        &PROJECT_FORM
    }

    fn draft_from_form(form: &FormData) -> Result<ProjectDraft, FieldErrors> {
        PROJECT_FORM.validate(form)?;

        Ok(ProjectDraft {
            title: form.text("title"),
            description: form.text("description"),
            technologies: form.list("technologies"),
            github_url: form.optional_text("github_url"),
            live_url: form.optional_text("live_url"),
            image_url: form.optional_text("image_url"),
            featured: form.flag("featured"),
        })
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("title", &self.title)
            .with("description", &self.description)
            .with("technologies", join_list(&self.technologies))
            .with("github_url", opt(&self.github_url))
            .with("live_url", opt(&self.live_url))
            .with("image_url", opt(&self.image_url))
            .with("featured", self.featured.to_string())
    }

    fn media_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

// ============================================================================
// Certificate
// ============================================================================

pub static CERTIFICATE_FORM: FormSchema = FormSchema {
    name: "certificate",
    fields: &[
        FieldSpec::required("title", "Title", FieldKind::Text, "Certificate title is required"),
        FieldSpec::required("issuer", "Issuer", FieldKind::Text, "Issuer is required"),
        FieldSpec::required(
            "issue_date",
            "Issue date",
            FieldKind::Date,
            "Issue date is required",
        ),
        FieldSpec::optional("expiry_date", "Expiry date", FieldKind::Date),
        FieldSpec::optional("credential_id", "Credential ID", FieldKind::Text),
        FieldSpec::optional("credential_url", "Credential URL", FieldKind::Url),
        FieldSpec::optional("image_url", "Image", FieldKind::Url),
    ],
};

impl FormEntity for Certificate {
    const MEDIA: Option<MediaSlot> = Some(MediaSlot {
        bucket: Bucket::Certificates,
        field: "image_url",
    });

    fn schema() -> &'static FormSchema {
        &CERTIFICATE_FORM
    }

    fn draft_from_form(form: &FormData) -> Result<CertificateDraft, FieldErrors> {
        CERTIFICATE_FORM.validate(form)?;

        Ok(CertificateDraft {
            title: form.text("title"),
            issuer: form.text("issuer"),
            issue_date: required_date(form, "issue_date")?,
            expiry_date: form.date("expiry_date"),
            credential_id: form.optional_text("credential_id"),
            credential_url: form.optional_text("credential_url"),
            image_url: form.optional_text("image_url"),
        })
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("title", &self.title)
            .with("issuer", &self.issuer)
            .with("issue_date", format_date(self.issue_date))
            .with(
                "expiry_date",
                self.expiry_date.map(format_date).unwrap_or_default(),
            )
            .with("credential_id", opt(&self.credential_id))
            .with("credential_url", opt(&self.credential_url))
            .with("image_url", opt(&self.image_url))
    }

    fn media_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}
