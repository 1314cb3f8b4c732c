use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::modules::content::application::domain::form::{
    FieldErrors, FieldKind, FieldSpec, FormData, FormSchema,
};

const WHATSAPP_BASE: &str = "https://wa.me";

pub static CONTACT_FORM: FormSchema = FormSchema {
    name: "contact",
    fields: &[
        FieldSpec::required("name", "Name", FieldKind::Text, "Name is required"),
        FieldSpec::required("email", "Email", FieldKind::Text, "Email is required"),
        FieldSpec::required("subject", "Subject", FieldKind::Text, "Subject is required"),
        FieldSpec::required("message", "Message", FieldKind::Text, "Message is required"),
    ],
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    fn as_form_data(&self) -> FormData {
        FormData::new()
            .with("name", &self.name)
            .with("email", &self.email)
            .with("subject", &self.subject)
            .with("message", &self.message)
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        CONTACT_FORM.validate(&self.as_form_data())
    }

    /// Message text prefilled in the messaging app.
    pub fn message_text(&self) -> String {
        format!(
            "Hello, I'm {} ({}).\n\nSubject: {}\n\n{}",
            self.name.trim(),
            self.email.trim(),
            self.subject.trim(),
            self.message.trim()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("Invalid contact form: {0}")]
    Invalid(FieldErrors),

    #[error("No phone number is configured for contact")]
    PhoneNotConfigured,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLink {
    pub url: String,
}

/// Keeps digits and a leading `+`.
pub fn normalize_phone(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();

    if trimmed.starts_with('+') && !digits.is_empty() {
        format!("+{digits}")
    } else {
        digits
    }
}

/// Deep link into WhatsApp with the form prefilled. Nothing is sent by
/// the server.
pub fn build_contact_link(
    form: &ContactForm,
    phone: Option<&str>,
) -> Result<ContactLink, ContactError> {
    form.validate().map_err(ContactError::Invalid)?;

    let phone = phone.map(normalize_phone).unwrap_or_default();
    // wa.me takes the number without the international `+`.
    let number = phone.trim_start_matches('+');
    if number.is_empty() {
        return Err(ContactError::PhoneNotConfigured);
    }

    let text = utf8_percent_encode(&form.message_text(), NON_ALPHANUMERIC).to_string();

    Ok(ContactLink {
        url: format!("{WHATSAPP_BASE}/{number}?text={text}"),
    })
}
