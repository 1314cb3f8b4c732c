use chrono::NaiveDate;
use email_address::EmailAddress;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("URL pattern must compile")
});

pub const DATE_FORMAT: &str = "%Y-%m-%d";

//
// ──────────────────────────────────────────────────────────
// FormData
// ──────────────────────────────────────────────────────────
//
// Raw admin input keyed by field name. Incoming JSON is flattened to
// strings: numbers and booleans are rendered, null becomes empty, and
// arrays are joined the same way list fields are displayed.
//

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>")]
pub struct FormData(BTreeMap<String, String>);

impl From<BTreeMap<String, serde_json::Value>> for FormData {
    fn from(raw: BTreeMap<String, serde_json::Value>) -> Self {
        use serde_json::Value;

        fn flatten(value: Value) -> String {
            match value {
                Value::Null => String::new(),
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(items) => join_list(items.into_iter().map(flatten)),
                other => other.to_string(),
            }
        }

        FormData(raw.into_iter().map(|(k, v)| (k, flatten(v))).collect())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FormData(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Trimmed value, empty when the field is absent.
    pub fn raw(&self, field: &str) -> &str {
        self.0.get(field).map(|v| v.trim()).unwrap_or("")
    }

    pub fn is_blank(&self, field: &str) -> bool {
        self.raw(field).is_empty()
    }

    pub fn text(&self, field: &str) -> String {
        self.raw(field).to_string()
    }

    pub fn optional_text(&self, field: &str) -> Option<String> {
        Some(self.raw(field))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.raw(field), DATE_FORMAT).ok()
    }

    pub fn integer(&self, field: &str) -> Option<i64> {
        self.raw(field).parse().ok()
    }

    pub fn decimal(&self, field: &str) -> Option<f64> {
        self.raw(field).parse::<f64>().ok().filter(|v| v.is_finite())
    }

    pub fn flag(&self, field: &str) -> bool {
        parse_flag(self.raw(field)).unwrap_or(false)
    }

    pub fn list(&self, field: &str) -> Vec<String> {
        split_list(self.raw(field))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Some(true),
        "false" | "off" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

/// `"Rust, , Go ,SQL"` -> `["Rust", "Go", "SQL"]`
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

//
// ──────────────────────────────────────────────────────────
// Field errors
// ──────────────────────────────────────────────────────────
//

/// At most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Keeps the first message recorded for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(f, "{}", parts.join("; "))
    }
}

//
// ──────────────────────────────────────────────────────────
// Schema
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Url,
    /// `YYYY-MM-DD`
    Date,
    Integer { min: i64 },
    Decimal { min: f64, max: f64 },
    Flag,
    /// Comma separated, stored as a list.
    List,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    /// Message reported when the field is left empty. `None` makes it optional.
    pub required: Option<&'static str>,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn required(
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
        message: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            required: Some(message),
            kind,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            required: None,
            kind,
        }
    }

    fn check(&self, raw: &str) -> Result<(), String> {
        let empty = match self.kind {
            FieldKind::List => split_list(raw).is_empty(),
            _ => raw.is_empty(),
        };

        if empty {
            return match self.required {
                Some(message) => Err(message.to_string()),
                None => Ok(()),
            };
        }

        match self.kind {
            FieldKind::Text | FieldKind::List => Ok(()),
            FieldKind::Email => {
                if EmailAddress::is_valid(raw) {
                    Ok(())
                } else {
                    Err("Invalid email address".to_string())
                }
            }
            FieldKind::Url => {
                if URL_PATTERN.is_match(raw) {
                    Ok(())
                } else {
                    Err("Invalid URL".to_string())
                }
            }
            FieldKind::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map(|_| ())
                .map_err(|_| format!("{} must be a valid date (YYYY-MM-DD)", self.label)),
            FieldKind::Integer { min } => match raw.parse::<i64>() {
                Ok(v) if v >= min => Ok(()),
                Ok(_) => Err(format!("{} must be at least {}", self.label, min)),
                Err(_) => Err(format!("{} must be a whole number", self.label)),
            },
            FieldKind::Decimal { min, max } => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= min && v <= max => Ok(()),
                _ => Err(format!(
                    "{} must be a number between {} and {}",
                    self.label, min, max
                )),
            },
            FieldKind::Flag => parse_flag(raw)
                .map(|_| ())
                .ok_or_else(|| format!("{} must be true or false", self.label)),
        }
    }
}

#[derive(Debug)]
pub struct FormSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Checks every declared field. Unknown keys in `data` are ignored.
    pub fn validate(&self, data: &FormData) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        for spec in self.fields {
            if let Err(message) = spec.check(data.raw(spec.name)) {
                errors.add(spec.name, message);
            }
        }

        errors.into_result()
    }
}
