use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];
const IMAGE_AND_PDF_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "application/pdf"];

const KEY_SUFFIX_LEN: usize = 11;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Storage bucket for media assets. Each bucket carries its own MIME allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Avatars,
    Projects,
    Skills,
    Certificates,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::Avatars,
        Bucket::Projects,
        Bucket::Skills,
        Bucket::Certificates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Avatars => "avatars",
            Bucket::Projects => "projects",
            Bucket::Skills => "skills",
            Bucket::Certificates => "certificates",
        }
    }

    pub fn allowed_mime_types(&self) -> &'static [&'static str] {
        match self {
            Bucket::Certificates => IMAGE_AND_PDF_TYPES,
            Bucket::Avatars | Bucket::Projects | Bucket::Skills => IMAGE_TYPES,
        }
    }

    pub fn allows(&self, content_type: &str) -> bool {
        let mime = content_type.trim().to_ascii_lowercase();
        self.allowed_mime_types().contains(&mime.as_str())
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown bucket: {0}")]
pub struct UnknownBucket(pub String);

impl FromStr for Bucket {
    type Err = UnknownBucket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bucket::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| UnknownBucket(s.to_string()))
    }
}

/// A file handed over by the admin, fully buffered. No size limit applies here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: bytes::Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub url: String,
    pub path: String,
}

/// `<unix-millis>-<random base36>.<ext>` where `ext` is whatever follows the
/// last `.` of the original name (the whole name when there is no dot).
pub fn generate_object_key(file_name: &str) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or(file_name);

    let mut rng = rand::thread_rng();
    let suffix: String = (0..KEY_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();

    format!("{}-{}.{}", Utc::now().timestamp_millis(), suffix, ext)
}
