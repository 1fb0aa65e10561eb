use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Object-storage buckets the admin panel uploads into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Projects,
    Technologies,
    Cvs,
}

impl Bucket {
    pub fn name(self) -> &'static str {
        match self {
            Bucket::Projects => "projects",
            Bucket::Technologies => "technologies",
            Bucket::Cvs => "cvs",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Bucket {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "projects" => Ok(Bucket::Projects),
            "technologies" => Ok(Bucket::Technologies),
            "cvs" => Ok(Bucket::Cvs),
            other => Err(ValidationError::UnknownBucket(other.to_string())),
        }
    }
}

/// How an uploaded URL lands in its target field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadSlot {
    /// Single-image fields (`image_url`, `logo_url`, `cv_url`).
    Replace,
    /// Multi-image fields (`gallery_urls`).
    Append,
}

impl UploadSlot {
    pub fn apply_single(self, field: &mut String, url: String) {
        debug_assert_eq!(self, UploadSlot::Replace);
        *field = url;
    }

    pub fn apply_list(self, field: &mut Vec<String>, url: String) {
        match self {
            UploadSlot::Append => field.push(url),
            UploadSlot::Replace => *field = vec![url],
        }
    }
}
