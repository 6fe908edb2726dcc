//! Storage result and input types
//!
//! Defines the public entity every operation returns and the inputs the
//! managers accept.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::time::SystemTime;

/// Public view of a file or directory at the instant it was built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntity {
    /// Same as `url`; the URL is the entity's identity
    pub id: String,
    pub name: String,
    /// Extension with its leading dot; empty for directories
    pub ext: String,
    pub url: String,
    pub size: u64,
    /// Segments between the root and the entity. Includes the entity's own
    /// name for directories.
    pub dir: String,
    /// Birth time, when the platform reports one
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: Option<SystemTime>,
    /// Last access time
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: Option<SystemTime>,
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`;
/// `null` when the OS gave no value.
fn serialize_timestamp<S>(time: &Option<SystemTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match time {
        Some(time) => serializer.serialize_str(
            &DateTime::<Utc>::from(*time).to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        None => serializer.serialize_none(),
    }
}

/// Input of `directory.create`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateDirectoryInput {
    /// Relative path under the root, possibly multi-segment
    pub name: String,
}

impl CreateDirectoryInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Query of `directory.remove`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DirectoryQuery {
    /// Remove the directory together with its contents
    #[serde(default)]
    pub bulk: bool,
}

/// Input of `file.create`: a file name and the bytes to store under it
pub struct CreateFileInput<R> {
    pub name: String,
    pub stream: R,
}

impl<R> CreateFileInput<R> {
    pub fn new(name: impl Into<String>, stream: R) -> Self {
        Self {
            name: name.into(),
            stream,
        }
    }
}

/// Query of `file.create`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileQuery {
    /// Logical sub-directory the file is written to
    #[serde(default)]
    pub path: Option<String>,
}

impl FileQuery {
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}
