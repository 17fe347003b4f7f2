//! Memory record types and their request/response shapes

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Number of content characters shown in list excerpts
pub const EXCERPT_LEN: usize = 115;

/// Identifier of a memory record.
///
/// Only the 36-character hyphenated form is accepted; braced, URN and
/// simple forms are rejected even though `Uuid` itself would parse them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemoryId(Uuid);

impl MemoryId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        MemoryId(Uuid::new_v4())
    }
}

impl Default for MemoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for MemoryId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 36 {
            return Err(CoreError::Validation(format!("invalid uuid: {:?}", s)));
        }
        Uuid::try_parse(s)
            .map(MemoryId)
            .map_err(|_| CoreError::Validation(format!("invalid uuid: {:?}", s)))
    }
}

impl TryFrom<String> for MemoryId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MemoryId> for String {
    fn from(id: MemoryId) -> Self {
        id.to_string()
    }
}

/// A stored memory, as returned by `GET /memories/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub id: MemoryId,
    pub content: String,
    pub cover_url: String,
    pub is_public: bool,
    /// RFC 3339 UTC timestamp, microsecond precision
    pub created_at: String,
    /// Owner of the record
    pub user_id: String,
}

impl Memory {
    pub fn summary(&self) -> MemorySummary {
        MemorySummary {
            id: self.id,
            cover_url: self.cover_url.clone(),
            excerpt: excerpt(&self.content),
        }
    }

    pub fn detail(&self) -> MemoryDetail {
        MemoryDetail {
            id: self.id,
            content: self.content.clone(),
            cover_url: self.cover_url.clone(),
            is_public: self.is_public,
        }
    }
}

/// List view projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySummary {
    pub id: MemoryId,
    pub cover_url: String,
    pub excerpt: String,
}

/// Projection returned by create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryDetail {
    pub id: MemoryId,
    pub content: String,
    pub cover_url: String,
    pub is_public: bool,
}

/// Body of `POST /memories`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemoryRequest {
    pub content: String,
    pub cover_url: String,
    #[serde(default)]
    pub is_public: bool,
}

/// Body of `PUT /memories/:id`. Absent (or null) fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemoryRequest {
    pub content: Option<String>,
    pub cover_url: Option<String>,
    pub is_public: Option<bool>,
}

impl UpdateMemoryRequest {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.cover_url.is_none() && self.is_public.is_none()
    }
}

/// First `EXCERPT_LEN` characters of `content` followed by "...".
///
/// The ellipsis is appended even when nothing was cut. Length is counted in
/// Unicode scalar values, not UTF-16 code units, so a surrogate pair is never
/// split.
pub fn excerpt(content: &str) -> String {
    let mut out: String = content.chars().take(EXCERPT_LEN).collect();
    out.push_str("...");
    out
}
