use super::timestamp;
use crate::error::ContentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Document,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Document => "document",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            "document" => Ok(MediaType::Document),
            other => Err(ContentError::UnknownMediaType(other.to_string())),
        }
    }
}

/// An uploaded asset
///
/// Unrecognised stored keys survive in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    /// Free-form, e.g. `1920x1080`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(with = "timestamp")]
    pub uploaded_at: DateTime<Utc>,
    pub uploaded_by: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields supplied by the caller when adding media
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedia {
    pub media_type: MediaType,
    pub title: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub file_size: Option<u64>,
    pub dimensions: Option<String>,
    pub uploaded_by: String,
}

impl NewMedia {
    pub fn new(
        media_type: MediaType,
        title: impl Into<String>,
        url: impl Into<String>,
        uploaded_by: impl Into<String>,
    ) -> Self {
        Self {
            media_type,
            title: title.into(),
            url: url.into(),
            thumbnail_url: None,
            file_size: None,
            dimensions: None,
            uploaded_by: uploaded_by.into(),
        }
    }

    pub fn thumbnail_url(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    pub fn file_size(mut self, bytes: u64) -> Self {
        self.file_size = Some(bytes);
        self
    }

    pub fn dimensions(mut self, dimensions: impl Into<String>) -> Self {
        self.dimensions = Some(dimensions.into());
        self
    }

    pub(crate) fn into_item(self, id: String, uploaded_at: DateTime<Utc>) -> MediaItem {
        MediaItem {
            id,
            media_type: self.media_type,
            title: self.title,
            url: self.url,
            thumbnail_url: self.thumbnail_url,
            file_size: self.file_size,
            dimensions: self.dimensions,
            uploaded_at,
            uploaded_by: self.uploaded_by,
            extra: Map::new(),
        }
    }
}
