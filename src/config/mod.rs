pub mod builder;

pub use builder::RepositoryConfigBuilder;

use crate::error::{ContentError, ContentResult};
use crate::store::StoreBackend;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default store key for the content collection
pub const DEFAULT_CONTENT_KEY: &str = "content-collection";

/// Default store key for the media collection
pub const DEFAULT_MEDIA_KEY: &str = "media-collection";

/// Default number of items returned by the recency query
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Repository configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoryConfig {
    /// Store key holding the content array
    pub content_key: String,

    /// Store key holding the media array
    pub media_key: String,

    /// Limit used by `recent_updates` when the caller gives none
    pub recent_limit: usize,

    /// How duplicate slugs are treated on create and update
    pub slug_policy: SlugPolicy,

    /// Seed the default pages, posts, testimonials and media on first
    /// initialization
    pub seed_defaults: bool,

    /// Backend the repository is layered on
    pub store: StoreBackend,
}

/// Duplicate slug handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugPolicy {
    /// Duplicates are stored; slug lookups return the earliest match
    #[default]
    Permissive,

    /// Create and update reject a slug another item already uses
    Unique,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            content_key: DEFAULT_CONTENT_KEY.to_string(),
            media_key: DEFAULT_MEDIA_KEY.to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            slug_policy: SlugPolicy::Permissive,
            seed_defaults: true,
            store: StoreBackend::Memory,
        }
    }
}

impl RepositoryConfig {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_file(path: impl AsRef<Path>) -> ContentResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            ContentError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: RepositoryConfig = serde_json::from_str(&raw).map_err(|e| {
            ContentError::ConfigError(format!("cannot parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the repository relies on
    pub fn validate(&self) -> ContentResult<()> {
        if self.content_key.is_empty() || self.media_key.is_empty() {
            return Err(ContentError::ConfigError(
                "collection keys must not be empty".to_string(),
            ));
        }
        if self.content_key == self.media_key {
            return Err(ContentError::ConfigError(format!(
                "content and media collections share the key '{}'",
                self.content_key
            )));
        }
        if self.recent_limit == 0 {
            return Err(ContentError::ConfigError(
                "recentLimit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
