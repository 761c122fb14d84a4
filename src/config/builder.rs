use super::{RepositoryConfig, SlugPolicy, DEFAULT_CONTENT_KEY, DEFAULT_MEDIA_KEY, DEFAULT_RECENT_LIMIT};
use crate::error::{ContentError, ContentResult};
use crate::store::StoreBackend;
use std::path::PathBuf;

/// Builder for constructing RepositoryConfig instances with a fluent API
///
/// # Example
/// ```
/// use site_content::config::{RepositoryConfigBuilder, SlugPolicy};
///
/// let config = RepositoryConfigBuilder::new()
///     .slug_policy(SlugPolicy::Unique)
///     .recent_limit(10)
///     .json_file("site-store.json")
///     .build()
///     .unwrap();
/// assert_eq!(config.recent_limit, 10);
/// ```
#[derive(Debug)]
pub struct RepositoryConfigBuilder {
    content_key: String,
    media_key: String,
    recent_limit: usize,
    slug_policy: SlugPolicy,
    seed_defaults: bool,
    store: StoreBackend,
}

impl RepositoryConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            content_key: DEFAULT_CONTENT_KEY.to_string(),
            media_key: DEFAULT_MEDIA_KEY.to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            slug_policy: SlugPolicy::default(),
            seed_defaults: true,
            store: StoreBackend::Memory,
        }
    }

    /// Set the store key for content
    pub fn content_key(mut self, key: impl Into<String>) -> Self {
        self.content_key = key.into();
        self
    }

    /// Set the store key for media
    pub fn media_key(mut self, key: impl Into<String>) -> Self {
        self.media_key = key.into();
        self
    }

    /// Set the default recency query limit
    pub fn recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    /// Set the duplicate slug policy
    pub fn slug_policy(mut self, policy: SlugPolicy) -> Self {
        self.slug_policy = policy;
        self
    }

    /// Set whether first initialization seeds default content
    pub fn seed_defaults(mut self, seed: bool) -> Self {
        self.seed_defaults = seed;
        self
    }

    /// Set the storage backend
    pub fn store(mut self, store: StoreBackend) -> Self {
        self.store = store;
        self
    }

    /// Use a JSON file store at `path`
    pub fn json_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.store = StoreBackend::JsonFile { path: path.into() };
        self
    }

    /// Build the RepositoryConfig instance
    ///
    /// # Errors
    /// Returns `ContentError::BuilderError` if a key is empty, both
    /// collections share a key, or the recent limit is zero
    pub fn build(self) -> ContentResult<RepositoryConfig> {
        let config = RepositoryConfig {
            content_key: self.content_key,
            media_key: self.media_key,
            recent_limit: self.recent_limit,
            slug_policy: self.slug_policy,
            seed_defaults: self.seed_defaults,
            store: self.store,
        };

        config.validate().map_err(|e| match e {
            ContentError::ConfigError(msg) => ContentError::BuilderError(msg),
            other => other,
        })?;

        Ok(config)
    }
}

impl Default for RepositoryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
