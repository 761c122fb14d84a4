//! Store-backed repository
//!
//! Both collections are JSON arrays stored whole under their configured keys.
//! Every mutation reads the full array, changes it in memory and writes the
//! full array back. Within one process the read-modify-write cycles are
//! serialized by `write_lock`; separate processes sharing a store are not
//! coordinated and the last full write wins.

use super::seed;
use super::stats::ContentStats;
use super::traits::{ContentRepository, MediaRepository};
use crate::clock::{Clock, SystemClock};
use crate::config::{RepositoryConfig, SlugPolicy};
use crate::error::{ContentError, ContentResult};
use crate::models::timestamp::to_storage_precision;
use crate::models::{ContentItem, ContentPatch, MediaItem, NewContent, NewMedia};
use crate::store::{KeyValueStore, StoreFactory};
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct SiteRepository {
    store: Arc<dyn KeyValueStore>,
    config: RepositoryConfig,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl SiteRepository {
    /// Create a repository over `store` using the system clock
    pub fn new(store: Arc<dyn KeyValueStore>, config: RepositoryConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Create a repository with an explicit time source
    pub fn with_clock(
        store: Arc<dyn KeyValueStore>,
        config: RepositoryConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            config,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Validate `config` and open the store it names
    pub fn from_config(config: RepositoryConfig) -> ContentResult<Self> {
        config.validate()?;
        let store = StoreFactory::create(&config.store)?;
        Ok(Self::new(store, config))
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Seed both collections if the content collection does not exist yet
    ///
    /// A store that already holds content is left untouched. Returns whether
    /// anything was written.
    pub fn initialize(&self) -> ContentResult<bool> {
        let _guard = self.write_lock.lock()?;

        if self.store.contains(&self.config.content_key)? {
            debug!(key = %self.config.content_key, "content already present, skipping seed");
            return Ok(false);
        }

        let now = self.now();
        let (content, media) = if self.config.seed_defaults {
            (seed::default_content(now), seed::default_media(now))
        } else {
            (Vec::new(), Vec::new())
        };

        self.save_collection(&self.config.content_key, &content)?;
        self.save_collection(&self.config.media_key, &media)?;

        info!(
            content = content.len(),
            media = media.len(),
            "initialized site collections"
        );
        Ok(true)
    }

    /// Default-limit recency query
    pub fn recent(&self) -> ContentResult<Vec<ContentItem>> {
        self.recent_updates(self.config.recent_limit)
    }

    /// Dashboard counts
    pub fn stats(&self) -> ContentResult<ContentStats> {
        ContentStats::collect(self, self)
    }

    fn now(&self) -> DateTime<Utc> {
        to_storage_precision(self.clock.now())
    }

    // A fresh updatedAt is always later than the previous one, even when
    // the clock has not moved or has gone backwards.
    fn next_update_time(&self, previous: DateTime<Utc>) -> DateTime<Utc> {
        let now = self.now();
        if now > previous {
            now
        } else {
            previous + Duration::milliseconds(1)
        }
    }

    fn new_id() -> String {
        Uuid::now_v7().to_string()
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> ContentResult<Vec<T>> {
        match self.store.read(key)? {
            Some(raw) => {
                let items: Vec<T> =
                    serde_json::from_str(&raw).map_err(|source| ContentError::CorruptCollection {
                        key: key.to_string(),
                        source,
                    })?;
                debug!(key, count = items.len(), "collection loaded");
                Ok(items)
            }
            None => Ok(Vec::new()),
        }
    }

    fn save_collection<T: Serialize>(&self, key: &str, items: &[T]) -> ContentResult<()> {
        let json = serde_json::to_string(items)?;
        self.store.write(key, &json)?;
        debug!(key, count = items.len(), "collection saved");
        Ok(())
    }

    fn ensure_slug_free(
        &self,
        items: &[ContentItem],
        slug: &str,
        except_id: Option<&str>,
    ) -> ContentResult<()> {
        if self.config.slug_policy != SlugPolicy::Unique {
            return Ok(());
        }
        let taken = items
            .iter()
            .any(|item| item.slug == slug && Some(item.id.as_str()) != except_id);
        if taken {
            warn!(slug, "rejected duplicate slug");
            return Err(ContentError::DuplicateSlug(slug.to_string()));
        }
        Ok(())
    }
}

impl ContentRepository for SiteRepository {
    fn list_all(&self) -> ContentResult<Vec<ContentItem>> {
        self.load_collection(&self.config.content_key)
    }

    fn create(&self, new: NewContent) -> ContentResult<ContentItem> {
        let _guard = self.write_lock.lock()?;
        let mut items: Vec<ContentItem> = self.load_collection(&self.config.content_key)?;
        self.ensure_slug_free(&items, &new.slug, None)?;

        let now = self.now();
        let item = new.into_item(Self::new_id(), now, now);
        items.push(item.clone());
        self.save_collection(&self.config.content_key, &items)?;

        info!(id = %item.id, kind = %item.content_type(), slug = %item.slug, "content created");
        Ok(item)
    }

    fn update(&self, id: &str, patch: &ContentPatch) -> ContentResult<Option<ContentItem>> {
        let _guard = self.write_lock.lock()?;
        let mut items: Vec<ContentItem> = self.load_collection(&self.config.content_key)?;

        let Some(index) = items.iter().position(|item| item.id == id) else {
            warn!(id, "update skipped, no such content");
            return Ok(None);
        };

        let mut updated = items[index].clone();
        patch.apply_to(&mut updated)?;
        if patch.slug.as_deref().is_some_and(|slug| slug != items[index].slug) {
            self.ensure_slug_free(&items, &updated.slug, Some(id))?;
        }
        updated.updated_at = self.next_update_time(updated.updated_at);

        items[index] = updated.clone();
        self.save_collection(&self.config.content_key, &items)?;

        info!(id, "content updated");
        Ok(Some(updated))
    }

    fn delete(&self, id: &str) -> ContentResult<bool> {
        let _guard = self.write_lock.lock()?;
        let mut items: Vec<ContentItem> = self.load_collection(&self.config.content_key)?;

        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            warn!(id, "delete skipped, no such content");
            return Ok(false);
        }

        self.save_collection(&self.config.content_key, &items)?;
        info!(id, "content deleted");
        Ok(true)
    }
}

impl MediaRepository for SiteRepository {
    fn list_media(&self) -> ContentResult<Vec<MediaItem>> {
        self.load_collection(&self.config.media_key)
    }

    fn add_media(&self, new: NewMedia) -> ContentResult<MediaItem> {
        let _guard = self.write_lock.lock()?;
        let mut items: Vec<MediaItem> = self.load_collection(&self.config.media_key)?;

        let item = new.into_item(Self::new_id(), self.now());
        items.push(item.clone());
        self.save_collection(&self.config.media_key, &items)?;

        info!(id = %item.id, kind = %item.media_type, "media added");
        Ok(item)
    }

    fn delete_media(&self, id: &str) -> ContentResult<bool> {
        let _guard = self.write_lock.lock()?;
        let mut items: Vec<MediaItem> = self.load_collection(&self.config.media_key)?;

        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            warn!(id, "media delete skipped, no such media");
            return Ok(false);
        }

        self.save_collection(&self.config.media_key, &items)?;
        info!(id, "media deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::RepositoryConfigBuilder;
    use crate::models::{BlogFields, ContentKind, ContentType, MediaType, TestimonialFields};
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    struct Fixture {
        store: Arc<MemoryStore>,
        clock: Arc<ManualClock>,
        repo: SiteRepository,
    }

    fn fixture_with(config: RepositoryConfig) -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        ));
        let repo = SiteRepository::with_clock(store.clone(), config, clock.clone());
        Fixture { store, clock, repo }
    }

    fn fixture() -> Fixture {
        fixture_with(RepositoryConfig::default())
    }

    fn draft_page(slug: &str) -> NewContent {
        NewContent::page("Careers", "Join the team.", slug, "Admin")
    }

    #[test]
    fn test_initialize_seeds_once() {
        let f = fixture();
        assert!(f.repo.initialize().unwrap());
        let first = f.repo.list_all().unwrap();
        assert_eq!(first.len(), 8);
        assert_eq!(f.repo.list_media().unwrap().len(), 2);

        f.clock.advance(Duration::seconds(5));
        assert!(!f.repo.initialize().unwrap());
        assert_eq!(f.repo.list_all().unwrap(), first);
        assert_eq!(f.store.write_count(), 2);
    }

    #[test]
    fn test_initialize_leaves_existing_empty_collection() {
        let f = fixture();
        f.store.write("content-collection", "[]").unwrap();
        assert!(!f.repo.initialize().unwrap());
        assert!(f.repo.list_all().unwrap().is_empty());
        assert!(f.repo.list_media().unwrap().is_empty());
    }

    #[test]
    fn test_initialize_without_defaults() {
        let config = RepositoryConfigBuilder::new()
            .seed_defaults(false)
            .build()
            .unwrap();
        let f = fixture_with(config);
        assert!(f.repo.initialize().unwrap());
        assert!(f.store.contains("content-collection").unwrap());
        assert!(f.repo.list_all().unwrap().is_empty());
        assert!(f.repo.list_media().unwrap().is_empty());
    }

    #[test]
    fn test_empty_store_reads_empty() {
        let f = fixture();
        assert!(f.repo.list_all().unwrap().is_empty());
        assert!(f.repo.get_by_id("1").unwrap().is_none());
        assert_eq!(f.repo.stats().unwrap(), ContentStats::default());
    }

    #[test]
    fn test_create_then_read() {
        let f = fixture();
        let created = f.repo.create(draft_page("careers")).unwrap();

        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.created_at, f.clock.now());
        assert_eq!(f.repo.get_by_id(&created.id).unwrap(), Some(created.clone()));
        assert_eq!(f.repo.get_by_slug("careers").unwrap(), Some(created));
    }

    #[test]
    fn test_create_assigns_distinct_ids() {
        let f = fixture();
        let a = f.repo.create(draft_page("a")).unwrap();
        let b = f.repo.create(draft_page("b")).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(f.repo.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_update_preserves_identity_and_advances_time() {
        let f = fixture();
        f.repo.initialize().unwrap();
        let before = f.repo.get_by_id("5").unwrap().unwrap();

        f.clock.advance(Duration::minutes(1));
        let updated = f
            .repo
            .update("5", &ContentPatch::new().title("X"))
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, "5");
        assert_eq!(updated.title, "X");
        assert_eq!(updated.content, before.content);
        assert_eq!(updated.slug, before.slug);
        assert_eq!(updated.kind, before.kind);
        assert_eq!(updated.created_at, before.created_at);
        assert!(updated.updated_at > before.updated_at);
        assert_eq!(f.repo.get_by_id("5").unwrap(), Some(updated));
    }

    #[test]
    fn test_update_advances_even_when_clock_is_frozen() {
        let f = fixture();
        let created = f.repo.create(draft_page("careers")).unwrap();
        let first = f
            .repo
            .update(&created.id, &ContentPatch::new().content("v2"))
            .unwrap()
            .unwrap();
        let second = f
            .repo
            .update(&created.id, &ContentPatch::new().content("v3"))
            .unwrap()
            .unwrap();

        assert!(first.updated_at > created.updated_at);
        assert!(second.updated_at > first.updated_at);
        assert!(second.updated_at >= second.created_at);
    }

    #[test]
    fn test_update_missing_id_does_not_write() {
        let f = fixture();
        f.repo.initialize().unwrap();
        let writes = f.store.write_count();

        let result = f.repo.update("nope", &ContentPatch::new().title("X")).unwrap();
        assert!(result.is_none());
        assert_eq!(f.store.write_count(), writes);
    }

    #[test]
    fn test_invalid_patch_does_not_write() {
        let f = fixture();
        f.repo.initialize().unwrap();
        let writes = f.store.write_count();

        let err = f
            .repo
            .update("1", &ContentPatch::new().tags(Some(vec!["x".to_string()])))
            .unwrap_err();
        assert!(matches!(err, ContentError::InvalidPatch(_)));
        assert_eq!(f.store.write_count(), writes);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let f = fixture();
        f.repo.initialize().unwrap();

        assert!(f.repo.delete("3").unwrap());
        let remaining = f.repo.list_all().unwrap();
        assert_eq!(remaining.len(), 7);
        assert!(remaining.iter().all(|i| i.id != "3"));

        let writes = f.store.write_count();
        assert!(!f.repo.delete("3").unwrap());
        assert_eq!(f.repo.list_all().unwrap(), remaining);
        assert_eq!(f.store.write_count(), writes);
    }

    #[test]
    fn test_recent_updates_most_recent_first() {
        let f = fixture();
        let a = f.repo.create(draft_page("a")).unwrap();
        f.clock.advance(Duration::seconds(1));
        let b = f.repo.create(draft_page("b")).unwrap();
        f.clock.advance(Duration::seconds(1));
        let c = f.repo.create(draft_page("c")).unwrap();

        let recent = f.repo.recent_updates(2).unwrap();
        assert_eq!(recent, vec![c.clone(), b.clone()]);

        f.clock.advance(Duration::seconds(1));
        f.repo.update(&a.id, &ContentPatch::new().title("bumped")).unwrap();
        let ids: Vec<String> = f.repo.recent().unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![a.id, c.id, b.id]);
    }

    #[test]
    fn test_stats_after_seed() {
        let f = fixture();
        f.repo.initialize().unwrap();
        let stats = f.repo.stats().unwrap();
        assert_eq!(
            stats,
            ContentStats {
                pages: 4,
                blog_posts: 2,
                testimonials: 2,
                media: 2
            }
        );
        assert_eq!(stats.content_total(), f.repo.list_all().unwrap().len());
    }

    #[test]
    fn test_type_filters_partition() {
        let f = fixture();
        f.repo.initialize().unwrap();
        f.repo
            .create(NewContent::blog("Post", "Body", "post", "Admin", BlogFields::default()))
            .unwrap();

        let total: usize = [ContentType::Page, ContentType::Blog, ContentType::Testimonial]
            .into_iter()
            .map(|t| f.repo.list_by_type(t).unwrap().len())
            .sum();
        assert_eq!(total, f.repo.list_all().unwrap().len());
        assert_eq!(f.repo.list_by_type(ContentType::Blog).unwrap().len(), 3);
    }

    #[test]
    fn test_permissive_slugs_allow_duplicates() {
        let f = fixture();
        f.repo.initialize().unwrap();
        let dup = f.repo.create(draft_page("home")).unwrap();

        assert_eq!(f.repo.get_by_slug("home").unwrap().unwrap().id, "1");
        assert_ne!(dup.id, "1");
    }

    #[test]
    fn test_unique_slug_policy() {
        let config = RepositoryConfigBuilder::new()
            .slug_policy(SlugPolicy::Unique)
            .build()
            .unwrap();
        let f = fixture_with(config);
        f.repo.initialize().unwrap();

        let err = f.repo.create(draft_page("home")).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug(ref s) if s == "home"));

        let err = f
            .repo
            .update("2", &ContentPatch::new().slug("home"))
            .unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug(_)));

        // Re-saving an item with its own slug is fine
        assert!(f
            .repo
            .update("1", &ContentPatch::new().slug("home").title("Start"))
            .unwrap()
            .is_some());
        assert_eq!(f.repo.list_all().unwrap().len(), 8);
    }

    #[test]
    fn test_unique_policy_still_edits_existing_duplicates() {
        let config = RepositoryConfigBuilder::new()
            .slug_policy(SlugPolicy::Unique)
            .build()
            .unwrap();
        let f = fixture_with(config);
        f.store
            .write(
                "content-collection",
                r#"[
                {"id":"1","type":"page","title":"A","content":"","slug":"dup","author":"Admin",
                 "createdAt":"2024-05-01T09:00:00.000Z","updatedAt":"2024-05-01T09:00:00.000Z"},
                {"id":"2","type":"page","title":"B","content":"","slug":"dup","author":"Admin",
                 "createdAt":"2024-05-01T09:00:00.000Z","updatedAt":"2024-05-01T09:00:00.000Z"}
            ]"#,
            )
            .unwrap();

        let renamed = f
            .repo
            .update("1", &ContentPatch::new().title("Renamed"))
            .unwrap()
            .unwrap();
        assert_eq!(renamed.slug, "dup");

        // Keeping the current slug is not a change either
        assert!(f
            .repo
            .update("2", &ContentPatch::new().slug("dup"))
            .unwrap()
            .is_some());

        // Moving onto a taken slug is still rejected
        f.repo.create(draft_page("careers")).unwrap();
        assert!(matches!(
            f.repo.update("1", &ContentPatch::new().slug("careers")),
            Err(ContentError::DuplicateSlug(_))
        ));
    }

    #[test]
    fn test_update_keeps_fields_foreign_to_the_type() {
        let f = fixture();
        f.store
            .write(
                "content-collection",
                r#"[{"id":"1","type":"page","title":"A","content":"","slug":"legal",
                "author":"Admin","featured":true,"category":"Legal",
                "createdAt":"2024-05-01T09:00:00.000Z","updatedAt":"2024-05-01T09:00:00.000Z"}]"#,
            )
            .unwrap();

        f.repo.update("1", &ContentPatch::new().title("B")).unwrap();
        f.repo.create(draft_page("careers")).unwrap();

        let raw = f.store.read("content-collection").unwrap().unwrap();
        let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored[0]["title"], "B");
        assert_eq!(stored[0]["featured"], true);
        assert_eq!(stored[0]["category"], "Legal");
        assert_eq!(stored[0]["type"], "page");
    }

    #[test]
    fn test_media_keeps_unknown_keys() {
        let f = fixture();
        f.store
            .write(
                "media-collection",
                r#"[{"id":"9","type":"image","title":"Hero","url":"/hero.jpg",
                "uploadedAt":"2024-05-01T09:00:00.000Z","uploadedBy":"Admin","altText":"Campus"}]"#,
            )
            .unwrap();

        f.repo
            .add_media(NewMedia::new(MediaType::Document, "Brochure", "/b.pdf", "Admin"))
            .unwrap();

        let hero = f.repo.get_media_by_id("9").unwrap().unwrap();
        assert_eq!(hero.extra["altText"], "Campus");
        let raw = f.store.read("media-collection").unwrap().unwrap();
        assert!(raw.contains(r#""altText":"Campus""#));
    }

    #[test]
    fn test_update_changes_testimonial_fields() {
        let f = fixture();
        let created = f
            .repo
            .create(NewContent::testimonial(
                "Great",
                "Loved it",
                "testimonial-3",
                "Ada",
                TestimonialFields::default(),
            ))
            .unwrap();

        let updated = f
            .repo
            .update(
                &created.id,
                &ContentPatch::new()
                    .company(Some("Acme".to_string()))
                    .image(Some("/ada.png".to_string())),
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.company(), Some("Acme"));
        assert_eq!(updated.image.as_deref(), Some("/ada.png"));
        assert!(matches!(updated.kind, ContentKind::Testimonial(_)));
    }

    #[test]
    fn test_media_add_get_delete() {
        let f = fixture();
        f.repo.initialize().unwrap();

        let added = f
            .repo
            .add_media(
                NewMedia::new(MediaType::Video, "Walkthrough", "/walkthrough.mp4", "Admin")
                    .file_size(1_048_576),
            )
            .unwrap();
        assert_eq!(added.uploaded_at, f.clock.now());
        assert_eq!(f.repo.get_media_by_id(&added.id).unwrap(), Some(added.clone()));
        assert_eq!(f.repo.stats().unwrap().media, 3);

        assert!(f.repo.delete_media(&added.id).unwrap());
        assert!(!f.repo.delete_media(&added.id).unwrap());
        assert!(f.repo.get_media_by_id("9").unwrap().is_some());
        assert_eq!(f.repo.list_media().unwrap().len(), 2);
    }

    #[test]
    fn test_corrupt_collection_is_an_error() {
        let f = fixture();
        f.store.write("content-collection", "{oops").unwrap();

        match f.repo.list_all() {
            Err(ContentError::CorruptCollection { key, .. }) => {
                assert_eq!(key, "content-collection")
            }
            other => panic!("expected corruption error, got {:?}", other),
        }
        assert!(f.repo.create(draft_page("x")).is_err());
    }

    #[test]
    fn test_schema_violation_is_an_error() {
        let f = fixture();
        f.store
            .write("media-collection", r#"[{"id":"1","type":"gif"}]"#)
            .unwrap();
        assert!(matches!(
            f.repo.list_media(),
            Err(ContentError::CorruptCollection { .. })
        ));
    }

    #[test]
    fn test_custom_keys() {
        let config = RepositoryConfigBuilder::new()
            .content_key("c")
            .media_key("m")
            .build()
            .unwrap();
        let f = fixture_with(config);
        f.repo.initialize().unwrap();
        assert!(f.store.contains("c").unwrap());
        assert!(f.store.contains("m").unwrap());
        assert!(!f.store.contains("content-collection").unwrap());
    }

    #[test]
    fn test_concurrent_creates_are_not_lost() {
        let f = fixture();
        let repo = Arc::new(f.repo);

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || {
                    for i in 0..5 {
                        repo.create(draft_page(&format!("p-{}-{}", n, i))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(repo.list_all().unwrap().len(), 40);
    }
}
