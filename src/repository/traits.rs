//! Repository trait definitions
//!
//! These traits define the query and mutation surface the admin views use.
//! Only the primitive operations are required; lookups, filters and the
//! recency query are provided on top of `list_all` / `list_media`.

use crate::error::ContentResult;
use crate::models::{ContentItem, ContentPatch, ContentType, MediaItem, NewContent, NewMedia};

/// Repository for editable site content
pub trait ContentRepository: Send + Sync {
    /// Every content item, in storage order
    fn list_all(&self) -> ContentResult<Vec<ContentItem>>;

    /// Store a new item; the repository assigns `id` and both timestamps
    fn create(&self, new: NewContent) -> ContentResult<ContentItem>;

    /// Merge `patch` over the item with `id`
    ///
    /// Returns `Ok(None)` without writing anything when no item has `id`.
    fn update(&self, id: &str, patch: &ContentPatch) -> ContentResult<Option<ContentItem>>;

    /// Remove the item with `id`, returning whether anything was removed
    fn delete(&self, id: &str) -> ContentResult<bool>;

    /// Items of exactly one type, in storage order
    fn list_by_type(&self, content_type: ContentType) -> ContentResult<Vec<ContentItem>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|item| item.content_type() == content_type)
            .collect())
    }

    /// First item with `id`
    fn get_by_id(&self, id: &str) -> ContentResult<Option<ContentItem>> {
        Ok(self.list_all()?.into_iter().find(|item| item.id == id))
    }

    /// First item with `slug` in storage order
    fn get_by_slug(&self, slug: &str) -> ContentResult<Option<ContentItem>> {
        Ok(self.list_all()?.into_iter().find(|item| item.slug == slug))
    }

    /// Most recently updated items first, at most `limit` of them
    ///
    /// Items with equal `updatedAt` keep their storage order.
    fn recent_updates(&self, limit: usize) -> ContentResult<Vec<ContentItem>> {
        let mut items = self.list_all()?;
        // sort_by is stable
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        items.truncate(limit);
        Ok(items)
    }

    /// Count items of one type
    fn count_by_type(&self, content_type: ContentType) -> ContentResult<usize> {
        Ok(self.list_by_type(content_type)?.len())
    }
}

/// Repository for uploaded media
///
/// Media has no update; revising an asset means deleting and re-adding it.
pub trait MediaRepository: Send + Sync {
    /// Every media item, in storage order
    fn list_media(&self) -> ContentResult<Vec<MediaItem>>;

    /// Store a new asset; the repository assigns `id` and `uploadedAt`
    fn add_media(&self, new: NewMedia) -> ContentResult<MediaItem>;

    /// Remove the asset with `id`, returning whether anything was removed
    fn delete_media(&self, id: &str) -> ContentResult<bool>;

    /// First asset with `id`
    fn get_media_by_id(&self, id: &str) -> ContentResult<Option<MediaItem>> {
        Ok(self.list_media()?.into_iter().find(|item| item.id == id))
    }

    /// Count total media items
    fn count_media(&self) -> ContentResult<usize> {
        Ok(self.list_media()?.len())
    }
}
