use super::traits::{ContentRepository, MediaRepository};
use crate::error::ContentResult;
use crate::models::ContentType;
use serde::{Deserialize, Serialize};

/// Collection counts shown on the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStats {
    pub pages: usize,
    pub blog_posts: usize,
    pub testimonials: usize,
    pub media: usize,
}

impl ContentStats {
    /// Count pages, blog posts and testimonials, plus every media item
    ///
    /// Content items typed `media` are not counted anywhere.
    pub fn collect(
        content: &dyn ContentRepository,
        media: &dyn MediaRepository,
    ) -> ContentResult<Self> {
        let items = content.list_all()?;
        let count = |t: ContentType| items.iter().filter(|i| i.content_type() == t).count();

        Ok(Self {
            pages: count(ContentType::Page),
            blog_posts: count(ContentType::Blog),
            testimonials: count(ContentType::Testimonial),
            media: media.count_media()?,
        })
    }

    /// Pages, blog posts and testimonials together
    pub fn content_total(&self) -> usize {
        self.pages + self.blog_posts + self.testimonials
    }
}
