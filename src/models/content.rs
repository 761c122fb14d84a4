use super::timestamp;
use crate::error::{ContentError, ContentResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Discriminator for content items, without the per-type payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Page,
    Blog,
    Testimonial,
    Media,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Page => "page",
            ContentType::Blog => "blog",
            ContentType::Testimonial => "testimonial",
            ContentType::Media => "media",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page" => Ok(ContentType::Page),
            "blog" => Ok(ContentType::Blog),
            "testimonial" => Ok(ContentType::Testimonial),
            "media" => Ok(ContentType::Media),
            other => Err(ContentError::UnknownContentType(other.to_string())),
        }
    }
}

/// Fields only blog posts carry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Fields only testimonials carry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Content type together with its type-specific fields
///
/// Flattened into [`ContentItem`], so the stored JSON is a flat object with a
/// `type` discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentKind {
    Page,
    Blog(BlogFields),
    Testimonial(TestimonialFields),
    Media,
}

impl ContentKind {
    pub fn content_type(&self) -> ContentType {
        match self {
            ContentKind::Page => ContentType::Page,
            ContentKind::Blog(_) => ContentType::Blog,
            ContentKind::Testimonial(_) => ContentType::Testimonial,
            ContentKind::Media => ContentType::Media,
        }
    }

    /// Empty payload for a type
    pub fn empty(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Page => ContentKind::Page,
            ContentType::Blog => ContentKind::Blog(BlogFields::default()),
            ContentType::Testimonial => ContentKind::Testimonial(TestimonialFields::default()),
            ContentType::Media => ContentKind::Media,
        }
    }

    /// JSON keys owned by this kind's payload
    pub(crate) fn field_names(&self) -> &'static [&'static str] {
        match self {
            ContentKind::Blog(_) => &["featured", "category", "tags"],
            ContentKind::Testimonial(_) => &["position", "company"],
            ContentKind::Page | ContentKind::Media => &[],
        }
    }
}

/// One editable unit of site content
///
/// Stored keys the typed fields do not cover, including blog or testimonial
/// fields on an item of another type, are kept in `extra` and written back
/// as they were read. `extra` must not repeat a key the typed fields write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredContentItem")]
pub struct ContentItem {
    pub id: String,
    #[serde(flatten)]
    pub kind: ContentKind,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub author: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Read side of `ContentItem`. The tagged `kind` reads its keys without
// consuming them, so they also land in `extra` and are dropped from it here.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredContentItem {
    id: String,
    #[serde(flatten)]
    kind: ContentKind,
    title: String,
    content: String,
    slug: String,
    author: String,
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    updated_at: DateTime<Utc>,
    #[serde(default)]
    image: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<StoredContentItem> for ContentItem {
    fn from(stored: StoredContentItem) -> Self {
        let mut extra = stored.extra;
        extra.remove("type");
        for key in stored.kind.field_names() {
            extra.remove(*key);
        }
        ContentItem {
            id: stored.id,
            kind: stored.kind,
            title: stored.title,
            content: stored.content,
            slug: stored.slug,
            author: stored.author,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            image: stored.image,
            extra,
        }
    }
}

impl ContentItem {
    pub fn content_type(&self) -> ContentType {
        self.kind.content_type()
    }

    pub fn category(&self) -> Option<&str> {
        match &self.kind {
            ContentKind::Blog(blog) => blog.category.as_deref(),
            _ => None,
        }
    }

    pub fn company(&self) -> Option<&str> {
        match &self.kind {
            ContentKind::Testimonial(testimonial) => testimonial.company.as_deref(),
            _ => None,
        }
    }
}

/// Fields supplied by the caller when creating content
///
/// `id`, `createdAt` and `updatedAt` are always assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContent {
    pub kind: ContentKind,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub author: String,
    pub image: Option<String>,
}

impl NewContent {
    pub fn new(
        kind: ContentKind,
        title: impl Into<String>,
        content: impl Into<String>,
        slug: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            content: content.into(),
            slug: slug.into(),
            author: author.into(),
            image: None,
        }
    }

    pub fn page(
        title: impl Into<String>,
        content: impl Into<String>,
        slug: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self::new(ContentKind::Page, title, content, slug, author)
    }

    pub fn blog(
        title: impl Into<String>,
        content: impl Into<String>,
        slug: impl Into<String>,
        author: impl Into<String>,
        fields: BlogFields,
    ) -> Self {
        Self::new(ContentKind::Blog(fields), title, content, slug, author)
    }

    pub fn testimonial(
        title: impl Into<String>,
        content: impl Into<String>,
        slug: impl Into<String>,
        author: impl Into<String>,
        fields: TestimonialFields,
    ) -> Self {
        Self::new(ContentKind::Testimonial(fields), title, content, slug, author)
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub(crate) fn into_item(
        self,
        id: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> ContentItem {
        ContentItem {
            id,
            kind: self.kind,
            title: self.title,
            content: self.content,
            slug: self.slug,
            author: self.author,
            created_at,
            updated_at,
            image: self.image,
            extra: Map::new(),
        }
    }
}

/// Shallow partial update for a content item
///
/// Outer `None` leaves a field alone. For optional fields, `Some(None)`
/// clears the value. Setting `kind` replaces the type and its whole payload
/// before the per-field blog/testimonial changes are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentPatch {
    pub kind: Option<ContentKind>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub author: Option<String>,
    pub image: Option<Option<String>>,
    pub featured: Option<Option<bool>>,
    pub category: Option<Option<String>>,
    pub tags: Option<Option<Vec<String>>>,
    pub position: Option<Option<String>>,
    pub company: Option<Option<String>>,
}

impl ContentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: ContentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = Some(image);
        self
    }

    pub fn featured(mut self, featured: Option<bool>) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = Some(category);
        self
    }

    pub fn tags(mut self, tags: Option<Vec<String>>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn position(mut self, position: Option<String>) -> Self {
        self.position = Some(position);
        self
    }

    pub fn company(mut self, company: Option<String>) -> Self {
        self.company = Some(company);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge this patch over `item`, leaving `id` and both timestamps alone
    ///
    /// # Errors
    /// Returns `ContentError::InvalidPatch` when a blog or testimonial field
    /// is set on an item of another type. `item` is unchanged on error.
    pub fn apply_to(&self, item: &mut ContentItem) -> ContentResult<()> {
        let mut kind = self.kind.clone().unwrap_or_else(|| item.kind.clone());

        let touches_blog =
            self.featured.is_some() || self.category.is_some() || self.tags.is_some();
        let touches_testimonial = self.position.is_some() || self.company.is_some();

        match &mut kind {
            ContentKind::Blog(blog) => {
                if touches_testimonial {
                    return Err(mismatch("position/company", ContentType::Blog));
                }
                if let Some(featured) = &self.featured {
                    blog.featured = *featured;
                }
                if let Some(category) = &self.category {
                    blog.category = category.clone();
                }
                if let Some(tags) = &self.tags {
                    blog.tags = tags.clone();
                }
            }
            ContentKind::Testimonial(testimonial) => {
                if touches_blog {
                    return Err(mismatch("featured/category/tags", ContentType::Testimonial));
                }
                if let Some(position) = &self.position {
                    testimonial.position = position.clone();
                }
                if let Some(company) = &self.company {
                    testimonial.company = company.clone();
                }
            }
            other => {
                if touches_blog {
                    return Err(mismatch("featured/category/tags", other.content_type()));
                }
                if touches_testimonial {
                    return Err(mismatch("position/company", other.content_type()));
                }
            }
        }

        for key in kind.field_names() {
            item.extra.remove(*key);
        }
        item.kind = kind;
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        if let Some(content) = &self.content {
            item.content = content.clone();
        }
        if let Some(slug) = &self.slug {
            item.slug = slug.clone();
        }
        if let Some(author) = &self.author {
            item.author = author.clone();
        }
        if let Some(image) = &self.image {
            item.image = image.clone();
        }
        Ok(())
    }
}

fn mismatch(fields: &str, content_type: ContentType) -> ContentError {
    ContentError::InvalidPatch(format!(
        "{} cannot be set on {} content",
        fields, content_type
    ))
}
