//! Filtering and sorting for admin list views
//!
//! The repository returns whole collections; list screens narrow them with a
//! [`ContentQuery`] built from the search box, the category picker and the
//! clicked column header.

use crate::models::{ContentItem, ContentType};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    Author,
    #[default]
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Filter and ordering applied to a content listing
///
/// Defaults to everything, newest update first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentQuery {
    content_type: Option<ContentType>,
    search: Option<String>,
    category: Option<String>,
    sort_field: SortField,
    direction: SortDirection,
}

impl ContentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Case-insensitive substring search over the fields each list view
    /// shows; a blank term matches everything
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() {
            None
        } else {
            Some(term.to_lowercase())
        };
        self
    }

    /// Keep only blog posts in exactly this category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.is_empty() { None } else { Some(category) };
        self
    }

    pub fn sort_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.direction = direction;
        self
    }

    /// Column header behaviour: clicking the active column flips the
    /// direction, clicking another column sorts it ascending
    pub fn click_column(mut self, field: SortField) -> Self {
        if self.sort_field == field {
            self.direction = self.direction.toggled();
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Ascending;
        }
        self
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Whether `item` passes the type, search and category filters
    pub fn matches(&self, item: &ContentItem) -> bool {
        if let Some(content_type) = self.content_type {
            if item.content_type() != content_type {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if item.category() != Some(category.as_str()) {
                return false;
            }
        }
        match &self.search {
            Some(term) => searchable_text(item).any(|text| text.to_lowercase().contains(term)),
            None => true,
        }
    }

    /// Filter then stably sort `items`
    pub fn apply(&self, items: Vec<ContentItem>) -> Vec<ContentItem> {
        let mut matched: Vec<ContentItem> = items.into_iter().filter(|i| self.matches(i)).collect();
        matched.sort_by(|a, b| {
            let ordering = compare(a, b, self.sort_field);
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        matched
    }
}

// Pages are found by title or slug, posts by title or body, testimonials by
// who said it, what they said or where they work.
fn searchable_text(item: &ContentItem) -> impl Iterator<Item = &str> {
    let fields = match item.content_type() {
        ContentType::Page | ContentType::Media => [&item.title, &item.slug],
        ContentType::Blog => [&item.title, &item.content],
        ContentType::Testimonial => [&item.author, &item.content],
    };
    fields.into_iter().map(String::as_str).chain(item.company())
}

fn compare(a: &ContentItem, b: &ContentItem, field: SortField) -> Ordering {
    match field {
        SortField::Title => compare_text(&a.title, &b.title),
        SortField::Author => compare_text(&a.author, &b.author),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

// Case-insensitive first so "about" sorts next to "About"
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Distinct non-empty blog categories in first-seen order
pub fn categories(items: &[ContentItem]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for category in items.iter().filter_map(ContentItem::category) {
        if !category.is_empty() && !seen.iter().any(|c| c == category) {
            seen.push(category.to_string());
        }
    }
    seen
}
