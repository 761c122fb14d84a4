//! Content repository
//!
//! Single source of truth for the site's content and media collections.
//! Callers program against the [`ContentRepository`] and [`MediaRepository`]
//! traits; [`SiteRepository`] implements both on top of any
//! [`KeyValueStore`](crate::store::KeyValueStore).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ ContentRepository / MediaRepository     │
//! │  (query + mutate surface for admin UI)  │
//! └──────────────┬──────────────────────────┘
//!                │
//!        ┌───────▼────────┐
//!        │ SiteRepository │  whole-collection read-modify-write
//!        └───────┬────────┘
//!                │
//!        ┌───────▼────────┐
//!        │ KeyValueStore  │  content-collection / media-collection
//!        └────────────────┘
//! ```

pub mod seed;
pub mod site;
pub mod stats;
pub mod traits;

// Re-export main types
pub use site::SiteRepository;
pub use stats::ContentStats;
pub use traits::{ContentRepository, MediaRepository};
