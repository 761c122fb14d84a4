//! Content repository for a marketing website's admin console
//!
//! Pages, blog posts, testimonials and media are kept as two JSON arrays in
//! an injected key-value store. See [`repository`] for the CRUD and query
//! surface and [`store`] for the storage backends.
//!
//! # Example
//! ```
//! use site_content::{ContentRepository, ContentType, RepositoryConfig, SiteRepository};
//!
//! let repo = SiteRepository::from_config(RepositoryConfig::default()).unwrap();
//! repo.initialize().unwrap();
//! assert_eq!(repo.list_by_type(ContentType::Page).unwrap().len(), 4);
//! assert_eq!(repo.get_by_slug("about").unwrap().unwrap().title, "About");
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod repository;
pub mod slug;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{RepositoryConfig, RepositoryConfigBuilder, SlugPolicy};
pub use error::{ContentError, ContentResult};
pub use models::{
    BlogFields, ContentItem, ContentKind, ContentPatch, ContentType, MediaItem, MediaType,
    NewContent, NewMedia, TestimonialFields,
};
pub use query::{categories, ContentQuery, SortDirection, SortField};
pub use repository::{ContentRepository, ContentStats, MediaRepository, SiteRepository};
pub use slug::slugify;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreBackend, StoreFactory};
