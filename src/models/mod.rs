pub mod content;
pub mod media;
pub mod timestamp;

pub use content::{
    BlogFields, ContentItem, ContentKind, ContentPatch, ContentType, NewContent,
    TestimonialFields,
};
pub use media::{MediaItem, MediaType, NewMedia};
