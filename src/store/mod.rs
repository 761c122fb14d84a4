//! Key-value storage backends
//!
//! The content repository never touches storage directly; it is handed a
//! [`KeyValueStore`] at construction, so backends can be swapped freely.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            KeyValueStore                │
//! │     (read / write / remove blobs)       │
//! └──────────────┬──────────────────────────┘
//!                │
//!        ┌───────┴────────┐
//!        │                │
//! ┌──────▼──────┐  ┌──────▼───────┐
//! │MemoryStore  │  │JsonFileStore │
//! │             │  │              │
//! │- HashMap    │  │- one file    │
//! │- tests      │  │- atomic save │
//! └─────────────┘  └──────────────┘
//! ```

pub mod factory;
pub mod file;
pub mod memory;
pub mod traits;

// Re-export main types
pub use factory::{StoreBackend, StoreFactory};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
