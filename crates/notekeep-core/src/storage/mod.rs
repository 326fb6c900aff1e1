//! Storage layer
//!
//! Handles durable slot persistence.
//!
//! ## Architecture
//!
//! - **Backends**: raw string-keyed media (JSON files, SQLite, memory)
//! - **Persistence**: typed JSON load/save with default-on-failure semantics
//!
//! Each slot (`notes`, `categories`, `isPro`) is loaded and saved on its own.
//! There is no cross-slot transaction.

pub mod backend;
pub mod error;
pub mod persistence;
pub mod schema;
pub mod sqlite;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use error::{StorageError, StorageResult};
pub use persistence::{Persistence, CATEGORIES_SLOT, ENTITLEMENT_SLOT, NOTES_SLOT};
pub use schema::{init_schema, needs_init, SCHEMA_VERSION};
pub use sqlite::SqliteBackend;
