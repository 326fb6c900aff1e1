//! notekeep Core Library
//!
//! This crate provides the state and persistence layer for notekeep, a
//! single-user store of short text notes filed under user-defined
//! categories.
//!
//! # Architecture
//!
//! - **Slots**: `notes`, `categories` and `isPro` are loaded and saved
//!   independently through [`Persistence`]; a corrupt slot falls back to its
//!   default without affecting the others.
//! - **Stores**: each store owns its collection and saves its slot after
//!   every mutation. Invalid input is reported as [`Outcome::Unchanged`],
//!   never as an error.
//!
//! # Quick Start
//!
//! ```text
//! let mut ws = Workspace::open()?;
//!
//! ws.notes.create("Groceries", "milk, eggs", "Personal");
//! ws.categories.add("Travel");
//!
//! let hits = ws.filtered(&CategorySelector::All, "milk");
//! ```
//!
//! # Modules
//!
//! - `workspace`: Opens every store over one backend (main entry point)
//! - `models`: Note, NotePatch, Outcome
//! - `notes`: Note collection
//! - `categories`: Category collection and delete cascade
//! - `entitlement`: Pro flag
//! - `filter`: Category and text filtering
//! - `session`: Login gate
//! - `storage`: Backends and typed slot persistence
//! - `config`: Application configuration

pub mod categories;
pub mod config;
pub mod entitlement;
pub mod filter;
pub mod models;
pub mod notes;
pub mod session;
pub mod storage;
pub mod workspace;

pub use categories::{Cascade, CategoryStore, DEFAULT_CATEGORIES};
pub use config::{BackendKind, Config};
pub use entitlement::Entitlement;
pub use filter::{category_counts, filter, CategorySelector};
pub use models::{Note, NoteId, NotePatch, Outcome, Reason};
pub use notes::NoteStore;
pub use session::{SessionGate, SessionState};
pub use storage::{
    FileBackend, KeyValueBackend, MemoryBackend, Persistence, SqliteBackend, StorageError,
};
pub use workspace::Workspace;
