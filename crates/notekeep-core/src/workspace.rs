//! Workspace facade
//!
//! The `Workspace` builds the configured backend and loads each store from
//! its own slot:
//! - `notes` → [`NoteStore`]
//! - `categories` → [`CategoryStore`]
//! - `isPro` → [`Entitlement`]
//!
//! plus a fresh [`SessionGate`]. The stores are public fields so a front end
//! can borrow them independently; `delete_category` exists because the
//! cascade needs both stores at once.
//!
//! ## Usage
//!
//! ```ignore
//! let mut ws = Workspace::open()?;
//!
//! ws.notes.create("Groceries", "milk, eggs", "Personal");
//! ws.delete_category("Work");
//!
//! let visible = ws.filtered(&CategorySelector::All, "milk");
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::categories::{Cascade, CategoryStore};
use crate::config::{BackendKind, Config};
use crate::entitlement::Entitlement;
use crate::filter::{category_counts, filter, CategorySelector};
use crate::models::{Note, Outcome};
use crate::notes::NoteStore;
use crate::session::SessionGate;
use crate::storage::{FileBackend, KeyValueBackend, Persistence, SqliteBackend};

pub struct Workspace {
    pub notes: NoteStore,
    pub categories: CategoryStore,
    pub entitlement: Entitlement,
    pub session: SessionGate,
    persistence: Persistence,
    config: Config,
}

impl Workspace {
    /// Open the workspace described by the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the workspace with a specific configuration
    pub fn open_with_config(config: Config) -> Result<Self> {
        let backend: Arc<dyn KeyValueBackend> = match config.backend {
            BackendKind::File => Arc::new(FileBackend::new(&config.data_dir)),
            BackendKind::Sqlite => Arc::new(
                SqliteBackend::open(&config.sqlite_path())
                    .context("Failed to open SQLite database")?,
            ),
        };
        Ok(Self::with_backend(backend, config))
    }

    /// Open the workspace over an existing backend
    ///
    /// Loading never fails: each slot falls back to its default on its own.
    pub fn with_backend(backend: Arc<dyn KeyValueBackend>, config: Config) -> Self {
        let persistence = Persistence::new(backend);

        let mut notes = NoteStore::load(persistence.clone());
        let categories = CategoryStore::load(persistence.clone());
        let entitlement = Entitlement::load(persistence.clone());

        if config.repair_orphans {
            categories.repair_orphans(&mut notes);
        }

        info!(
            backend = persistence.backend_name(),
            notes = notes.len(),
            categories = categories.len(),
            "Workspace opened"
        );

        Self {
            notes,
            categories,
            entitlement,
            session: SessionGate::new(),
            persistence,
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Name of the active backend
    pub fn backend_name(&self) -> &'static str {
        self.persistence.backend_name()
    }

    /// Delete a category, moving its notes to the fallback category
    pub fn delete_category(&mut self, name: &str) -> Outcome<Cascade> {
        self.categories.delete(name, &mut self.notes)
    }

    /// Notes visible under a category selector and search term
    pub fn filtered(&self, selector: &CategorySelector, term: &str) -> Vec<&Note> {
        filter(self.notes.notes(), selector, term)
    }

    /// Note count per current category
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        category_counts(self.notes.notes(), self.categories.categories())
    }

    /// Notes whose category is not in the current category list
    pub fn orphans(&self) -> Vec<&Note> {
        self.notes
            .notes()
            .iter()
            .filter(|n| !self.categories.contains(&n.category))
            .collect()
    }
}
