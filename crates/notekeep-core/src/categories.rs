//! Category collection
//!
//! `CategoryStore` owns the ordered list of unique category labels and
//! persists the `categories` slot. The list is never empty. Deleting a
//! category cascades into the [`NoteStore`]: affected notes are moved to a
//! fallback category before the label is removed.

use tracing::{debug, info, warn};

use crate::models::{Outcome, Reason};
use crate::notes::NoteStore;
use crate::storage::{Persistence, CATEGORIES_SLOT};

/// Categories seeded on first run
pub const DEFAULT_CATEGORIES: [&str; 3] = ["Personal", "Work", "Ideas"];

/// Result of a successful category delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cascade {
    /// The removed label
    pub removed: String,
    /// Where its notes went
    pub fallback: String,
    /// How many notes were moved
    pub reassigned: usize,
    /// False when `removed` was not listed and only notes were moved
    pub label_removed: bool,
}

/// CRUD over the category collection
pub struct CategoryStore {
    categories: Vec<String>,
    persistence: Persistence,
}

impl CategoryStore {
    /// Load the `categories` slot, seeding the defaults when it is absent,
    /// corrupt, or holds no usable label
    ///
    /// Stored labels are trimmed and deduplicated, keeping the first
    /// occurrence.
    pub fn load(persistence: Persistence) -> Self {
        let loaded: Vec<String> = persistence.load(CATEGORIES_SLOT, default_categories());
        let stored = loaded.len();

        let mut categories: Vec<String> = Vec::with_capacity(stored);
        for label in loaded {
            let label = label.trim();
            if !label.is_empty() && !categories.iter().any(|c| c == label) {
                categories.push(label.to_string());
            }
        }

        if categories.is_empty() {
            warn!("Stored category list has no usable labels, using defaults");
            categories = default_categories();
        } else if categories.len() != stored {
            warn!(
                stored,
                kept = categories.len(),
                "Dropped blank or duplicate stored categories"
            );
        }
        debug!(count = categories.len(), "Loaded categories");
        Self {
            categories,
            persistence,
        }
    }

    /// Current labels in insertion order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Exact (trimmed) membership test
    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim();
        self.categories.iter().any(|c| c == name)
    }

    /// First label, used as the fallback for orphaned notes
    pub fn first(&self) -> &str {
        // Never empty: load seeds defaults and delete refuses the last one.
        &self.categories[0]
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether `name` is one of the seeded defaults
    pub fn is_seeded(name: &str) -> bool {
        DEFAULT_CATEGORIES.contains(&name.trim())
    }

    /// Append a new category
    ///
    /// The name is trimmed. Empty names and exact duplicates are ignored.
    pub fn add(&mut self, name: &str) -> Outcome<String> {
        let name = name.trim();
        if name.is_empty() {
            debug!("Ignoring empty category name");
            return Outcome::Unchanged(Reason::EmptyName);
        }
        if self.contains(name) {
            debug!(category = name, "Ignoring duplicate category");
            return Outcome::Unchanged(Reason::Duplicate);
        }

        self.categories.push(name.to_string());
        self.save();

        info!(category = name, "Added category");
        Outcome::Applied(name.to_string())
    }

    /// Delete a category and move its notes to a fallback
    ///
    /// The fallback is the first category, or the second when the first is
    /// the one being deleted. Refused when only one category remains. A name
    /// that is not listed still has its notes moved to the first category;
    /// it is only a no-op when no note carries it either.
    pub fn delete(&mut self, name: &str, notes: &mut NoteStore) -> Outcome<Cascade> {
        let name = name.trim();
        if self.categories.len() <= 1 {
            debug!(category = name, "Refusing to delete the last category");
            return Outcome::Unchanged(Reason::LastCategory);
        }

        let listed = self.contains(name);
        let fallback = if self.categories[0] == name {
            self.categories[1].clone()
        } else {
            self.categories[0].clone()
        };

        // Notes move before the label disappears.
        let reassigned = notes.reassign_category(name, &fallback);
        if !listed && reassigned == 0 {
            debug!(category = name, "Ignoring delete for unknown category");
            return Outcome::Unchanged(Reason::UnknownCategory);
        }
        self.categories.retain(|c| c != name);

        self.save();
        notes.save();

        info!(
            category = name,
            fallback = %fallback,
            reassigned,
            label_removed = listed,
            "Deleted category"
        );
        Outcome::Applied(Cascade {
            removed: name.to_string(),
            fallback,
            reassigned,
            label_removed: listed,
        })
    }

    /// Move notes whose category is not in this collection to the first one
    ///
    /// Repairs cross-slot drift after one slot fell back to its default.
    /// Returns how many notes moved; the `notes` slot is only saved when
    /// something changed.
    pub fn repair_orphans(&self, notes: &mut NoteStore) -> usize {
        let fallback = self.first().to_string();
        let moved = notes.reassign_where(|c| self.categories.iter().any(|k| k == c), &fallback);
        if moved > 0 {
            notes.save();
            info!(moved, fallback = %fallback, "Reassigned orphaned notes");
        }
        moved
    }

    fn save(&self) {
        self.persistence.save(CATEGORIES_SLOT, &self.categories);
    }
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}
