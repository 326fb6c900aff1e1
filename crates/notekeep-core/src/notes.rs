//! Note collection
//!
//! `NoteStore` owns the ordered note list (newest first) and persists the
//! `notes` slot after every mutation. Invalid input is a no-op reported as
//! [`Outcome::Unchanged`].

use tracing::{debug, info};

use crate::models::{Note, NoteId, NotePatch, Outcome, Reason};
use crate::storage::{Persistence, NOTES_SLOT};

/// CRUD over the note collection
pub struct NoteStore {
    notes: Vec<Note>,
    persistence: Persistence,
}

impl NoteStore {
    /// Load the `notes` slot, starting empty when it is absent or corrupt
    pub fn load(persistence: Persistence) -> Self {
        let notes: Vec<Note> = persistence.load(NOTES_SLOT, Vec::new());
        debug!(count = notes.len(), "Loaded notes");
        Self { notes, persistence }
    }

    /// Current notes, most recently created first
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Look up a note by id
    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Create a note and put it at the front of the collection
    ///
    /// The title is trimmed; an empty result leaves the collection alone.
    /// `category` is taken as given.
    pub fn create(&mut self, title: &str, content: &str, category: &str) -> Outcome<Note> {
        let title = title.trim();
        if title.is_empty() {
            debug!("Ignoring note with empty title");
            return Outcome::Unchanged(Reason::EmptyTitle);
        }

        let note = Note::new(title, content, category);
        self.notes.insert(0, note.clone());
        self.save();

        info!(id = %note.id, category = %note.category, "Created note");
        Outcome::Applied(note)
    }

    /// Apply a partial update to an existing note
    ///
    /// The patch is applied as a whole or not at all: if the resulting title
    /// would be empty nothing changes. `id` and `created_at` never change.
    pub fn update(&mut self, id: &NoteId, patch: NotePatch) -> Outcome<Note> {
        let Some(note) = self.notes.iter_mut().find(|n| &n.id == id) else {
            debug!(id = %id, "Ignoring update for unknown note");
            return Outcome::Unchanged(Reason::NotFound);
        };

        let resulting_title = patch.title.as_deref().unwrap_or(&note.title);
        if resulting_title.trim().is_empty() {
            debug!(id = %id, "Ignoring update that empties the title");
            return Outcome::Unchanged(Reason::EmptyTitle);
        }

        if let Some(title) = patch.title {
            note.title = title.trim().to_string();
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        if let Some(category) = patch.category {
            note.category = category;
        }
        note.touch();

        let updated = note.clone();
        self.save();

        info!(id = %id, "Updated note");
        Outcome::Applied(updated)
    }

    /// Remove a note; unknown ids are ignored
    pub fn delete(&mut self, id: &NoteId) -> Outcome<Note> {
        let Some(pos) = self.notes.iter().position(|n| &n.id == id) else {
            debug!(id = %id, "Ignoring delete for unknown note");
            return Outcome::Unchanged(Reason::NotFound);
        };

        let removed = self.notes.remove(pos);
        self.save();

        info!(id = %id, "Deleted note");
        Outcome::Applied(removed)
    }

    /// Move every note filed under `from` to `to`, returning how many moved
    ///
    /// Only used by the category cascade, which persists afterwards.
    pub(crate) fn reassign_category(&mut self, from: &str, to: &str) -> usize {
        let mut moved = 0;
        for note in self.notes.iter_mut().filter(|n| n.category == from) {
            note.set_category(to);
            moved += 1;
        }
        moved
    }

    /// Move every note whose category fails `keep` to `fallback`
    pub(crate) fn reassign_where(&mut self, keep: impl Fn(&str) -> bool, fallback: &str) -> usize {
        let mut moved = 0;
        for note in self.notes.iter_mut().filter(|n| !keep(&n.category)) {
            note.set_category(fallback);
            moved += 1;
        }
        moved
    }

    /// Persist the `notes` slot
    pub(crate) fn save(&self) {
        self.persistence.save(NOTES_SLOT, &self.notes);
    }
}
