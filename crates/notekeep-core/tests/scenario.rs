use std::sync::Arc;

use notekeep_core::storage::{CATEGORIES_SLOT, ENTITLEMENT_SLOT, NOTES_SLOT};
use notekeep_core::{
    BackendKind, CategorySelector, Config, MemoryBackend, Note, NotePatch, Persistence, Reason,
    Workspace,
};
use tempfile::TempDir;

fn file_config(temp_dir: &TempDir) -> Config {
    Config {
        data_dir: temp_dir.path().to_path_buf(),
        backend: BackendKind::File,
        log_file: None,
        repair_orphans: false,
    }
}

#[test]
fn groceries_and_report_end_up_in_personal() {
    let temp_dir = TempDir::new().unwrap();

    {
        let mut ws = Workspace::open_with_config(file_config(&temp_dir)).unwrap();
        let _ = ws.notes.create("Groceries", "milk,eggs", "Personal");
        let _ = ws.notes.create("Report", "draft", "Work");

        let cascade = ws.delete_category("Work").applied().unwrap();
        assert_eq!(cascade.fallback, "Personal");
        assert_eq!(cascade.reassigned, 1);
    }

    let ws = Workspace::open_with_config(file_config(&temp_dir)).unwrap();
    let titles: Vec<_> = ws.notes.notes().iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Report", "Groceries"]);
    assert!(ws.notes.notes().iter().all(|n| n.category == "Personal"));
    assert_eq!(ws.categories.categories(), &["Personal", "Ideas"]);
}

#[test]
fn rejected_mutations_leave_state_alone() {
    let backend = Arc::new(MemoryBackend::new());
    let mut ws = Workspace::with_backend(backend.clone(), Config::default());

    let note = ws.notes.create("Keep", "body", "Work").applied().unwrap();
    let snapshot = backend.raw(NOTES_SLOT);

    assert_eq!(ws.notes.create(" ", "x", "Work").reason(), Some(Reason::EmptyTitle));
    assert_eq!(
        ws.notes.update(&note.id, NotePatch::new().title("")).reason(),
        Some(Reason::EmptyTitle)
    );
    assert_eq!(ws.categories.add("Work").reason(), Some(Reason::Duplicate));
    assert_eq!(ws.categories.add("  ").reason(), Some(Reason::EmptyName));

    assert_eq!(backend.raw(NOTES_SLOT), snapshot);
    assert_eq!(ws.notes.get(&note.id), Some(&note));
    assert_eq!(ws.categories.len(), 3);
}

#[test]
fn notes_slot_round_trips() {
    let backend = Arc::new(MemoryBackend::new());
    let persistence = Persistence::new(backend);

    let notes = vec![
        Note::new("One", "first", "Work"),
        Note::new("Two", "second", "Ideas"),
    ];
    persistence.save(NOTES_SLOT, &notes);

    let loaded: Vec<Note> = persistence.load(NOTES_SLOT, Vec::new());
    assert_eq!(loaded, notes);
}

#[test]
fn every_corrupt_slot_falls_back_to_its_default() {
    let backend = Arc::new(
        MemoryBackend::new()
            .with_slot(NOTES_SLOT, "\"a string, not a list\"")
            .with_slot(CATEGORIES_SLOT, "{\"nope\": 1}")
            .with_slot(ENTITLEMENT_SLOT, "[true]"),
    );
    let ws = Workspace::with_backend(backend, Config::default());

    assert!(ws.notes.is_empty());
    assert_eq!(ws.categories.categories(), &["Personal", "Work", "Ideas"]);
    assert!(!ws.entitlement.is_pro());
}

#[test]
fn legacy_notes_without_ids_are_loaded() {
    let raw = r#"[
        {"id": 1712345678901.5, "title": "Old", "content": "from before", "category": "Ideas",
         "createdAt": "2024-04-05T10:00:00.000Z", "updatedAt": "2024-04-05T10:00:00.000Z"},
        {"title": "No id", "content": "", "category": "Work"}
    ]"#;
    let backend = Arc::new(MemoryBackend::new().with_slot(NOTES_SLOT, raw));
    let mut ws = Workspace::with_backend(backend, Config::default());

    assert_eq!(ws.notes.len(), 2);
    let old_id = ws.notes.notes()[0].id.clone();
    assert_eq!(old_id.as_str(), "1712345678901.5");

    let updated = ws
        .notes
        .update(&old_id, NotePatch::new().content("edited"))
        .applied()
        .unwrap();
    assert_eq!(updated.content, "edited");
}

#[test]
fn write_failures_keep_in_memory_state() {
    let backend = Arc::new(MemoryBackend::new());
    let mut ws = Workspace::with_backend(backend.clone(), Config::default());

    backend.set_read_only(true);
    let _ = ws.notes.create("Unsaved", "", "Work");
    ws.entitlement.upgrade();

    assert_eq!(ws.notes.len(), 1);
    assert!(ws.entitlement.is_pro());
    assert!(backend.raw(NOTES_SLOT).is_none());
    assert!(backend.raw(ENTITLEMENT_SLOT).is_none());

    // The next successful save catches up
    backend.set_read_only(false);
    let _ = ws.notes.create("Saved", "", "Work");
    let reopened = Workspace::with_backend(backend, Config::default());
    assert_eq!(reopened.notes.len(), 2);
}

#[test]
fn filtering_follows_store_order() {
    let backend = Arc::new(MemoryBackend::new());
    let mut ws = Workspace::with_backend(backend, Config::default());

    let _ = ws.notes.create("zebra notes", "", "Work");
    let _ = ws.notes.create("Lunch", "", "Personal");
    let _ = ws.notes.create("Zoo trip", "see a Zebra", "Personal");

    let all: Vec<_> = ws
        .filtered(&CategorySelector::All, "")
        .into_iter()
        .map(|n| n.title.as_str())
        .collect();
    assert_eq!(all, vec!["Zoo trip", "Lunch", "zebra notes"]);

    let zebras: Vec<_> = ws
        .filtered(&CategorySelector::All, "ZEB")
        .into_iter()
        .map(|n| n.title.as_str())
        .collect();
    assert_eq!(zebras, vec!["Zoo trip", "zebra notes"]);

    let work = ws.filtered(&CategorySelector::Category("Work".into()), "");
    assert_eq!(work.len(), 1);
}
