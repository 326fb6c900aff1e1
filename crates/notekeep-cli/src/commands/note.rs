//! Note command handlers

use anyhow::{bail, Result};

use notekeep_core::{CategorySelector, NoteId, NotePatch, NoteStore, Outcome, Workspace};

use crate::editor::{confirm, edit_text, is_interactive};
use crate::output::Output;

/// Create a new note
pub fn create(
    ws: &mut Workspace,
    title: String,
    category: Option<String>,
    body: Option<String>,
    output: &Output,
) -> Result<()> {
    let category = category.unwrap_or_else(|| ws.categories.first().to_string());
    if !ws.categories.contains(&category) {
        bail!(
            "Unknown category: '{}'. Add it first with `notekeep category add`.",
            category
        );
    }

    let content = match body {
        Some(b) => b,
        None if is_interactive() && output.should_prompt() => {
            let initial = format!("<!-- New note: {} ({}) -->\n\n", title, category);
            edit_text(&initial)?
        }
        None => String::new(),
    };

    match ws.notes.create(&title, &content, category.trim()) {
        Outcome::Applied(note) => {
            output.success(&format!("Created note {}", note.id.short()));
            output.print_note(&note);
        }
        Outcome::Unchanged(reason) => output.unchanged("Note", reason),
    }
    Ok(())
}

/// List notes, optionally restricted to a category and search term
pub fn list(
    ws: &Workspace,
    category: Option<String>,
    search: Option<String>,
    output: &Output,
) -> Result<()> {
    let selector = match category {
        Some(c) => c.parse::<CategorySelector>()?,
        None => CategorySelector::All,
    };
    let notes = ws.filtered(&selector, search.as_deref().unwrap_or(""));
    output.print_notes(&notes);
    Ok(())
}

/// Show a single note
pub fn show(ws: &Workspace, id: String, output: &Output) -> Result<()> {
    let id = resolve_id(&ws.notes, &id)?;
    if let Some(note) = ws.notes.get(&id) {
        output.print_note(note);
    }
    Ok(())
}

/// Edit a note's title, body or category
///
/// With no flags the body is opened in the editor.
pub fn edit(
    ws: &mut Workspace,
    id: String,
    mut patch: NotePatch,
    output: &Output,
) -> Result<()> {
    let id = resolve_id(&ws.notes, &id)?;

    if let Some(category) = patch.category.take() {
        if !ws.categories.contains(&category) {
            bail!("Unknown category: '{}'", category);
        }
        patch.category = Some(category.trim().to_string());
    }

    if patch.is_empty() {
        let Some(note) = ws.notes.get(&id) else {
            bail!("Note not found: {}", id);
        };
        let initial = format!("<!-- Editing: {} -->\n\n{}\n", note.title, note.content);
        patch.content = Some(edit_text(&initial)?);
    }

    match ws.notes.update(&id, patch) {
        Outcome::Applied(note) => {
            output.success(&format!("Updated note {}", note.id.short()));
            output.print_note(&note);
        }
        Outcome::Unchanged(reason) => output.unchanged("Note", reason),
    }
    Ok(())
}

/// Delete a note
pub fn delete(ws: &mut Workspace, id: String, output: &Output) -> Result<()> {
    let id = resolve_id(&ws.notes, &id)?;

    if output.should_prompt() {
        if let Some(note) = ws.notes.get(&id) {
            println!("Delete note: {} - {}", id.short(), note.title);
            if !confirm("Are you sure?")? {
                println!("Cancelled.");
                return Ok(());
            }
        }
    }

    match ws.notes.delete(&id) {
        Outcome::Applied(note) => output.success(&format!("Deleted note: {}", note.id.short())),
        Outcome::Unchanged(reason) => output.unchanged("Note", reason),
    }
    Ok(())
}

/// Resolve a full note id or a unique prefix of one
pub fn resolve_id(notes: &NoteStore, id: &str) -> Result<NoteId> {
    let id = id.trim();
    if id.is_empty() {
        bail!("Note ID cannot be empty");
    }

    let exact = NoteId::from(id);
    if notes.get(&exact).is_some() {
        return Ok(exact);
    }

    let matches: Vec<_> = notes
        .notes()
        .iter()
        .filter(|n| n.id.as_str().starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No note found matching: {}", id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple notes match '{}':", id);
            for note in &matches {
                eprintln!("  {} - {}", note.id, note.title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notekeep_core::storage::NOTES_SLOT;
    use notekeep_core::{Config, MemoryBackend};
    use std::sync::Arc;

    fn workspace_with_ids(ids: &[&str]) -> Workspace {
        let notes: Vec<_> = ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "id": id,
                    "title": format!("note {}", id),
                    "content": "",
                    "category": "Work"
                })
            })
            .collect();
        let raw = serde_json::to_string(&notes).unwrap();
        let backend = Arc::new(MemoryBackend::new().with_slot(NOTES_SLOT, &raw));
        Workspace::with_backend(backend, Config::default())
    }

    #[test]
    fn test_resolve_exact_and_prefix() {
        let ws = workspace_with_ids(&["abc123", "abd456", "ab"]);

        assert_eq!(resolve_id(&ws.notes, "abc").unwrap().as_str(), "abc123");
        // An exact match wins over a longer id sharing the prefix
        assert_eq!(resolve_id(&ws.notes, "ab").unwrap().as_str(), "ab");
    }

    #[test]
    fn test_resolve_errors() {
        let ws = workspace_with_ids(&["abc123", "abd456"]);

        assert!(resolve_id(&ws.notes, "zzz").is_err());
        assert!(resolve_id(&ws.notes, "ab").is_err());
        assert!(resolve_id(&ws.notes, "  ").is_err());
    }
}
