//! Category command handlers

use anyhow::{bail, Result};

use notekeep_core::{CategoryStore, Outcome, Workspace};

use crate::editor::confirm;
use crate::output::Output;

/// List categories with note counts
pub fn list(ws: &Workspace, output: &Output) -> Result<()> {
    output.print_categories(&ws.category_counts());
    Ok(())
}

/// Add a category
pub fn add(ws: &mut Workspace, name: String, output: &Output) -> Result<()> {
    match ws.categories.add(&name) {
        Outcome::Applied(name) => output.success(&format!("Added category: {}", name)),
        Outcome::Unchanged(reason) => output.unchanged("Categories", reason),
    }
    Ok(())
}

/// Delete a category, moving its notes to the fallback
///
/// The seeded defaults are kept unless `force` is set.
pub fn delete(ws: &mut Workspace, name: String, force: bool, output: &Output) -> Result<()> {
    if CategoryStore::is_seeded(&name) && !force {
        bail!(
            "'{}' is a built-in category. Use --force to delete it anyway.",
            name.trim()
        );
    }

    if output.should_prompt() && ws.categories.contains(&name) {
        let affected = ws
            .notes
            .notes()
            .iter()
            .filter(|n| n.category == name.trim())
            .count();
        if affected > 0 {
            println!(
                "{} note(s) in '{}' will be moved to another category.",
                affected,
                name.trim()
            );
            if !confirm("Continue?")? {
                println!("Cancelled.");
                return Ok(());
            }
        }
    }

    match ws.delete_category(&name) {
        Outcome::Applied(cascade) if cascade.label_removed => output.success(&format!(
            "Deleted category: {} ({} note(s) moved to {})",
            cascade.removed, cascade.reassigned, cascade.fallback
        )),
        Outcome::Applied(cascade) => output.success(&format!(
            "Moved {} note(s) from unlisted category {} to {}",
            cascade.reassigned, cascade.removed, cascade.fallback
        )),
        Outcome::Unchanged(reason) => output.unchanged("Categories", reason),
    }
    Ok(())
}
