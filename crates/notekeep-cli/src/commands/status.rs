//! Status and upgrade command handlers

use anyhow::Result;

use notekeep_core::Workspace;

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(ws: &Workspace, output: &Output) -> Result<()> {
    let config = ws.config();
    let orphans = ws.orphans().len();
    let plan = if ws.entitlement.is_pro() { "pro" } else { "free" };

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "plan": plan,
                    "backend": ws.backend_name(),
                    "data_dir": config.data_dir,
                    "counts": {
                        "notes": ws.notes.len(),
                        "categories": ws.categories.len(),
                        "orphans": orphans
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", plan);
        }
        OutputFormat::Human => {
            println!("notekeep Status");
            println!("===============");
            println!();
            println!("Plan: {}", plan);
            println!();
            println!("Storage:");
            println!("  Backend:  {}", ws.backend_name());
            println!("  Location: {}", config.data_dir.display());
            println!();
            println!("Contents:");
            println!("  Notes:      {}", ws.notes.len());
            println!("  Categories: {}", ws.categories.len());
            if orphans > 0 {
                println!();
                println!(
                    "{} note(s) reference a category that no longer exists.",
                    orphans
                );
                println!("Set repair_orphans = true to reassign them on the next start.");
            }
        }
    }

    Ok(())
}

/// Switch to the pro plan
pub fn upgrade(ws: &mut Workspace, output: &Output) -> Result<()> {
    let was_pro = ws.entitlement.is_pro();
    ws.entitlement.upgrade();
    if was_pro {
        output.message("Already on the pro plan.");
    } else {
        output.success("Upgraded to pro");
    }
    Ok(())
}
