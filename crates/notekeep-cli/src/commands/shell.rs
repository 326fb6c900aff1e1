//! Interactive shell
//!
//! A line-oriented session over one open workspace. Until `login` succeeds
//! only `login`, `help` and `quit` are accepted; `logout` returns to that
//! gate without touching any stored data.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use notekeep_core::{CategorySelector, NotePatch, Outcome, Workspace};

use super::note::resolve_id;

/// What the loop should do after a line
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

const LOGGED_OUT_HELP: &str = "\
Commands:
  login <email> <password>   start a session (any credentials work)
  help                       show this help
  quit                       leave the shell";

const LOGGED_IN_HELP: &str = "\
Commands:
  list [category|All] [search...]     list notes
  add <category> <title...>           create a note (body on the next prompt)
  show <id>                           show a note
  title <id> <title...>               rename a note
  body <id> <text...>                 replace a note's body
  move <id> <category>                change a note's category
  rm <id>                             delete a note
  categories                          list categories
  addcat <name...>                    add a category
  rmcat <name...>                     delete a category
  upgrade                             switch to pro
  whoami                              show the session email
  logout                              end the session
  quit                                leave the shell";

/// Run the shell on stdin/stdout until `quit` or end of input
pub fn run(ws: &mut Workspace) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_with(ws, stdin.lock(), &mut stdout)
}

/// Run the shell over arbitrary input and output
pub fn run_with<R: BufRead, W: Write>(ws: &mut Workspace, input: R, out: &mut W) -> Result<()> {
    writeln!(out, "notekeep shell. Type 'help' for commands.")?;
    let mut lines = input.lines();

    loop {
        write!(out, "{}", prompt(ws))?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            break;
        };

        // A well-formed `add` reads the body from the following line.
        let body = if wants_body(ws, &line) {
            write!(out, "body> ")?;
            out.flush()?;
            lines.next().transpose()?.unwrap_or_default()
        } else {
            String::new()
        };

        if handle_line(ws, &line, &body, out)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

fn prompt(ws: &Workspace) -> String {
    match ws.session.email() {
        Some(email) if !email.is_empty() => format!("{}> ", email),
        Some(_) => "notekeep> ".to_string(),
        None => "login> ".to_string(),
    }
}

/// Whether `line` is an `add` that will create a note once given a body
fn wants_body(ws: &Workspace, line: &str) -> bool {
    let mut words = line.split_whitespace();
    if !ws.session.is_logged_in() || words.next() != Some("add") {
        return false;
    }
    match words.next() {
        Some(category) => ws.categories.contains(category) && words.next().is_some(),
        None => false,
    }
}

/// Execute one shell line
pub fn handle_line<W: Write>(
    ws: &mut Workspace,
    line: &str,
    body: &str,
    out: &mut W,
) -> Result<Flow> {
    let mut words = line.split_whitespace();
    let Some(cmd) = words.next() else {
        return Ok(Flow::Continue);
    };
    let rest: Vec<&str> = words.collect();

    match cmd {
        "quit" | "exit" => return Ok(Flow::Quit),
        "help" => {
            let help = if ws.session.is_logged_in() {
                LOGGED_IN_HELP
            } else {
                LOGGED_OUT_HELP
            };
            writeln!(out, "{}", help)?;
            return Ok(Flow::Continue);
        }
        "login" => {
            let email = rest.first().copied().unwrap_or("");
            let password = rest.get(1).copied().unwrap_or("");
            ws.session.login(email, password);
            writeln!(out, "Logged in.")?;
            return Ok(Flow::Continue);
        }
        _ => {}
    }

    if !ws.session.is_logged_in() {
        writeln!(out, "Please log in first: login <email> <password>")?;
        return Ok(Flow::Continue);
    }

    match cmd {
        "logout" => {
            ws.session.logout();
            writeln!(out, "Logged out.")?;
        }
        "whoami" => {
            writeln!(out, "{}", ws.session.email().unwrap_or(""))?;
        }
        "list" | "ls" => {
            let selector = rest
                .first()
                .map(|c| c.parse::<CategorySelector>())
                .transpose()?
                .unwrap_or_default();
            let term = rest.get(1..).map(|w| w.join(" ")).unwrap_or_default();
            let notes = ws.filtered(&selector, &term);
            if notes.is_empty() {
                writeln!(out, "No notes found.")?;
            }
            for note in notes {
                writeln!(out, "{}  [{}]  {}", note.id.short(), note.category, note.title)?;
            }
        }
        "add" => {
            let Some((category, title)) = rest.split_first() else {
                writeln!(out, "Usage: add <category> <title...>")?;
                return Ok(Flow::Continue);
            };
            if !ws.categories.contains(category) {
                writeln!(out, "Unknown category: {}", category)?;
                return Ok(Flow::Continue);
            }
            let outcome = ws.notes.create(&title.join(" "), body, category);
            report(out, outcome.map(|n| format!("Created {}", n.id.short())))?;
        }
        "show" => {
            if let Some(id) = lookup(ws, &rest, out)? {
                if let Some(note) = ws.notes.get(&id) {
                    writeln!(out, "{} [{}]", note.title, note.category)?;
                    writeln!(out, "{}", note.content)?;
                }
            }
        }
        "title" | "body" | "move" => {
            let Some(id) = lookup(ws, &rest, out)? else {
                return Ok(Flow::Continue);
            };
            let value = rest[1..].join(" ");
            let patch = match cmd {
                "title" => NotePatch::new().title(value),
                "body" => NotePatch::new().content(value),
                _ => {
                    if !ws.categories.contains(&value) {
                        writeln!(out, "Unknown category: {}", value)?;
                        return Ok(Flow::Continue);
                    }
                    NotePatch::new().category(value)
                }
            };
            let outcome = ws.notes.update(&id, patch);
            report(out, outcome.map(|n| format!("Updated {}", n.id.short())))?;
        }
        "rm" => {
            if let Some(id) = lookup(ws, &rest, out)? {
                let outcome = ws.notes.delete(&id);
                report(out, outcome.map(|n| format!("Deleted {}", n.id.short())))?;
            }
        }
        "categories" => {
            for (name, count) in ws.category_counts() {
                writeln!(out, "{} ({})", name, count)?;
            }
        }
        "addcat" => {
            let outcome = ws.categories.add(&rest.join(" "));
            report(out, outcome.map(|c| format!("Added {}", c)))?;
        }
        "rmcat" => {
            let outcome = ws.delete_category(&rest.join(" "));
            report(
                out,
                outcome.map(|c| {
                    let action = if c.label_removed { "Deleted" } else { "Cleared unlisted" };
                    format!(
                        "{} {}, {} note(s) moved to {}",
                        action, c.removed, c.reassigned, c.fallback
                    )
                }),
            )?;
        }
        "upgrade" => {
            ws.entitlement.upgrade();
            writeln!(out, "Plan: pro")?;
        }
        other => {
            writeln!(out, "Unknown command: {}. Type 'help'.", other)?;
        }
    }

    Ok(Flow::Continue)
}

/// Resolve the first argument as a note id, printing why when it fails
fn lookup<W: Write>(
    ws: &Workspace,
    rest: &[&str],
    out: &mut W,
) -> Result<Option<notekeep_core::NoteId>> {
    let Some(raw) = rest.first() else {
        writeln!(out, "Missing note id")?;
        return Ok(None);
    };
    match resolve_id(&ws.notes, raw) {
        Ok(id) => Ok(Some(id)),
        Err(e) => {
            writeln!(out, "{}", e)?;
            Ok(None)
        }
    }
}

fn report<W: Write>(out: &mut W, outcome: Outcome<String>) -> Result<()> {
    match outcome {
        Outcome::Applied(msg) => writeln!(out, "{}", msg)?,
        Outcome::Unchanged(reason) => writeln!(out, "Unchanged: {}", reason)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notekeep_core::{Config, MemoryBackend};
    use std::sync::Arc;

    fn workspace() -> Workspace {
        Workspace::with_backend(Arc::new(MemoryBackend::new()), Config::default())
    }

    fn run_script(ws: &mut Workspace, script: &str) -> String {
        let mut out = Vec::new();
        run_with(ws, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_commands_gated_until_login() {
        let mut ws = workspace();
        let output = run_script(&mut ws, "categories\nlist\n");

        assert!(output.contains("Please log in first"));
        assert!(!output.contains("Personal (0)"));
    }

    #[test]
    fn test_login_then_add_and_list() {
        let mut ws = workspace();
        let output = run_script(
            &mut ws,
            "login me@example.com secret\nadd Work Quarterly report\ndraft numbers\nlist Work\nquit\n",
        );

        assert!(output.contains("Logged in."));
        assert!(output.contains("Created "));
        assert!(output.contains("[Work]  Quarterly report"));
        assert_eq!(ws.notes.notes()[0].content, "draft numbers");
    }

    #[test]
    fn test_logout_returns_to_gate_and_keeps_data() {
        let mut ws = workspace();
        let output = run_script(&mut ws, "login a b\naddcat Travel\nlogout\naddcat Food\n");

        assert!(output.contains("Logged out."));
        assert!(output.contains("Please log in first"));
        assert!(ws.categories.contains("Travel"));
        assert!(!ws.categories.contains("Food"));
        assert!(!ws.session.is_logged_in());
    }

    #[test]
    fn test_rejections_are_reported() {
        let mut ws = workspace();
        let mut out = Vec::new();
        ws.session.login("", "");

        handle_line(&mut ws, "addcat Work", "", &mut out).unwrap();
        handle_line(&mut ws, "add Work   ", "", &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Unchanged: category already exists"));
        assert!(output.contains("Unchanged: title is empty"));
    }

    #[test]
    fn test_rmcat_cascades() {
        let mut ws = workspace();
        let mut out = Vec::new();
        ws.session.login("", "");

        handle_line(&mut ws, "add Work Report", "draft", &mut out).unwrap();
        handle_line(&mut ws, "rmcat Work", "", &mut out).unwrap();

        assert_eq!(ws.notes.notes()[0].category, "Personal");
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("1 note(s) moved to Personal"));
    }

    #[test]
    fn test_malformed_add_does_not_consume_next_line() {
        let mut ws = workspace();
        let output = run_script(
            &mut ws,
            "login a b\nadd\naddcat Travel\nadd Nowhere Trip\naddcat Food\nadd Work\naddcat Books\n",
        );

        assert!(output.contains("Usage: add <category> <title...>"));
        assert!(output.contains("Unknown category: Nowhere"));
        assert!(!output.contains("body>"));
        for name in ["Travel", "Food", "Books"] {
            assert!(ws.categories.contains(name), "{} was swallowed", name);
        }
        assert!(ws.notes.is_empty());
    }

    #[test]
    fn test_quit_and_blank_lines() {
        let mut ws = workspace();
        let mut out = Vec::new();
        assert_eq!(handle_line(&mut ws, "   ", "", &mut out).unwrap(), Flow::Continue);
        assert_eq!(handle_line(&mut ws, "quit", "", &mut out).unwrap(), Flow::Quit);
    }
}
