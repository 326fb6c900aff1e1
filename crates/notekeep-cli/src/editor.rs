//! Interactive editing support
//!
//! Opens $EDITOR for note bodies and asks for confirmations.

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process::Command;

use anyhow::{bail, Context, Result};

/// Editors tried when neither $EDITOR nor $VISUAL is set
const FALLBACK_EDITORS: [&str; 4] = ["nano", "vim", "vi", "notepad"];

/// Let the user edit `initial_content` and return the result
///
/// Lines starting with `<!--` are hints and are stripped from the result.
pub fn edit_text(initial_content: &str) -> Result<String> {
    let (program, args) = find_editor()?;

    let mut file = tempfile::Builder::new()
        .prefix("notekeep-")
        .suffix(".md")
        .tempfile()
        .context("Failed to create temp file for editing")?;
    file.write_all(initial_content.as_bytes())?;
    file.flush()?;

    let status = Command::new(&program)
        .args(&args)
        .arg(file.path())
        .status()
        .with_context(|| format!("Failed to run editor: {}", program))?;
    if !status.success() {
        bail!("Editor '{}' exited with {}; nothing was saved.", program, status);
    }

    // Editors often replace the file rather than write in place.
    let edited = fs::read_to_string(file.path())
        .with_context(|| format!("Failed to read edited file: {:?}", file.path()))?;
    Ok(strip_comments(&edited))
}

/// Drop `<!-- ... -->` hint lines and surrounding whitespace
pub fn strip_comments(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with("<!--"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Whether stdin is attached to a terminal
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}

/// Program and leading arguments of the user's editor
///
/// `$EDITOR="code --wait"` yields `("code", ["--wait"])`.
fn find_editor() -> Result<(String, Vec<String>)> {
    let configured = ["EDITOR", "VISUAL"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find_map(|value| split_command(&value));
    if let Some(found) = configured {
        return Ok(found);
    }

    match FALLBACK_EDITORS.iter().find(|e| command_exists(e)) {
        Some(editor) => Ok((editor.to_string(), Vec::new())),
        None => bail!("No editor found. Set $EDITOR, e.g. `export EDITOR=nano`."),
    }
}

fn split_command(value: &str) -> Option<(String, Vec<String>)> {
    let mut parts = value.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Ask a yes/no question on stdin; anything but y/yes is a no
///
/// Without a terminal the answer is always no.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !is_interactive() {
        return Ok(false);
    }
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    read_answer(io::stdin().lock())
}

fn read_answer(mut input: impl BufRead) -> Result<bool> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comments() {
        let edited = "<!-- New note: Groceries (Personal) -->\n\nmilk\neggs\n\n";
        assert_eq!(strip_comments(edited), "milk\neggs");
        assert_eq!(strip_comments("<!-- only a hint -->"), "");
    }

    #[test]
    fn test_split_command() {
        assert_eq!(
            split_command("code --wait"),
            Some(("code".to_string(), vec!["--wait".to_string()]))
        );
        assert_eq!(split_command("vim"), Some(("vim".to_string(), vec![])));
        assert_eq!(split_command("   "), None);
    }

    #[test]
    fn test_read_answer() {
        assert!(read_answer("y\n".as_bytes()).unwrap());
        assert!(read_answer(" YES \n".as_bytes()).unwrap());
        assert!(!read_answer("n\n".as_bytes()).unwrap());
        assert!(!read_answer("".as_bytes()).unwrap());
    }

    #[test]
    fn test_command_exists() {
        assert!(command_exists("ls"));
        assert!(!command_exists("definitely_not_a_real_command_12345"));
    }
}
