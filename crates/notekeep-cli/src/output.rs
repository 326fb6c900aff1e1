//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use notekeep_core::{Note, Reason};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single note in full
    pub fn print_note(&self, note: &Note) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", note.id);
                println!("Title:    {}", note.title);
                println!("Category: {}", note.category);
                println!("Created:  {}", note.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated:  {}", note.updated_at.format("%Y-%m-%d %H:%M"));
                if !note.content.is_empty() {
                    println!();
                    println!("{}", note.content);
                }
            }
            OutputFormat::Json => print_json(note),
            OutputFormat::Quiet => println!("{}", note.id),
        }
    }

    /// Print a list of notes
    pub fn print_notes(&self, notes: &[&Note]) {
        match self.format {
            OutputFormat::Human => {
                if notes.is_empty() {
                    println!("No notes found.");
                    return;
                }
                for note in notes {
                    println!(
                        "{} | {} | {} | {}",
                        note.id.short(),
                        note.updated_at.format("%Y-%m-%d"),
                        truncate(&note.category, 12),
                        truncate(&note.title, 40),
                    );
                    let preview = truncate_line(&note.content, 60);
                    if !preview.is_empty() {
                        println!("           {}", preview);
                    }
                }
                println!("\n{} note(s)", notes.len());
            }
            OutputFormat::Json => print_json(&notes),
            OutputFormat::Quiet => {
                for note in notes {
                    println!("{}", note.id);
                }
            }
        }
    }

    /// Print categories with their note counts
    pub fn print_categories(&self, counts: &[(String, usize)]) {
        match self.format {
            OutputFormat::Human => {
                for (name, count) in counts {
                    println!("{} ({})", name, count);
                }
                println!("\n{} categor{}", counts.len(), plural_y(counts.len()));
            }
            OutputFormat::Json => {
                let json: Vec<_> = counts
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                print_json(&json);
            }
            OutputFormat::Quiet => {
                for (name, _) in counts {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Report that a request was ignored
    ///
    /// Not a failure: the command still exits successfully.
    pub fn unchanged(&self, what: &str, reason: Reason) {
        match self.format {
            OutputFormat::Human => println!("• {} unchanged: {}", what, reason),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "status": "unchanged",
                        "message": what,
                        "reason": reason.to_string()
                    })
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode JSON output: {}", e),
    }
}

fn plural_y(n: usize) -> &'static str {
    if n == 1 {
        "y"
    } else {
        "ies"
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Truncate to first line and max length
fn truncate_line(s: &str, max_len: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    truncate(first_line, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        // Multi-byte characters are not split
        assert_eq!(truncate("ééééééééééé", 5), "éé...");
    }

    #[test]
    fn test_truncate_line() {
        assert_eq!(truncate_line("single line", 20), "single line");
        assert_eq!(truncate_line("line one\nline two", 20), "line one");
        assert_eq!(truncate_line("", 20), "");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural_y(1), "y");
        assert_eq!(plural_y(3), "ies");
    }
}
