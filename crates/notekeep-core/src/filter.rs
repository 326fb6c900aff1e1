//! Note filtering
//!
//! Pure functions over a note slice: a category selector and a
//! case-insensitive substring search, combined with AND. Matches keep the
//! order of the input.

use std::fmt;
use std::str::FromStr;

use crate::models::Note;

/// Which category a listing is restricted to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelector {
    /// Every category
    #[default]
    All,
    /// Exactly this label
    Category(String),
}

impl CategorySelector {
    pub fn matches(&self, note: &Note) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Category(name) => &note.category == name,
        }
    }
}

impl FromStr for CategorySelector {
    type Err = std::convert::Infallible;

    /// `"All"` selects everything, any other text selects that label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "All" => CategorySelector::All,
            other => CategorySelector::Category(other.to_string()),
        })
    }
}

impl From<Option<String>> for CategorySelector {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(name) => CategorySelector::Category(name),
            None => CategorySelector::All,
        }
    }
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategorySelector::All => f.write_str("All"),
            CategorySelector::Category(name) => f.write_str(name),
        }
    }
}

/// Whether `note` matches `term` in its title or content, ignoring case
pub fn matches_search(note: &Note, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    note.title.to_lowercase().contains(&term) || note.content.to_lowercase().contains(&term)
}

/// Notes matching both the selector and the search term, in input order
pub fn filter<'a>(notes: &'a [Note], selector: &CategorySelector, term: &str) -> Vec<&'a Note> {
    notes
        .iter()
        .filter(|n| selector.matches(n) && matches_search(n, term))
        .collect()
}

/// Note count per category, in category order
///
/// Notes whose category is not listed are not counted.
pub fn category_counts(notes: &[Note], categories: &[String]) -> Vec<(String, usize)> {
    categories
        .iter()
        .map(|c| (c.clone(), notes.iter().filter(|n| &n.category == c).count()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes() -> Vec<Note> {
        vec![
            Note::new("zebra notes", "stripes", "Work"),
            Note::new("Groceries", "milk, eggs", "Personal"),
            Note::new("Plan", "Buy a ZEBRA plush", "Ideas"),
            Note::new("Standup", "", "Work"),
        ]
    }

    fn titles(found: &[&Note]) -> Vec<String> {
        found.iter().map(|n| n.title.clone()).collect()
    }

    #[test]
    fn test_all_and_empty_term_returns_everything() {
        let notes = notes();
        let found = filter(&notes, &CategorySelector::All, "");
        assert_eq!(found.len(), notes.len());
        assert!(found.iter().zip(&notes).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_category_filter() {
        let notes = notes();
        let found = filter(&notes, &CategorySelector::Category("Work".into()), "");
        assert_eq!(titles(&found), vec!["zebra notes", "Standup"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_content() {
        let notes = notes();
        let found = filter(&notes, &CategorySelector::All, "ZEB");
        assert_eq!(titles(&found), vec!["zebra notes", "Plan"]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let notes = notes();
        let found = filter(&notes, &CategorySelector::Category("Ideas".into()), "zebra");
        assert_eq!(titles(&found), vec!["Plan"]);

        let none = filter(&notes, &CategorySelector::Category("Personal".into()), "zebra");
        assert!(none.is_empty());
    }

    #[test]
    fn test_unknown_category_matches_nothing() {
        let notes = notes();
        assert!(filter(&notes, &CategorySelector::Category("work".into()), "").is_empty());
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("All".parse::<CategorySelector>().unwrap(), CategorySelector::All);
        assert_eq!(
            "Work".parse::<CategorySelector>().unwrap(),
            CategorySelector::Category("Work".into())
        );
        assert_eq!(CategorySelector::from(None), CategorySelector::All);
        assert_eq!(CategorySelector::All.to_string(), "All");
    }

    #[test]
    fn test_category_counts() {
        let notes = notes();
        let categories = vec!["Personal".to_string(), "Work".to_string(), "Travel".to_string()];
        assert_eq!(
            category_counts(&notes, &categories),
            vec![
                ("Personal".to_string(), 1),
                ("Work".to_string(), 2),
                ("Travel".to_string(), 0)
            ]
        );
    }
}
