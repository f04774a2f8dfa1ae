//! Title resolution and heading injection.

use std::path::Path;

use crate::model::TitleSource;

/// Check whether text already opens with a heading.
///
/// The first non-blank line counts as a heading when it starts with `#`
/// or consists of at least five upper-case letters and spaces.
pub fn has_heading(text: &str) -> bool {
    let Some(first) = text.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return false;
    };

    if first.starts_with('#') {
        return true;
    }

    first.chars().count() >= 5
        && first
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_whitespace())
}

/// Prepend `# {title}` unless the text already has a heading.
///
/// Idempotent: injecting into already-injected text is a no-op.
pub fn inject_heading(text: &str, title: &str) -> String {
    let title = title.trim();
    if title.is_empty() || has_heading(text) {
        return text.to_string();
    }
    format!("# {}\n\n{}", title, text)
}

/// Derive a display title from a file name.
///
/// The extension is dropped, underscores and hyphens become spaces and each
/// word is title-cased: `quarterly_report-final.md` becomes
/// `Quarterly Report Final`.
pub fn title_from_file_name(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);

    stem.replace(&['_', '-'][..], " ")
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Pick the document title by precedence: first level-1 heading, then the
/// caller's hint, then the file name stem.
pub fn resolve_title(
    first_heading: Option<&str>,
    hint: Option<&str>,
    file_name: Option<&str>,
) -> (String, TitleSource) {
    if let Some(heading) = first_heading.map(str::trim).filter(|t| !t.is_empty()) {
        return (heading.to_string(), TitleSource::Heading);
    }
    if let Some(hint) = hint.map(str::trim).filter(|t| !t.is_empty()) {
        return (hint.to_string(), TitleSource::Hint);
    }
    if let Some(title) = file_name
        .map(title_from_file_name)
        .filter(|t| !t.is_empty())
    {
        return (title, TitleSource::FileName);
    }
    (String::new(), TitleSource::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_heading() {
        assert!(has_heading("\n\n# Title\nbody"));
        assert!(has_heading("ANNUAL REPORT\nbody"));
        assert!(!has_heading("Annual report\nbody"));
        assert!(!has_heading("ABC\nbody"));
        assert!(!has_heading("   \n"));
    }

    #[test]
    fn test_inject_heading() {
        let injected = inject_heading("Some text", "My Notes");
        assert_eq!(injected, "# My Notes\n\nSome text");
    }

    #[test]
    fn test_inject_heading_idempotent() {
        let once = inject_heading("Some text", "My Notes");
        let twice = inject_heading(&once, "My Notes");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_inject_heading_empty_title() {
        assert_eq!(inject_heading("text", "  "), "text");
    }

    #[test]
    fn test_title_from_file_name() {
        assert_eq!(title_from_file_name("quarterly_report-final.md"), "Quarterly Report Final");
        assert_eq!(title_from_file_name("/tmp/uploads/NOTES.txt"), "Notes");
        assert_eq!(title_from_file_name("readme"), "Readme");
    }

    #[test]
    fn test_resolve_title_precedence() {
        assert_eq!(
            resolve_title(Some("Heading"), Some("Hint"), Some("file.md")),
            ("Heading".to_string(), TitleSource::Heading)
        );
        assert_eq!(
            resolve_title(None, Some("Hint"), Some("file.md")),
            ("Hint".to_string(), TitleSource::Hint)
        );
        assert_eq!(
            resolve_title(None, Some(" "), Some("my_file.md")),
            ("My File".to_string(), TitleSource::FileName)
        );
        assert_eq!(
            resolve_title(None, None, None),
            (String::new(), TitleSource::None)
        );
    }
}
