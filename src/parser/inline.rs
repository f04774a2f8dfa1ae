//! Inline run formatting.
//!
//! Splits a single line into styled runs by scanning for `**bold**`,
//! `*italic*` and `` `code` `` markers. Matching is greedy, non-overlapping
//! and leftmost-first; bold markers are tried before italic so that
//! `**bold *and* nested**` nests correctly, and `***x***` reads as a bold
//! `*x` followed by a literal `*`. Markers with empty content and openers
//! without a closer are kept as literal text.

use crate::model::{push_run, RunStyle, StyledRun};

/// Format one line into styled runs.
///
/// The concatenated run text equals the input minus the consumed markers.
/// No run is empty and adjacent runs never share a style.
///
/// # Example
///
/// ```
/// use docpress::parser::format_inline;
///
/// let runs = format_inline("Hello *world*");
/// assert_eq!(runs.len(), 2);
/// assert!(runs[1].italic);
/// ```
pub fn format_inline(line: &str) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    format_into(line, RunStyle::PLAIN, &mut runs);
    runs
}

fn format_into(text: &str, style: RunStyle, runs: &mut Vec<StyledRun>) {
    let bytes = text.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'`' => {
                if let Some(len) = text[i + 1..].find('`').filter(|&len| len > 0) {
                    push_run(runs, &text[literal_start..i], style);
                    push_run(runs, &text[i + 1..i + 1 + len], style.as_code());
                    i += len + 2;
                    literal_start = i;
                    continue;
                }
            }
            b'*' if bytes.get(i + 1) == Some(&b'*') => {
                if let Some(len) = text[i + 2..].find("**").filter(|&len| len > 0) {
                    push_run(runs, &text[literal_start..i], style);
                    format_into(&text[i + 2..i + 2 + len], style.bolded(), runs);
                    i += len + 4;
                    literal_start = i;
                    continue;
                }
                // An unmatched `**` stays literal as a pair.
                i += 2;
                continue;
            }
            b'*' => {
                if let Some(close) = find_italic_close(bytes, i + 1) {
                    push_run(runs, &text[literal_start..i], style);
                    format_into(&text[i + 1..close], style.italicized(), runs);
                    i = close + 1;
                    literal_start = i;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }

    push_run(runs, &text[literal_start..], style);
}

/// Find the closing `*` of an italic span opened just before `from`.
///
/// Stars that belong to a `**` pair are skipped so nested bold survives.
fn find_italic_close(bytes: &[u8], from: usize) -> Option<usize> {
    let mut j = from;
    while j < bytes.len() {
        if bytes[j] == b'*' {
            let doubled = bytes.get(j + 1) == Some(&b'*') || (j > from && bytes[j - 1] == b'*');
            if !doubled {
                return (j > from).then_some(j);
            }
        }
        j += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::runs_text;

    fn style_of(run: &StyledRun) -> (bool, bool, bool) {
        (run.bold, run.italic, run.code)
    }

    #[test]
    fn test_plain_line() {
        let runs = format_inline("just text");
        assert_eq!(runs, vec![StyledRun::plain("just text")]);
    }

    #[test]
    fn test_italic() {
        let runs = format_inline("Hello *world*");
        assert_eq!(
            runs,
            vec![StyledRun::plain("Hello "), StyledRun::italic("world")]
        );
    }

    #[test]
    fn test_bold_with_nested_italic() {
        let runs = format_inline("**bold *and* nested**");
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].text, "bold ");
        assert_eq!(style_of(&runs[0]), (true, false, false));
        assert_eq!(runs[1].text, "and");
        assert_eq!(style_of(&runs[1]), (true, true, false));
        assert_eq!(runs[2].text, " nested");
        assert_eq!(style_of(&runs[2]), (true, false, false));
    }

    #[test]
    fn test_code_content_is_not_formatted() {
        let runs = format_inline("run `a*b*c` now");
        assert_eq!(runs[1], StyledRun::code("a*b*c"));
        assert_eq!(runs_text(&runs), "run a*b*c now");
    }

    #[test]
    fn test_unmatched_markers_are_literal() {
        let runs = format_inline("2 * 3 = 6 and **open");
        assert_eq!(runs, vec![StyledRun::plain("2 * 3 = 6 and **open")]);
    }

    #[test]
    fn test_empty_markers_are_literal() {
        let runs = format_inline("a ** b `` c");
        assert_eq!(runs_text(&runs), "a ** b `` c");
        assert!(runs.iter().all(|r| !r.bold && !r.italic && !r.code));
    }

    #[test]
    fn test_leftmost_first() {
        let runs = format_inline("*one* **two** `three`");
        let styles: Vec<_> = runs.iter().map(style_of).collect();
        assert_eq!(
            styles,
            vec![
                (false, true, false),
                (false, false, false),
                (true, false, false),
                (false, false, false),
                (false, false, true),
            ]
        );
    }

    #[test]
    fn test_italic_containing_bold() {
        let runs = format_inline("*a **b** c*");
        assert_eq!(runs_text(&runs), "a b c");
        assert!(runs.iter().all(|r| r.italic));
        assert!(runs.iter().any(|r| r.bold && r.text == "b"));
    }

    #[test]
    fn test_triple_markers_take_bold_first() {
        let runs = format_inline("***x***");
        assert_eq!(runs, vec![StyledRun::bold("*x"), StyledRun::plain("*")]);
    }

    #[test]
    fn test_length_accounts_for_consumed_markers() {
        let lines = [
            ("**x** and *y* and `z`", 8),
            ("no markers here", 0),
            ("***", 0),
            ("*a* *", 2),
        ];
        for (line, consumed) in lines {
            let runs = format_inline(line);
            assert_eq!(runs_text(&runs).len(), line.len() - consumed, "{line}");
            assert!(runs.iter().all(|r| !r.text.is_empty()));
            for pair in runs.windows(2) {
                assert_ne!(pair[0].style(), pair[1].style());
            }
        }
    }
}
