//! Integration tests for text analysis.

use docpress::model::{runs_text, Block, StyledRun, TitleSource};
use docpress::parser::{AnalyzeOptions, Analyzer, StructureMode};
use docpress::source::notebook_to_markdown;
use docpress::Warning;

fn analyze(text: &str, mode: StructureMode) -> docpress::parser::Analysis {
    Analyzer::new(AnalyzeOptions::new().with_mode(mode)).analyze(text)
}

#[test]
fn test_markdown_document_structure() {
    let text = "\
# Project Plan

Intro with **bold** and `code`.

## Tasks

- write parser
  - nested detail
- ship it

> keep it simple

```rust
fn main() {}
```

| Name | Owner |
|------|-------|
| API  | Ana   |
";

    let analysis = analyze(text, StructureMode::Markdown);
    let doc = analysis.document;
    assert!(analysis.warnings.is_empty());

    assert_eq!(doc.title, "Project Plan");
    assert_eq!(doc.title_source, TitleSource::Heading);

    let kinds: Vec<&str> = doc.blocks.iter().map(Block::kind).collect();
    assert_eq!(
        kinds,
        vec![
            "heading",
            "paragraph",
            "heading",
            "bullet",
            "bullet",
            "bullet",
            "quote",
            "code",
            "table"
        ]
    );

    assert_eq!(
        doc.blocks[1],
        Block::paragraph(vec![
            StyledRun::plain("Intro with "),
            StyledRun::bold("bold"),
            StyledRun::plain(" and "),
            StyledRun::code("code"),
            StyledRun::plain("."),
        ])
    );
    assert!(matches!(doc.blocks[4], Block::Bullet { depth: 1, .. }));
    assert!(matches!(
        &doc.blocks[7],
        Block::Code { lines, language: Some(lang) } if lines == &["fn main() {}"] && lang == "rust"
    ));

    let Block::Table(table) = &doc.blocks[8] else {
        panic!("expected a table");
    };
    assert_eq!(table.column_count(), 2);
    assert_eq!(runs_text(&table.body()[0][1]), "Ana");
}

#[test]
fn test_unterminated_fence_keeps_content() {
    let analysis = analyze("Intro\n\n```\nline one\nline two", StructureMode::Markdown);

    assert_eq!(analysis.warnings, vec![Warning::UnterminatedFence { line: 3 }]);
    assert!(matches!(
        &analysis.document.blocks[1],
        Block::Code { lines, .. } if lines.len() == 2
    ));
}

#[test]
fn test_thematic_breaks_are_dropped() {
    let doc = analyze("above\n\n---\n\nbelow", StructureMode::Markdown).document;
    assert_eq!(doc.block_count(), 2);
}

#[test]
fn test_box_drawing_becomes_structural_text() {
    let text = "Layout:\n\n┌──┐\n│ok│\n└──┘\n\nafter";
    let doc = analyze(text, StructureMode::Markdown).document;

    assert!(matches!(
        &doc.blocks[1],
        Block::StructuralText { lines } if lines.len() == 3
    ));
    assert_eq!(doc.blocks[2].plain_text(), "after");
}

#[test]
fn test_auto_structure_detects_headings() {
    let text = "OVERVIEW\nThe system converts text.\n\nSteps:\n- analyze\n- emit";
    let doc = analyze(text, StructureMode::AutoStructure).document;

    assert_eq!(doc.blocks[0].heading_level(), Some(2));
    assert_eq!(doc.blocks[2].heading_level(), Some(2));
    assert_eq!(doc.blocks.iter().filter(|b| matches!(b, Block::Bullet { .. })).count(), 2);
}

#[test]
fn test_literal_and_bulletize_ignore_markup() {
    let text = "# heading?\n*stars*\n\n- dash";

    let literal = analyze(text, StructureMode::Literal).document;
    assert_eq!(literal.block_count(), 3);
    assert!(literal.blocks.iter().all(|b| matches!(b, Block::Paragraph { .. })));
    assert_eq!(literal.blocks[1].plain_text(), "*stars*");

    let bullets = analyze(text, StructureMode::Bulletize).document;
    assert_eq!(bullets.block_count(), 3);
    assert!(bullets
        .blocks
        .iter()
        .all(|b| matches!(b, Block::Bullet { depth: 0, .. })));
}

#[test]
fn test_title_precedence() {
    let options = AnalyzeOptions::new()
        .with_title_hint("Hint")
        .with_file_name("file_name.md");

    let doc = Analyzer::new(options.clone()).analyze("# Heading\nbody").document;
    assert_eq!(doc.title, "Heading");

    let doc = Analyzer::new(options).analyze("body").document;
    assert_eq!(doc.title, "Hint");

    let doc = Analyzer::new(AnalyzeOptions::new().with_file_name("file_name.md"))
        .analyze("body")
        .document;
    assert_eq!(doc.title, "File Name");
    assert_eq!(doc.title_source, TitleSource::FileName);
}

#[test]
fn test_notebook_analysis() {
    let json = r##"{"cells": [
        {"cell_type": "markdown", "source": ["# Notebook\n", "Some *notes*."]},
        {"cell_type": "code", "source": ["x = 1\n", "print(x)"]}
    ]}"##;

    let markdown = notebook_to_markdown(json).unwrap();
    let doc = analyze(&markdown, StructureMode::Markdown).document;

    assert_eq!(doc.title, "Notebook");
    assert!(matches!(
        &doc.blocks[2],
        Block::Code { lines, language: Some(lang) } if lines.len() == 2 && lang == "python"
    ));
}
