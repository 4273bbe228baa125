//! Full-pipeline tests over whole documents
//!
//! Classification feeds tokenization through [MarkdownEngine]; these tests
//! verify the seam between the two passes: stripped block prefixes, inline
//! styles inside styled lines, and code blocks bypassing the tokenizer.

use styledown::{CharacterStyle, LineStyle, MarkdownEngine};

fn rendered(line: &styledown::ProcessedLine) -> String {
    line.runs.iter().map(|run| run.text.as_str()).collect()
}

#[test]
fn readme_like_document_processes_end_to_end() {
    let doc = "\
Project
=======

A *small* library for `inline` markdown.

## Usage

    cargo add styledown

See [the docs](https://docs.rs/styledown) for more.
";
    let lines = MarkdownEngine::markdown().process(doc);
    assert_eq!(lines.len(), 10);

    assert_eq!(lines[0].style, LineStyle::H1);
    assert_eq!(rendered(&lines[0]), "Project");
    // The underline itself renders empty.
    assert_eq!(rendered(&lines[1]), "");

    assert_eq!(lines[3].style, LineStyle::Body);
    assert_eq!(rendered(&lines[3]), "A small library for inline markdown.");
    let italic = lines[3].runs.iter().find(|r| r.text == "small").unwrap();
    assert_eq!(italic.styles, vec![CharacterStyle::Italic]);
    let code = lines[3].runs.iter().find(|r| r.text == "inline").unwrap();
    assert_eq!(code.styles, vec![CharacterStyle::Code]);

    assert_eq!(lines[5].style, LineStyle::H2);
    assert_eq!(rendered(&lines[5]), "Usage");

    assert_eq!(lines[7].style, LineStyle::CodeBlock);
    assert_eq!(rendered(&lines[7]), "cargo add styledown");

    let link_line = &lines[9];
    let link = link_line.runs.iter().find(|r| r.text == "the docs").unwrap();
    assert_eq!(link.styles, vec![CharacterStyle::Link]);
    assert_eq!(link.metadata.as_deref(), Some("https://docs.rs/styledown"));
}

#[test]
fn code_block_preserves_delimiter_characters() {
    let lines = MarkdownEngine::markdown().process("    *stars* and `ticks`");
    assert_eq!(lines[0].style, LineStyle::CodeBlock);
    assert_eq!(rendered(&lines[0]), "*stars* and `ticks`");
    assert!(lines[0].runs[0].styles.is_empty());
}

#[test]
fn heading_prefix_never_reaches_the_tokenizer() {
    // Without stripping, "# " would survive into the rendered text.
    let lines = MarkdownEngine::markdown().process("# *all italic*");
    assert_eq!(rendered(&lines[0]), "all italic");
    assert_eq!(lines[0].runs[0].styles, vec![CharacterStyle::Italic]);
}

#[test]
fn blockquote_with_inline_styles() {
    let lines = MarkdownEngine::markdown().process("> **bold** claim");
    assert_eq!(lines[0].style, LineStyle::Blockquote);
    assert_eq!(rendered(&lines[0]), "bold claim");
    assert_eq!(lines[0].runs[0].styles, vec![CharacterStyle::Bold]);
}
