//! Document-level tests for the line classifier
//!
//! These exercise whole documents through the default markdown line rules and
//! check line counts, style assignment, token stripping, and the
//! previous-line rewrite used by setext headings.

use styledown::{LineClassifier, LineRule, LineStyle, RemovalZone};

#[test]
fn every_input_line_produces_one_classified_line() {
    let doc = "# Title\n\nA paragraph.\n\n- one\n- two\n";
    let lines = LineClassifier::markdown().classify(doc);
    assert_eq!(lines.len(), 6);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line.line_number, i);
    }
}

#[test]
fn mixed_document_classifies_each_block() {
    let doc = "\
# Heading
Body text here.
> quoted line
    indented code
- list item
";
    let lines = LineClassifier::markdown().classify(doc);
    let styles: Vec<LineStyle> = lines.iter().map(|l| l.style).collect();
    assert_eq!(
        styles,
        vec![
            LineStyle::H1,
            LineStyle::Body,
            LineStyle::Blockquote,
            LineStyle::CodeBlock,
            LineStyle::UnorderedList,
        ]
    );
    assert_eq!(lines[0].text, "Heading");
    assert_eq!(lines[2].text, "quoted line");
    assert_eq!(lines[3].text, "indented code");
    assert_eq!(lines[4].text, "list item");
}

#[test]
fn setext_heading_rewrites_only_the_immediately_preceding_line() {
    let doc = "First\nSecond\n===\nThird";
    let lines = LineClassifier::markdown().classify(doc);
    assert_eq!(lines[0].style, LineStyle::Body);
    assert_eq!(lines[1].style, LineStyle::H1);
    assert_eq!(lines[1].text, "Second");
    assert_eq!(lines[2].text, "");
    assert_eq!(lines[3].style, LineStyle::Body);
}

#[test]
fn setext_dash_applies_h2() {
    let lines = LineClassifier::markdown().classify("Subtitle\n----");
    assert_eq!(lines[0].style, LineStyle::H2);
}

#[test]
fn underline_inside_indented_code_stays_code() {
    // An indented underline is code content, not a setext marker for the
    // code line above it.
    let doc = "    let x = 1;\n    ===";
    let lines = LineClassifier::markdown().classify(doc);
    assert_eq!(lines[0].style, LineStyle::CodeBlock);
    assert_eq!(lines[0].text, "let x = 1;");
    assert_eq!(lines[1].style, LineStyle::CodeBlock);
    assert_eq!(lines[1].text, "===");
}

#[test]
fn heading_levels_map_one_to_six() {
    let doc = "# a\n## b\n### c\n#### d\n##### e\n###### f";
    let lines = LineClassifier::markdown().classify(doc);
    let styles: Vec<LineStyle> = lines.iter().map(|l| l.style).collect();
    assert_eq!(
        styles,
        vec![
            LineStyle::H1,
            LineStyle::H2,
            LineStyle::H3,
            LineStyle::H4,
            LineStyle::H5,
            LineStyle::H6,
        ]
    );
}

#[test]
fn hash_without_space_is_not_a_heading() {
    let lines = LineClassifier::markdown().classify("#hashtag");
    assert_eq!(lines[0].style, LineStyle::Body);
    assert_eq!(lines[0].text, "#hashtag");
}

#[test]
fn custom_rule_order_is_first_match_wins() {
    // With the blockquote rule listed first, "> - item" is a blockquote.
    let rules = vec![
        LineRule::new("> ", LineStyle::Blockquote, RemovalZone::Leading),
        LineRule::new("- ", LineStyle::UnorderedList, RemovalZone::Leading),
    ];
    let classifier = LineClassifier::new(rules, LineStyle::Body).unwrap();
    let lines = classifier.classify("> - item");
    assert_eq!(lines[0].style, LineStyle::Blockquote);
    assert_eq!(lines[0].text, "- item");
}

#[test]
fn empty_document_classifies_to_nothing() {
    assert!(LineClassifier::markdown().classify("").is_empty());
}
