//! Default markdown rule sets
//!
//!     The stock configuration covers the common markdown surface: ATX and setext
//!     headings, blockquotes, indented code blocks and unordered lists at the line
//!     level; images, links, inline code, emphasis and strikethrough at the
//!     character level.
//!
//!     Order matters in both lists. Line rules test longest heading prefixes first
//!     so `### ` is not claimed by the `# ` rule, and indented code before the
//!     setext underlines so an underline inside a code block stays code. Character rules resolve images
//!     before links (an image open tag contains the link open tag), and inline code
//!     before emphasis so that a code span cancels emphasis inside it.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::rules::{Cancels, CharacterRule, LineRule, RemovalZone, SpacingConstraint};
use crate::styles::{CharacterStyle, LineStyle};

static LINE_RULES: Lazy<Vec<LineRule>> = Lazy::new(|| {
    vec![
        LineRule::new("###### ", LineStyle::H6, RemovalZone::Leading),
        LineRule::new("##### ", LineStyle::H5, RemovalZone::Leading),
        LineRule::new("#### ", LineStyle::H4, RemovalZone::Leading),
        LineRule::new("### ", LineStyle::H3, RemovalZone::Leading),
        LineRule::new("## ", LineStyle::H2, RemovalZone::Leading),
        LineRule::new("# ", LineStyle::H1, RemovalZone::Leading),
        // Indented code must claim its lines before the setext underlines,
        // or an underline inside a code block would restyle the block.
        LineRule::new("\t", LineStyle::CodeBlock, RemovalZone::Leading),
        LineRule::new("    ", LineStyle::CodeBlock, RemovalZone::Leading),
        // Setext underlines restyle the line above them.
        LineRule::new("=", LineStyle::H1, RemovalZone::EntireLine).applies_to_previous(),
        LineRule::new("-", LineStyle::H2, RemovalZone::EntireLine).applies_to_previous(),
        LineRule::new("> ", LineStyle::Blockquote, RemovalZone::Leading),
        LineRule::new("- ", LineStyle::UnorderedList, RemovalZone::Leading),
        LineRule::new("* ", LineStyle::UnorderedList, RemovalZone::Leading),
        LineRule::new("+ ", LineStyle::UnorderedList, RemovalZone::Leading),
    ]
});

static CHARACTER_RULES: Lazy<Vec<CharacterRule>> = Lazy::new(|| {
    vec![
        CharacterRule::bracketed("![", Some("]("), ")", CharacterStyle::Image).with_escape('\\'),
        CharacterRule::bracketed("[", Some("]("), ")", CharacterStyle::Link).with_escape('\\'),
        CharacterRule::repeating('`', styles(&[(1, &[CharacterStyle::Code])]))
            .with_escape('\\')
            .with_cancel(Cancels::AllRemaining),
        CharacterRule::repeating(
            '*',
            styles(&[
                (1, &[CharacterStyle::Italic]),
                (2, &[CharacterStyle::Bold]),
                (3, &[CharacterStyle::Bold, CharacterStyle::Italic]),
            ]),
        )
        .with_escape('\\')
        .with_spacing(SpacingConstraint::OneSideForbidden),
        CharacterRule::repeating(
            '_',
            styles(&[
                (1, &[CharacterStyle::Italic]),
                (2, &[CharacterStyle::Bold]),
                (3, &[CharacterStyle::Bold, CharacterStyle::Italic]),
            ]),
        )
        .with_escape('\\')
        .with_spacing(SpacingConstraint::OneSideForbidden),
        CharacterRule::repeating('~', styles(&[(2, &[CharacterStyle::Strikethrough])]))
            .with_escape('\\')
            .with_repeat_range(2, 2),
    ]
});

fn styles(entries: &[(usize, &[CharacterStyle])]) -> BTreeMap<usize, Vec<CharacterStyle>> {
    entries
        .iter()
        .map(|(count, set)| (*count, set.to_vec()))
        .collect()
}

/// The default line rule list, in matching order.
pub fn default_line_rules() -> Vec<LineRule> {
    LINE_RULES.clone()
}

/// The default character rule list, in pipeline order.
pub fn default_character_rules() -> Vec<CharacterRule> {
    CHARACTER_RULES.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_validate() {
        for rule in default_line_rules() {
            assert!(rule.validate().is_ok(), "line rule {:?}", rule.token);
        }
        for rule in default_character_rules() {
            assert!(rule.validate().is_ok(), "character rule {:?}", rule.open_tag);
        }
    }

    #[test]
    fn images_resolve_before_links() {
        let rules = default_character_rules();
        let image = rules.iter().position(|r| r.open_tag == "![").unwrap();
        let link = rules.iter().position(|r| r.open_tag == "[").unwrap();
        assert!(image < link);
    }

    #[test]
    fn code_resolves_before_emphasis() {
        let rules = default_character_rules();
        let code = rules.iter().position(|r| r.open_tag == "`").unwrap();
        let emphasis = rules.iter().position(|r| r.open_tag == "*").unwrap();
        assert!(code < emphasis);
    }

    #[test]
    fn indented_code_comes_before_setext_underlines() {
        let rules = default_line_rules();
        let code = rules.iter().position(|r| r.token == "    ").unwrap();
        let tab = rules.iter().position(|r| r.token == "\t").unwrap();
        let setext = rules.iter().position(|r| r.token == "=").unwrap();
        assert!(code < setext);
        assert!(tab < setext);
    }

    #[test]
    fn longer_heading_prefixes_come_first() {
        let rules = default_line_rules();
        let h6 = rules.iter().position(|r| r.token == "###### ").unwrap();
        let h1 = rules.iter().position(|r| r.token == "# ").unwrap();
        assert!(h6 < h1);
    }
}
