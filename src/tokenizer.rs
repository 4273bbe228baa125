//! Inline tokenizer
//!
//!     This module orchestrates the inline pipeline. Rules are applied in list order,
//!     each as a scan ([scanner]) followed by a resolution ([resolver]) pass. A rule
//!     only re-scans the Text tokens produced so far; everything already typed or
//!     resolved by an earlier rule is carried through untouched, which is how earlier
//!     rules take priority (links before emphasis, code spans cancelling everything
//!     inside them).
//!
//!     The tokenizer is pure and holds no state across invocations beyond its
//!     immutable rule list, so independent lines may be tokenized concurrently by a
//!     caller. Malformed input never errors: every failure mode degrades to literal
//!     text.

pub(crate) mod resolver;
pub(crate) mod scanner;

use crate::rules::{CharacterRule, RuleError};
use crate::token::{Token, TokenKind};

/// The inline tokenization pass over an ordered [CharacterRule] list.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    rules: Vec<CharacterRule>,
}

impl Tokenizer {
    /// Build a tokenizer, validating every rule up front.
    pub fn new(rules: Vec<CharacterRule>) -> Result<Self, RuleError> {
        for rule in &rules {
            rule.validate()?;
        }
        Ok(Self { rules })
    }

    /// Tokenizer with the default markdown character rules.
    pub fn markdown() -> Self {
        // Default rules are validated by construction (covered in rule tests).
        Self {
            rules: crate::rules::defaults::default_character_rules(),
        }
    }

    /// Run every rule over `text`, producing the resolved token sequence.
    ///
    /// With an empty rule list the input comes back as one literal Text token.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        // Scans drop empty literals; keep the one-token shape for "".
        if text.is_empty() {
            return vec![Token::text(text)];
        }
        let mut tokens = vec![Token::text(text)];
        for rule in &self.rules {
            tokens = apply_rule(tokens, rule);
        }
        tokens
    }
}

/// One full rule pass: re-scan pending Text tokens, then resolve pairings.
fn apply_rule(tokens: Vec<Token>, rule: &CharacterRule) -> Vec<Token> {
    let mut scanned = Vec::with_capacity(tokens.len());
    for token in tokens {
        if token.kind != TokenKind::Text || token.skip {
            scanned.push(token);
            continue;
        }
        for mut piece in scanner::scan(&token.raw_text, rule) {
            // Pieces inherit the styles and metadata already resolved onto
            // the text they were split from.
            let mut styles = token.styles.clone();
            styles.extend(piece.styles);
            piece.styles = styles;
            if piece.metadata.is_none() {
                piece.metadata = token.metadata.clone();
            }
            scanned.push(piece);
        }
    }
    resolver::apply_styles(&mut scanned, rule);
    scanned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::CharacterStyle;
    use crate::token::styled_runs;

    fn markdown() -> Tokenizer {
        Tokenizer::markdown()
    }

    fn rendered(tokens: &[Token]) -> String {
        tokens.iter().map(Token::rendered_text).collect()
    }

    #[test]
    fn zero_rules_return_the_input_unchanged() {
        let tokenizer = Tokenizer::new(Vec::new()).unwrap();
        let tokens = tokenizer.tokenize("*anything* [goes](here)");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Text);
        assert_eq!(tokens[0].raw_text, "*anything* [goes](here)");
    }

    #[test]
    fn code_span_shields_emphasis_from_later_rules() {
        let tokens = markdown().tokenize("`*not italic*`");
        assert_eq!(rendered(&tokens), "*not italic*");
        let runs = styled_runs(&tokens);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].styles, vec![CharacterStyle::Code]);
    }

    #[test]
    fn emphasis_nested_in_bold_accumulates_styles() {
        let tokens = markdown().tokenize("**bold _and italic_**");
        let runs = styled_runs(&tokens);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "bold ");
        assert_eq!(runs[0].styles, vec![CharacterStyle::Bold]);
        assert_eq!(runs[1].text, "and italic");
        assert_eq!(
            runs[1].styles,
            vec![CharacterStyle::Bold, CharacterStyle::Italic]
        );
    }

    #[test]
    fn link_content_survives_emphasis_pass() {
        let tokens = markdown().tokenize("[*text*](url)");
        // The link resolves first; the emphasis rule then styles its content.
        let runs = styled_runs(&tokens);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "text");
        assert_eq!(
            runs[0].styles,
            vec![CharacterStyle::Link, CharacterStyle::Italic]
        );
        assert_eq!(runs[0].metadata.as_deref(), Some("url"));
    }

    #[test]
    fn image_and_link_in_one_line() {
        let tokens = markdown().tokenize("see ![alt](img.png) and [home](http://x)");
        assert_eq!(rendered(&tokens), "see alt and home");
        let runs = styled_runs(&tokens);
        let image = runs.iter().find(|r| r.text == "alt").unwrap();
        assert_eq!(image.styles, vec![CharacterStyle::Image]);
        assert_eq!(image.metadata.as_deref(), Some("img.png"));
        let link = runs.iter().find(|r| r.text == "home").unwrap();
        assert_eq!(link.styles, vec![CharacterStyle::Link]);
    }

    #[test]
    fn escape_applies_across_the_whole_pipeline() {
        let tokens = markdown().tokenize(r"\*word\*");
        assert_eq!(rendered(&tokens), "*word*");
        assert!(styled_runs(&tokens)
            .iter()
            .all(|run| run.styles.is_empty()));
    }

    #[test]
    fn strikethrough_requires_exactly_two_tildes() {
        let tokens = markdown().tokenize("~~gone~~ but ~one~ stays");
        assert_eq!(rendered(&tokens), "gone but ~one~ stays");
        let runs = styled_runs(&tokens);
        assert_eq!(runs[0].text, "gone");
        assert_eq!(runs[0].styles, vec![CharacterStyle::Strikethrough]);
    }

    #[test]
    fn empty_input_is_one_empty_text_token() {
        let tokens = markdown().tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Text);
        assert_eq!(rendered(&tokens), "");
    }

    #[test]
    fn invalid_rule_fails_construction() {
        let mut rule = crate::rules::defaults::default_character_rules()
            .into_iter()
            .next()
            .unwrap();
        rule.open_tag = String::new();
        let err = Tokenizer::new(vec![rule]).unwrap_err();
        assert_eq!(err, RuleError::EmptyOpenTag);
    }
}
