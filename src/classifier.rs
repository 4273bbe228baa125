//! Line classifier
//!
//!     First of the two passes. The classifier walks a document line by line, tests
//!     each line against an ordered rule list (first match wins), strips the matched
//!     token per the rule's removal zone, and tags the line with the rule's style.
//!
//!     Setext-style rules (`applies_to == Previous`) restyle the line emitted just
//!     before the match instead of the matching line; the rewrite never looks back
//!     further than that one line. Unmatched lines fall back to the default style, so
//!     this pass has no failure mode once the rule list validates.
//!
//!     The classifier has no dependency on the inline tokenizer. A caller feeds each
//!     classified line whose style allows it (see
//!     [LineStyle::should_tokenize](crate::styles::LineStyle::should_tokenize)) into
//!     the tokenizer afterwards.

use crate::rules::{AppliesTo, LineRule, RemovalZone, RuleError};
use crate::styles::LineStyle;

/// One input line with its resolved style.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassifiedLine {
    /// Line text with the matched rule token stripped
    pub text: String,
    pub style: LineStyle,
    /// Zero-based index of the line in the input document
    pub line_number: usize,
}

/// The line classification pass over an ordered [LineRule] list.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    rules: Vec<LineRule>,
    default_style: LineStyle,
}

impl LineClassifier {
    /// Build a classifier, validating every rule up front.
    pub fn new(rules: Vec<LineRule>, default_style: LineStyle) -> Result<Self, RuleError> {
        for rule in &rules {
            rule.validate()?;
        }
        Ok(Self {
            rules,
            default_style,
        })
    }

    /// Classifier with the default markdown line rules.
    pub fn markdown() -> Self {
        // Default rules are validated by construction (covered in rule tests).
        Self {
            rules: crate::rules::defaults::default_line_rules(),
            default_style: LineStyle::Body,
        }
    }

    /// Classify every line of `text`, one [ClassifiedLine] per input line,
    /// blank lines included.
    pub fn classify(&self, text: &str) -> Vec<ClassifiedLine> {
        let mut classified: Vec<ClassifiedLine> = Vec::new();
        for (line_number, line) in text.lines().enumerate() {
            let resolved = self.classify_line(line, &mut classified);
            let (text, style) = resolved.unwrap_or_else(|| (line.to_string(), self.default_style));
            classified.push(ClassifiedLine {
                text,
                style,
                line_number,
            });
        }
        classified
    }

    /// Test one line against the rule list. Returns the stripped text and
    /// style for the current line, or None when no rule matches. A
    /// previous-applying match mutates the last entry of `classified`.
    fn classify_line(
        &self,
        line: &str,
        classified: &mut [ClassifiedLine],
    ) -> Option<(String, LineStyle)> {
        for rule in &self.rules {
            let stripped = match match_rule(line, rule) {
                Some(stripped) => stripped,
                None => continue,
            };
            match rule.applies_to {
                AppliesTo::Current => return Some((stripped, rule.style)),
                AppliesTo::Previous => {
                    // A setext underline with nothing above it is literal text.
                    let previous = match classified.last_mut() {
                        Some(previous) => previous,
                        None => continue,
                    };
                    previous.style = rule.style;
                    return Some((stripped, self.default_style));
                }
            }
        }
        None
    }
}

/// Match a single rule against a line, returning the stripped text.
fn match_rule(line: &str, rule: &LineRule) -> Option<String> {
    let token = rule.token.as_str();
    match rule.removal_zone {
        RemovalZone::Leading => line.strip_prefix(token).map(str::to_string),
        RemovalZone::Trailing => line.strip_suffix(token).map(str::to_string),
        RemovalZone::Both => {
            if line.len() < token.len() * 2 {
                return None;
            }
            line.strip_prefix(token)
                .and_then(|rest| rest.strip_suffix(token))
                .map(str::to_string)
        }
        RemovalZone::EntireLine => {
            if is_repetition_of(line.trim(), token) {
                Some(String::new())
            } else {
                None
            }
        }
        RemovalZone::None => {
            if line.starts_with(token) {
                Some(line.to_string())
            } else {
                None
            }
        }
    }
}

/// Whether `text` consists of one or more repetitions of `token`.
///
/// Lets a `"="` rule match an underline of any length (`=`, `==`, `===`).
fn is_repetition_of(text: &str, token: &str) -> bool {
    if text.is_empty() || text.len() % token.len() != 0 {
        return false;
    }
    text.as_bytes()
        .chunks(token.len())
        .all(|chunk| chunk == token.as_bytes())
}
