//! Rule model
//!
//!     The entire configuration surface of the engine is two rule lists: an ordered list
//!     of [LineRule]s consumed by the line classifier and an ordered list of
//!     [CharacterRule]s consumed by the inline tokenizer. Ordering is significant in
//!     both: the first matching line rule wins per line, and character rules are applied
//!     as a pipeline where earlier rules take priority.
//!
//!     Rules are immutable configuration, built once per session and shared read-only
//!     across invocations. Malformed *input* never errors anywhere in the engine, but a
//!     malformed *rule* is a programming mistake: rule sets are validated when the
//!     classifier or tokenizer is constructed, and scanning assumes the invariants hold.

pub mod defaults;

use std::collections::BTreeMap;
use std::fmt;

use crate::styles::{CharacterStyle, LineStyle};

/// Where a line rule's matched token is removed from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RemovalZone {
    /// Token must prefix the line; the prefix is stripped.
    Leading,
    /// Token must suffix the line; the suffix is stripped.
    Trailing,
    /// Token must both prefix and suffix the line; both ends are stripped.
    Both,
    /// The trimmed line must consist entirely of repetitions of the token;
    /// the whole line is consumed.
    EntireLine,
    /// Token must prefix the line, but nothing is stripped.
    None,
}

/// Which line a matching line rule styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AppliesTo {
    Current,
    /// Restyle the previously emitted line (setext headings). The matching
    /// line itself is emitted as a consumed marker with the default style.
    Previous,
}

/// A block-level rule matched against whole lines.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineRule {
    pub token: String,
    pub style: LineStyle,
    pub removal_zone: RemovalZone,
    pub applies_to: AppliesTo,
}

impl LineRule {
    pub fn new(token: impl Into<String>, style: LineStyle, removal_zone: RemovalZone) -> Self {
        Self {
            token: token.into(),
            style,
            removal_zone,
            applies_to: AppliesTo::Current,
        }
    }

    /// Mark this rule as restyling the previously classified line.
    pub fn applies_to_previous(mut self) -> Self {
        self.applies_to = AppliesTo::Previous;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), RuleError> {
        if self.token.is_empty() {
            return Err(RuleError::EmptyLineToken);
        }
        Ok(())
    }
}

/// Whitespace constraint on the characters adjacent to a delimiter run.
///
/// A string boundary counts as "none"; the precise accept/reject rules are
/// documented on each variant. A rejected run stays literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SpacingConstraint {
    /// No constraint.
    None,
    /// Reject if either neighbor is whitespace.
    BothSidesForbidden,
    /// Reject if (prev is space-or-boundary AND next is space) or
    /// (prev is space AND next is space-or-boundary). This is what keeps
    /// `* spaced *` literal while `*word*` tokenizes.
    OneSideForbidden,
    /// Reject if the previous character is whitespace.
    LeadingForbidden,
    /// Reject if the next character is whitespace.
    TrailingForbidden,
}

/// What a resolved span cancels for the rest of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Cancels {
    None,
    /// Tokens inside the span are skipped by every later rule (code spans).
    AllRemaining,
    /// Unpaired same-rule delimiters inside the span are demoted to literal
    /// text during this rule's own resolution pass.
    CurrentRuleSet,
}

/// An inline delimiter rule.
///
/// Two shapes exist, distinguished by `closing_tag`:
///
/// - *Repeating* (no closing tag): a single delimiter character whose run
///   length (between `min_tag_repeat` and `max_tag_repeat`) selects the style
///   set from `styles_by_tag_count`. Two runs of identical length pair up
///   (`*italic*`, `**bold**`, `***both***`).
/// - *Bracketed* (closing tag present): open, optional intermediate, and
///   closing tags must appear in order (`[text](url)`); text between the
///   intermediate and closing tags is captured as metadata, not rendered.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CharacterRule {
    pub open_tag: String,
    pub intermediate_tag: Option<String>,
    pub closing_tag: Option<String>,
    pub escape_character: Option<char>,
    /// Style sets keyed by delimiter repeat count. Bracketed rules use key 1.
    pub styles_by_tag_count: BTreeMap<usize, Vec<CharacterStyle>>,
    pub min_tag_repeat: usize,
    pub max_tag_repeat: usize,
    pub spacing_constraint: SpacingConstraint,
    pub cancels_remaining: Cancels,
}

impl CharacterRule {
    /// A repeating-delimiter rule over a single character.
    pub fn repeating(open_tag: char, styles_by_tag_count: BTreeMap<usize, Vec<CharacterStyle>>) -> Self {
        let max_tag_repeat = styles_by_tag_count.keys().copied().max().unwrap_or(1);
        Self {
            open_tag: open_tag.to_string(),
            intermediate_tag: None,
            closing_tag: None,
            escape_character: None,
            styles_by_tag_count,
            min_tag_repeat: 1,
            max_tag_repeat,
            spacing_constraint: SpacingConstraint::None,
            cancels_remaining: Cancels::None,
        }
    }

    /// A bracketed rule carrying a single style.
    pub fn bracketed(
        open_tag: impl Into<String>,
        intermediate_tag: Option<&str>,
        closing_tag: impl Into<String>,
        style: CharacterStyle,
    ) -> Self {
        let mut styles_by_tag_count = BTreeMap::new();
        styles_by_tag_count.insert(1, vec![style]);
        Self {
            open_tag: open_tag.into(),
            intermediate_tag: intermediate_tag.map(str::to_string),
            closing_tag: Some(closing_tag.into()),
            escape_character: None,
            styles_by_tag_count,
            min_tag_repeat: 1,
            max_tag_repeat: 1,
            spacing_constraint: SpacingConstraint::None,
            cancels_remaining: Cancels::None,
        }
    }

    pub fn with_escape(mut self, escape_character: char) -> Self {
        self.escape_character = Some(escape_character);
        self
    }

    pub fn with_spacing(mut self, spacing_constraint: SpacingConstraint) -> Self {
        self.spacing_constraint = spacing_constraint;
        self
    }

    pub fn with_cancel(mut self, cancels_remaining: Cancels) -> Self {
        self.cancels_remaining = cancels_remaining;
        self
    }

    pub fn with_repeat_range(mut self, min_tag_repeat: usize, max_tag_repeat: usize) -> Self {
        self.min_tag_repeat = min_tag_repeat;
        self.max_tag_repeat = max_tag_repeat;
        self
    }

    /// Whether this is a repeating-delimiter rule (no closing tag).
    pub(crate) fn is_repeating(&self) -> bool {
        self.closing_tag.is_none()
    }

    /// The delimiter character of a repeating rule.
    ///
    /// Valid only after `validate` has passed, which guarantees a repeating
    /// rule's open tag is exactly one character.
    pub(crate) fn repeat_char(&self) -> char {
        debug_assert!(self.is_repeating());
        self.open_tag.chars().next().unwrap_or('\0')
    }

    /// Every character that belongs to this rule's tags. The escape character
    /// only neutralizes characters in this set.
    pub(crate) fn delimiter_chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.open_tag.chars().collect();
        for tag in [&self.intermediate_tag, &self.closing_tag].into_iter().flatten() {
            chars.extend(tag.chars());
        }
        if let Some(escape) = self.escape_character {
            chars.push(escape);
        }
        chars.sort_unstable();
        chars.dedup();
        chars
    }

    pub(crate) fn validate(&self) -> Result<(), RuleError> {
        if self.open_tag.is_empty() {
            return Err(RuleError::EmptyOpenTag);
        }
        if self.intermediate_tag.as_deref() == Some("")
            || self.closing_tag.as_deref() == Some("")
        {
            return Err(RuleError::EmptyAuxiliaryTag(self.open_tag.clone()));
        }
        if self.intermediate_tag.is_some() && self.closing_tag.is_none() {
            return Err(RuleError::IntermediateWithoutClosing(self.open_tag.clone()));
        }
        if self.is_repeating() && self.open_tag.chars().count() != 1 {
            return Err(RuleError::MultiCharRepeatingTag(self.open_tag.clone()));
        }
        if self.min_tag_repeat == 0 || self.max_tag_repeat == 0 {
            return Err(RuleError::ZeroTagRepeat(self.open_tag.clone()));
        }
        if self.min_tag_repeat > self.max_tag_repeat {
            return Err(RuleError::InvertedTagRepeatRange(self.open_tag.clone()));
        }
        Ok(())
    }
}

/// Errors raised at rule-set construction time.
///
/// These are the only errors in the engine: once a rule set validates,
/// classification and tokenization are total over their input domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A line rule with an empty token
    EmptyLineToken,
    /// A character rule with an empty open tag
    EmptyOpenTag,
    /// An intermediate or closing tag set to the empty string
    EmptyAuxiliaryTag(String),
    /// An intermediate tag without a closing tag
    IntermediateWithoutClosing(String),
    /// A repeating rule whose open tag is not exactly one character
    MultiCharRepeatingTag(String),
    /// A repeat bound of zero
    ZeroTagRepeat(String),
    /// min_tag_repeat greater than max_tag_repeat
    InvertedTagRepeatRange(String),
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::EmptyLineToken => write!(f, "Rule error: line rule has an empty token"),
            RuleError::EmptyOpenTag => write!(f, "Rule error: character rule has an empty open tag"),
            RuleError::EmptyAuxiliaryTag(tag) => write!(
                f,
                "Rule error: rule '{}' has an empty intermediate or closing tag",
                tag
            ),
            RuleError::IntermediateWithoutClosing(tag) => write!(
                f,
                "Rule error: rule '{}' has an intermediate tag but no closing tag",
                tag
            ),
            RuleError::MultiCharRepeatingTag(tag) => write!(
                f,
                "Rule error: repeating rule '{}' must use a single-character open tag",
                tag
            ),
            RuleError::ZeroTagRepeat(tag) => {
                write!(f, "Rule error: rule '{}' has a repeat bound of zero", tag)
            }
            RuleError::InvertedTagRepeatRange(tag) => write!(
                f,
                "Rule error: rule '{}' has min_tag_repeat greater than max_tag_repeat",
                tag
            ),
        }
    }
}

impl std::error::Error for RuleError {}
