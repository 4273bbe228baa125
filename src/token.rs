//! Token types for the inline tokenizer
//!
//!     The tokenizer output is a flat sequence of typed tokens, not a tree. A token's
//!     *rendered* text is computed from its kind: tag markers and metadata render as
//!     empty once consumed, literal kinds render their raw text. Concatenating the
//!     rendered text of a fully resolved sequence reproduces the input with delimiter
//!     syntax removed and escape characters stripped.
//!
//!     Tokens are transient: each `tokenize` call produces a fresh sequence owned by
//!     the caller, with no back-references into tokenizer state.

use crate::styles::CharacterStyle;

/// The classification of a token in the inline pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TokenKind {
    /// Plain literal text. The only kind later rules re-scan.
    Text,
    /// Open marker of a resolved bracketed span
    OpenTag,
    /// Intermediate marker of a resolved bracketed span
    IntermediateTag,
    /// Close marker of a resolved bracketed span
    CloseTag,
    /// A delimiter run of a repeating rule, pending or unpaired
    RepeatingTag,
    /// Captured bracketed-span metadata (link destination); never rendered
    Metadata,
    /// A consumed tag marker; renders as empty
    Processed,
    /// An escaped glyph; renders raw and is never re-scanned as a delimiter
    Escape,
}

/// One token of the inline pipeline.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub raw_text: String,
    /// Link/image destination attached to content tokens of a bracketed span
    pub metadata: Option<String>,
    /// Styles accumulated across rule passes, in resolution order
    pub styles: Vec<CharacterStyle>,
    /// Run length of a repeating tag; reset to zero when the run is consumed
    pub repeat_count: usize,
    /// Set when a resolved span cancels all remaining rules for this token
    pub skip: bool,
}

impl Token {
    pub fn text(raw_text: impl Into<String>) -> Self {
        Self::with_kind(TokenKind::Text, raw_text)
    }

    pub(crate) fn escape(raw_text: impl Into<String>) -> Self {
        Self::with_kind(TokenKind::Escape, raw_text)
    }

    pub(crate) fn repeating(raw_text: impl Into<String>, repeat_count: usize) -> Self {
        let mut token = Self::with_kind(TokenKind::RepeatingTag, raw_text);
        token.repeat_count = repeat_count;
        token
    }

    pub(crate) fn with_kind(kind: TokenKind, raw_text: impl Into<String>) -> Self {
        Self {
            kind,
            raw_text: raw_text.into(),
            metadata: None,
            styles: Vec::new(),
            repeat_count: 0,
            skip: false,
        }
    }

    /// The text this token contributes to the final output.
    ///
    /// An unpaired repeating tag keeps its nonzero count and renders its raw
    /// delimiter characters; a consumed one renders nothing.
    pub fn rendered_text(&self) -> &str {
        match self.kind {
            TokenKind::Text | TokenKind::Escape => &self.raw_text,
            TokenKind::RepeatingTag if self.repeat_count > 0 => &self.raw_text,
            _ => "",
        }
    }
}

/// A maximal run of output text sharing one style list and metadata value.
///
/// This is the unit a rendering collaborator consumes: text, the ordered style
/// tags to map onto presentation attributes, and the link destination if any.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyledRun {
    pub text: String,
    pub styles: Vec<CharacterStyle>,
    pub metadata: Option<String>,
}

/// Collapse a resolved token sequence into styled runs.
///
/// Tokens rendering empty text are dropped; adjacent tokens with identical
/// styles and metadata are merged.
pub fn styled_runs(tokens: &[Token]) -> Vec<StyledRun> {
    let mut runs: Vec<StyledRun> = Vec::new();
    for token in tokens {
        let text = token.rendered_text();
        if text.is_empty() {
            continue;
        }
        match runs.last_mut() {
            Some(last) if last.styles == token.styles && last.metadata == token.metadata => {
                last.text.push_str(text);
            }
            _ => runs.push(StyledRun {
                text: text.to_string(),
                styles: token.styles.clone(),
                metadata: token.metadata.clone(),
            }),
        }
    }
    runs
}
