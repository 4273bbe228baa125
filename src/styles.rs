//! Style tags
//!
//!     The tokenizer and classifier never interpret presentation semantics. They only
//!     propagate these tags; a rendering collaborator maps them onto fonts, colors and
//!     link attributes. Both enums are closed: callers that need additional styles add
//!     variants here rather than smuggling color codes through the pipeline.

use std::fmt;

/// An inline style produced by character rule resolution.
///
/// Tokens carry an ordered list of these. Duplicates are allowed (a caller may
/// de-duplicate); ordering reflects the order in which rules resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum CharacterStyle {
    Italic,
    Bold,
    Code,
    Link,
    Image,
    Strikethrough,
}

impl fmt::Display for CharacterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharacterStyle::Italic => "ITALIC",
            CharacterStyle::Bold => "BOLD",
            CharacterStyle::Code => "CODE",
            CharacterStyle::Link => "LINK",
            CharacterStyle::Image => "IMAGE",
            CharacterStyle::Strikethrough => "STRIKETHROUGH",
        };
        write!(f, "{}", name)
    }
}

/// The semantic classification assigned to a line by the line classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineStyle {
    /// Any line not matched by a line rule (paragraph text, blank lines)
    Body,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Blockquote,
    /// Indented code block content. Never enters the inline tokenizer.
    CodeBlock,
    UnorderedList,
}

impl LineStyle {
    /// Whether lines with this style should be fed to the inline tokenizer.
    ///
    /// Code block content is passed through verbatim: backticks, asterisks and
    /// brackets inside it are literal text.
    pub fn should_tokenize(&self) -> bool {
        !matches!(self, LineStyle::CodeBlock)
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineStyle::Body => "BODY",
            LineStyle::H1 => "H1",
            LineStyle::H2 => "H2",
            LineStyle::H3 => "H3",
            LineStyle::H4 => "H4",
            LineStyle::H5 => "H5",
            LineStyle::H6 => "H6",
            LineStyle::Blockquote => "BLOCKQUOTE",
            LineStyle::CodeBlock => "CODE_BLOCK",
            LineStyle::UnorderedList => "UNORDERED_LIST",
        };
        write!(f, "{}", name)
    }
}
