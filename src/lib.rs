//! # styledown
//!
//! A rule-driven markdown engine built from two cooperating passes:
//!
//! 1. The [line classifier](classifier) scans a document line by line against an
//!    ordered list of [LineRule]s, tags each line with a semantic style, strips
//!    matched tokens, and supports rules that restyle the previous line (setext
//!    headings).
//! 2. The [inline tokenizer](tokenizer) scans line text character by character
//!    against an ordered list of [CharacterRule]s, producing a flat token
//!    sequence with resolved style annotations. It honors escapes, spacing
//!    constraints around delimiter runs, ambiguous tag counts (`***both***`),
//!    and rule cancellation (code spans shield their contents from every later
//!    rule).
//!
//! The classifier has no dependency on the tokenizer; a caller typically feeds
//! classified line text into the tokenizer, or uses [MarkdownEngine] which wires
//! the two together with the default markdown rule sets.
//!
//! Style tags ([CharacterStyle], [LineStyle]) are opaque to the engine: it only
//! propagates them. Mapping tags onto fonts, colors or link attributes is the
//! rendering collaborator's concern. Malformed input never errors anywhere in
//! the pipeline: unterminated tags, stray escapes and rejected spacing all
//! degrade to literal text. The only fallible operation is rule-set
//! construction, which validates rule invariants up front.

pub mod classifier;
pub mod engine;
pub mod rules;
pub mod styles;
pub mod token;
pub mod tokenizer;

pub use classifier::{ClassifiedLine, LineClassifier};
pub use engine::{MarkdownEngine, ProcessedLine};
pub use rules::{
    AppliesTo, Cancels, CharacterRule, LineRule, RemovalZone, RuleError, SpacingConstraint,
};
pub use styles::{CharacterStyle, LineStyle};
pub use token::{styled_runs, StyledRun, Token, TokenKind};
pub use tokenizer::Tokenizer;
