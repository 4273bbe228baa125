//! Document engine
//!
//!     Thin front end bundling the two passes in their consumption order: classify
//!     lines first, then tokenize each line whose style allows it. Non-tokenizing
//!     lines (code blocks) pass through as a single unstyled run.

use crate::classifier::LineClassifier;
use crate::rules::{CharacterRule, LineRule, RuleError};
use crate::styles::LineStyle;
use crate::token::{styled_runs, StyledRun};
use crate::tokenizer::Tokenizer;

/// One fully processed line: its block style plus resolved inline runs.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProcessedLine {
    pub style: LineStyle,
    pub line_number: usize,
    pub runs: Vec<StyledRun>,
}

/// Both passes behind one call, configured once and reusable across documents.
#[derive(Debug, Clone)]
pub struct MarkdownEngine {
    classifier: LineClassifier,
    tokenizer: Tokenizer,
}

impl MarkdownEngine {
    /// Engine over caller-supplied rule lists.
    pub fn new(
        line_rules: Vec<LineRule>,
        character_rules: Vec<CharacterRule>,
        default_style: LineStyle,
    ) -> Result<Self, RuleError> {
        Ok(Self {
            classifier: LineClassifier::new(line_rules, default_style)?,
            tokenizer: Tokenizer::new(character_rules)?,
        })
    }

    /// Engine with the default markdown rule sets.
    pub fn markdown() -> Self {
        Self {
            classifier: LineClassifier::markdown(),
            tokenizer: Tokenizer::markdown(),
        }
    }

    /// Classify and tokenize a whole document, one entry per input line.
    pub fn process(&self, text: &str) -> Vec<ProcessedLine> {
        self.classifier
            .classify(text)
            .into_iter()
            .map(|line| {
                let runs = if line.style.should_tokenize() {
                    styled_runs(&self.tokenizer.tokenize(&line.text))
                } else if line.text.is_empty() {
                    Vec::new()
                } else {
                    vec![StyledRun {
                        text: line.text.clone(),
                        styles: Vec::new(),
                        metadata: None,
                    }]
                };
                ProcessedLine {
                    style: line.style,
                    line_number: line.line_number,
                    runs,
                }
            })
            .collect()
    }
}

impl Default for MarkdownEngine {
    fn default() -> Self {
        Self::markdown()
    }
}
