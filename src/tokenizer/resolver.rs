//! Per-rule style resolution
//!
//!     Second half of a rule's pass. The scanner leaves tag tokens in the sequence;
//!     resolution pairs them up, pushes the rule's styles onto every token strictly
//!     between a pair, and reclassifies consumed markers as
//!     [Processed](crate::token::TokenKind::Processed) so they render empty.
//!
//!     Pairing is greedy left-to-right and earliest-closing: an open run always takes
//!     the first unconsumed run with identical raw text as its close. An open with no
//!     close keeps its raw form and renders as literal delimiter characters.

use crate::rules::{Cancels, CharacterRule};
use crate::token::{Token, TokenKind};

/// Resolve one rule over the token sequence its scan produced.
pub(crate) fn apply_styles(tokens: &mut [Token], rule: &CharacterRule) {
    if rule.is_repeating() {
        resolve_repeating(tokens, rule);
    } else {
        resolve_bracketed(tokens, rule);
    }
}

fn resolve_repeating(tokens: &mut [Token], rule: &CharacterRule) {
    let delimiter = rule.repeat_char();
    let mut i = 0;
    while i < tokens.len() {
        if !is_pending_run(&tokens[i], delimiter) {
            i += 1;
            continue;
        }
        let count = tokens[i].repeat_count;
        let raw = tokens[i].raw_text.clone();
        let close = (i + 1..tokens.len())
            .find(|&j| is_pending_run(&tokens[j], delimiter) && tokens[j].raw_text == raw);
        let j = match close {
            Some(j) => j,
            // Unpaired run: renders its literal delimiters.
            None => {
                i += 1;
                continue;
            }
        };

        let styles = rule
            .styles_by_tag_count
            .get(&count)
            .cloned()
            .unwrap_or_default();
        for token in &mut tokens[i + 1..j] {
            token.styles.extend(styles.iter().copied());
            match rule.cancels_remaining {
                Cancels::AllRemaining => token.skip = true,
                Cancels::CurrentRuleSet => {
                    if is_pending_run(token, delimiter) {
                        token.kind = TokenKind::Text;
                        token.repeat_count = 0;
                    }
                }
                Cancels::None => {}
            }
        }
        consume(&mut tokens[i]);
        consume(&mut tokens[j]);
        i = j + 1;
    }
}

fn resolve_bracketed(tokens: &mut [Token], rule: &CharacterRule) {
    let styles = rule
        .styles_by_tag_count
        .get(&1)
        .cloned()
        .unwrap_or_default();
    let mut i = 0;
    while i < tokens.len() {
        if !(tokens[i].kind == TokenKind::OpenTag && tokens[i].raw_text == rule.open_tag) {
            i += 1;
            continue;
        }
        // The scanner only emits complete structures, so the close is present.
        let close = (i + 1..tokens.len()).find(|&j| {
            tokens[j].kind == TokenKind::CloseTag
                && Some(tokens[j].raw_text.as_str()) == rule.closing_tag.as_deref()
        });
        let j = match close {
            Some(j) => j,
            None => {
                i += 1;
                continue;
            }
        };

        let intermediate = (i + 1..j).find(|&m| tokens[m].kind == TokenKind::IntermediateTag);
        let metadata = (i + 1..j)
            .find(|&m| tokens[m].kind == TokenKind::Metadata)
            .map(|m| tokens[m].raw_text.clone());

        let content_end = intermediate.unwrap_or(j);
        for token in &mut tokens[i + 1..content_end] {
            token.styles.extend(styles.iter().copied());
            if let Some(metadata) = &metadata {
                token.metadata = Some(metadata.clone());
            }
            if rule.cancels_remaining == Cancels::AllRemaining {
                token.skip = true;
            }
        }

        tokens[i].kind = TokenKind::Processed;
        if let Some(m) = intermediate {
            tokens[m].kind = TokenKind::Processed;
        }
        tokens[j].kind = TokenKind::Processed;
        i = j + 1;
    }
}

/// An unconsumed delimiter run belonging to the given repeating rule.
fn is_pending_run(token: &Token, delimiter: char) -> bool {
    token.kind == TokenKind::RepeatingTag
        && token.repeat_count > 0
        && !token.skip
        && token.raw_text.starts_with(delimiter)
}

fn consume(token: &mut Token) {
    token.kind = TokenKind::Processed;
    token.repeat_count = 0;
}
