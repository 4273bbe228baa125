//! Per-rule character scan
//!
//!     One rule, one pass. The scanner walks a text fragment with an explicit cursor,
//!     accumulating literal text until it finds a delimiter that satisfies the rule,
//!     and emits tag tokens for the spans it accepts. Everything it rejects stays in
//!     the literal accumulator: an unterminated bracket, an over-long delimiter run
//!     or a run failing the rule's spacing constraint degrades to plain text rather
//!     than erroring.
//!
//!     Escapes are handled before anything else: the escape character neutralizes the
//!     character after it when that character belongs to this rule's delimiter set,
//!     producing an [Escape](crate::token::TokenKind::Escape) token that later rules
//!     never reinterpret. An escape character in front of anything else is ordinary
//!     text (it may belong to another rule's escape set).

use crate::rules::{CharacterRule, SpacingConstraint};
use crate::token::Token;

/// Explicit cursor over an indexed character sequence.
///
/// Spacing constraints need lookbehind across an entire delimiter run, so the
/// cursor exposes positional peeks rather than a plain iterator.
struct Cursor<'a> {
    chars: &'a [char],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self { chars, pos: 0 }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_behind(&self) -> Option<char> {
        self.pos.checked_sub(1).and_then(|i| self.chars.get(i)).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self, count: usize) {
        self.pos += count;
    }

    /// Length of the maximal run of `ch` starting at the cursor.
    fn run_length(&self, ch: char) -> usize {
        self.chars[self.pos..]
            .iter()
            .take_while(|&&c| c == ch)
            .count()
    }

    /// Whether the characters at the cursor start with `tag`.
    fn starts_with(&self, tag: &[char]) -> bool {
        self.chars[self.pos..].starts_with(tag)
    }
}

/// Scan one text fragment against one rule.
pub(crate) fn scan(text: &str, rule: &CharacterRule) -> Vec<Token> {
    if rule.is_repeating() {
        scan_repeating(text, rule)
    } else {
        scan_bracketed(text, rule)
    }
}

fn scan_repeating(text: &str, rule: &CharacterRule) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let delimiter = rule.repeat_char();
    let delimiter_set = rule.delimiter_chars();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut cursor = Cursor::new(&chars);

    while let Some(ch) = cursor.current() {
        if Some(ch) == rule.escape_character {
            match cursor.peek_at(1) {
                Some(escaped) if delimiter_set.contains(&escaped) => {
                    flush_literal(&mut tokens, &mut literal);
                    tokens.push(Token::escape(escaped.to_string()));
                    cursor.advance(2);
                }
                _ => {
                    literal.push(ch);
                    cursor.advance(1);
                }
            }
            continue;
        }
        if ch == delimiter {
            let run_length = cursor.run_length(delimiter);
            let prev = cursor.peek_behind();
            let next = cursor.peek_at(run_length);
            let run: String = std::iter::repeat(delimiter).take(run_length).collect();
            let in_range =
                run_length >= rule.min_tag_repeat && run_length <= rule.max_tag_repeat;
            if in_range && spacing_allows(rule.spacing_constraint, prev, next) {
                flush_literal(&mut tokens, &mut literal);
                tokens.push(Token::repeating(run, run_length));
            } else {
                literal.push_str(&run);
            }
            cursor.advance(run_length);
            continue;
        }
        literal.push(ch);
        cursor.advance(1);
    }
    flush_literal(&mut tokens, &mut literal);
    tokens
}

fn scan_bracketed(text: &str, rule: &CharacterRule) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let open: Vec<char> = rule.open_tag.chars().collect();
    let close: Vec<char> = match &rule.closing_tag {
        Some(tag) => tag.chars().collect(),
        None => return scan_repeating(text, rule),
    };
    let intermediate: Option<Vec<char>> =
        rule.intermediate_tag.as_ref().map(|tag| tag.chars().collect());
    let delimiter_set = rule.delimiter_chars();

    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut cursor = Cursor::new(&chars);

    while let Some(ch) = cursor.current() {
        if Some(ch) == rule.escape_character {
            match cursor.peek_at(1) {
                Some(escaped) if delimiter_set.contains(&escaped) => {
                    flush_literal(&mut tokens, &mut literal);
                    tokens.push(Token::escape(escaped.to_string()));
                    cursor.advance(2);
                }
                _ => {
                    literal.push(ch);
                    cursor.advance(1);
                }
            }
            continue;
        }
        if cursor.starts_with(&open) {
            let span = match_span(&chars, cursor.pos, &open, intermediate.as_deref(), &close, rule);
            if let Some(span) = span {
                let prev = cursor.peek_behind();
                let next = chars.get(span.end).copied();
                if spacing_allows(rule.spacing_constraint, prev, next) {
                    flush_literal(&mut tokens, &mut literal);
                    span.emit(&chars, rule, &mut tokens);
                    cursor.advance(span.end - cursor.pos);
                    continue;
                }
            }
            // No complete span here: the open tag is literal text.
            literal.extend(open.iter());
            cursor.advance(open.len());
            continue;
        }
        literal.push(ch);
        cursor.advance(1);
    }
    flush_literal(&mut tokens, &mut literal);
    tokens
}

/// A complete open..close structure located in the character sequence.
struct Span {
    open_start: usize,
    content_start: usize,
    /// Position of the intermediate tag, when the rule defines one
    intermediate_at: Option<usize>,
    metadata_start: Option<usize>,
    close_at: usize,
    /// First position past the closing tag
    end: usize,
}

impl Span {
    fn emit(&self, chars: &[char], rule: &CharacterRule, tokens: &mut Vec<Token>) {
        use crate::token::TokenKind;

        let open_text: String = chars[self.open_start..self.content_start].iter().collect();
        tokens.push(Token::with_kind(TokenKind::OpenTag, open_text));

        let content_end = self.intermediate_at.unwrap_or(self.close_at);
        tokens.extend(escaped_text_tokens(&chars[self.content_start..content_end], rule));

        if let (Some(intermediate_at), Some(metadata_start)) =
            (self.intermediate_at, self.metadata_start)
        {
            let intermediate_text: String =
                chars[intermediate_at..metadata_start].iter().collect();
            tokens.push(Token::with_kind(TokenKind::IntermediateTag, intermediate_text));
            let metadata = unescape(&chars[metadata_start..self.close_at], rule);
            tokens.push(Token::with_kind(TokenKind::Metadata, metadata));
        }

        let close_text: String = chars[self.close_at..self.end].iter().collect();
        tokens.push(Token::with_kind(TokenKind::CloseTag, close_text));
    }
}

/// Locate a full open..[intermediate]..close structure starting at `from`.
///
/// Returns None when any required tag is missing before end-of-input, in which
/// case the caller degrades the open tag to literal text.
fn match_span(
    chars: &[char],
    from: usize,
    open: &[char],
    intermediate: Option<&[char]>,
    close: &[char],
    rule: &CharacterRule,
) -> Option<Span> {
    let content_start = from + open.len();
    let (intermediate_at, metadata_start, search_close_from) = match intermediate {
        Some(tag) => {
            let at = find_tag(chars, content_start, tag, rule)?;
            (Some(at), Some(at + tag.len()), at + tag.len())
        }
        None => (None, None, content_start),
    };
    let close_at = find_tag(chars, search_close_from, close, rule)?;
    Some(Span {
        open_start: from,
        content_start,
        intermediate_at,
        metadata_start,
        close_at,
        end: close_at + close.len(),
    })
}

/// Find the next unescaped occurrence of `tag` at or after `from`.
fn find_tag(chars: &[char], from: usize, tag: &[char], rule: &CharacterRule) -> Option<usize> {
    let delimiter_set = rule.delimiter_chars();
    let mut i = from;
    while i < chars.len() {
        if Some(chars[i]) == rule.escape_character
            && chars
                .get(i + 1)
                .is_some_and(|next| delimiter_set.contains(next))
        {
            i += 2;
            continue;
        }
        if chars[i..].starts_with(tag) {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Convert span content into Text/Escape tokens, honoring this rule's escapes.
fn escaped_text_tokens(chars: &[char], rule: &CharacterRule) -> Vec<Token> {
    let delimiter_set = rule.delimiter_chars();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut i = 0;
    while i < chars.len() {
        if Some(chars[i]) == rule.escape_character
            && chars
                .get(i + 1)
                .is_some_and(|next| delimiter_set.contains(next))
        {
            flush_literal(&mut tokens, &mut literal);
            tokens.push(Token::escape(chars[i + 1].to_string()));
            i += 2;
            continue;
        }
        literal.push(chars[i]);
        i += 1;
    }
    flush_literal(&mut tokens, &mut literal);
    tokens
}

/// Strip this rule's escape markers from a character range.
fn unescape(chars: &[char], rule: &CharacterRule) -> String {
    let delimiter_set = rule.delimiter_chars();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        if Some(chars[i]) == rule.escape_character
            && chars
                .get(i + 1)
                .is_some_and(|next| delimiter_set.contains(next))
        {
            out.push(chars[i + 1]);
            i += 2;
            continue;
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

fn flush_literal(tokens: &mut Vec<Token>, literal: &mut String) {
    if literal.is_empty() {
        return;
    }
    tokens.push(Token::text(std::mem::take(literal)));
}

/// Validate a delimiter's neighbors against the rule's spacing constraint.
///
/// `None` neighbors are string boundaries.
fn spacing_allows(
    constraint: SpacingConstraint,
    prev: Option<char>,
    next: Option<char>,
) -> bool {
    let prev_space = prev.is_some_and(char::is_whitespace);
    let next_space = next.is_some_and(char::is_whitespace);
    let prev_space_or_none = prev.map_or(true, char::is_whitespace);
    let next_space_or_none = next.map_or(true, char::is_whitespace);
    match constraint {
        SpacingConstraint::None => true,
        SpacingConstraint::OneSideForbidden => {
            !((prev_space_or_none && next_space) || (prev_space && next_space_or_none))
        }
        SpacingConstraint::BothSidesForbidden => !(prev_space || next_space),
        SpacingConstraint::LeadingForbidden => !prev_space,
        SpacingConstraint::TrailingForbidden => !next_space,
    }
}
