//! Literal scanner.
//!
//! A small explicit-state tokenizer that only cares about where quoted
//! literals start and end. It is not a parser for the host language: code
//! outside literals is skipped character by character, `#` comments are
//! skipped to the end of the line.
//!
//! ## States
//!
//! ```text
//! Normal ──#──▶ InComment ──eol──▶ Normal
//!   │
//!   ├──'/"──▶ InSingleQuote ──quote──▶ emit span, Normal
//!   │              └──eol──▶ discard, Normal (after the opening quote)
//!   │
//!   └──'''/"""──▶ InTripleQuote ──triple quote──▶ emit span, Normal
//!                      └──eof──▶ discard
//! ```

use crate::core::source::{SourceText, line_content};
use crate::utils::is_ident_char;

/// One quoted literal occurrence.
///
/// Lines are 0-based indexes into the [`SourceText`]; columns are byte
/// offsets within their line, `end_col` exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSpan {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
    /// Full matched text: prefix, delimiters and any line terminators in between.
    pub raw_text: String,
    /// Content between the delimiters. Escape sequences are kept as written;
    /// lines of a multi-line body are joined with `\n`.
    pub body: String,
    pub is_interpolated: bool,
    pub is_raw: bool,
}

impl LiteralSpan {
    pub fn is_multiline(&self) -> bool {
        self.end_line > self.start_line
    }
}

/// Where a literal opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Opening {
    line: usize,
    /// Start of the prefix (or of the quote when there is none).
    start_col: usize,
    quote_col: usize,
    quote: char,
    triple: bool,
    is_interpolated: bool,
    is_raw: bool,
}

impl Opening {
    fn delimiter_len(&self) -> usize {
        if self.triple { 3 } else { 1 }
    }

    fn body_col(&self) -> usize {
        self.quote_col + self.delimiter_len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InComment,
    InSingleQuote(Opening),
    InTripleQuote(Opening),
}

/// Lazily yields every closed literal of a [`SourceText`].
///
/// Each call to [`scan`] starts from scratch; nothing is shared between scans.
pub struct Scanner<'a> {
    source: &'a SourceText,
    line: usize,
    col: usize,
}

pub fn scan(source: &SourceText) -> Scanner<'_> {
    Scanner {
        source,
        line: 0,
        col: 0,
    }
}

impl Scanner<'_> {
    fn advance_line(&mut self) {
        self.line += 1;
        self.col = 0;
    }

    /// Normal state: find the next comment marker or literal opening on the
    /// current line, starting at `self.col`.
    fn next_transition(&self, text: &str) -> Option<State> {
        for (rel, c) in text[self.col..].char_indices() {
            let col = self.col + rel;
            match c {
                '#' => return Some(State::InComment),
                '\'' | '"' => {
                    let opening = self.opening_at(text, col, c);
                    return Some(if opening.triple {
                        State::InTripleQuote(opening)
                    } else {
                        State::InSingleQuote(opening)
                    });
                }
                _ => {}
            }
        }
        None
    }

    fn opening_at(&self, text: &str, quote_col: usize, quote: char) -> Opening {
        let triple_delim: String = std::iter::repeat_n(quote, 3).collect();
        let triple = text[quote_col..].starts_with(&triple_delim);
        let (start_col, prefix) = literal_prefix(text, self.col, quote_col);
        Opening {
            line: self.line,
            start_col,
            quote_col,
            quote,
            triple,
            is_interpolated: prefix.contains(['f', 'F']),
            is_raw: prefix.contains(['r', 'R']),
        }
    }

    fn finish(&self, opening: Opening, close_col: usize) -> LiteralSpan {
        let end_col = close_col + opening.delimiter_len();
        let lines = self.source.lines();

        let (raw_text, body) = if opening.line == self.line {
            let text = self.source.content(self.line);
            (
                text[opening.start_col..end_col].to_string(),
                text[opening.body_col()..close_col].to_string(),
            )
        } else {
            let mut raw = lines[opening.line][opening.start_col..].to_string();
            let mut body = vec![&self.source.content(opening.line)[opening.body_col()..]];
            for line in &lines[opening.line + 1..self.line] {
                raw.push_str(line);
                body.push(line_content(line));
            }
            let last = self.source.content(self.line);
            raw.push_str(&last[..end_col]);
            body.push(&last[..close_col]);
            (raw, body.join("\n"))
        };

        LiteralSpan {
            start_line: opening.line,
            start_col: opening.start_col,
            end_line: self.line,
            end_col,
            raw_text,
            body,
            is_interpolated: opening.is_interpolated,
            is_raw: opening.is_raw,
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = LiteralSpan;

    fn next(&mut self) -> Option<LiteralSpan> {
        let source = self.source;
        let mut state = State::Normal;
        while self.line < source.len() {
            let text = source.content(self.line);
            match state {
                State::Normal => match self.next_transition(text) {
                    Some(next) => {
                        if let State::InSingleQuote(o) | State::InTripleQuote(o) = next {
                            self.col = o.body_col();
                        }
                        state = next;
                    }
                    None => self.advance_line(),
                },
                State::InComment => {
                    self.advance_line();
                    state = State::Normal;
                }
                State::InSingleQuote(opening) => {
                    match find_closing(text, self.col, &opening.quote.to_string()) {
                        Some(close_col) => {
                            let span = self.finish(opening, close_col);
                            self.col = span.end_col;
                            return Some(span);
                        }
                        None => {
                            // Unclosed on its line: not a literal, resume right after the quote.
                            self.col = opening.quote_col + opening.quote.len_utf8();
                            state = State::Normal;
                        }
                    }
                }
                State::InTripleQuote(opening) => {
                    let delimiter: String = std::iter::repeat_n(opening.quote, 3).collect();
                    match find_closing(text, self.col, &delimiter) {
                        Some(close_col) => {
                            let span = self.finish(opening, close_col);
                            self.col = span.end_col;
                            return Some(span);
                        }
                        None => self.advance_line(),
                    }
                }
            }
        }
        // Anything still open at the end of the document is discarded.
        None
    }
}

/// Find an unescaped `delimiter` in `text` at or after `from`.
///
/// A backslash escapes the character that follows it.
fn find_closing(text: &str, from: usize, delimiter: &str) -> Option<usize> {
    let mut chars = text[from..].char_indices();
    while let Some((rel, c)) = chars.next() {
        if c == '\\' {
            chars.next();
            continue;
        }
        if text[from + rel..].starts_with(delimiter) {
            return Some(from + rel);
        }
    }
    None
}

/// Detect a one or two character `f`/`r` prefix right before the quote.
///
/// The prefix must not be the tail of a longer identifier (`elif"x"` has no
/// prefix) and cannot reach back before `floor`, the column scanning resumed at.
/// Returns the literal start column and the prefix text.
fn literal_prefix(text: &str, floor: usize, quote_col: usize) -> (usize, &str) {
    let head = &text[floor..quote_col];
    let prefix_len = head
        .chars()
        .rev()
        .take(2)
        .take_while(|c| matches!(c, 'f' | 'F' | 'r' | 'R'))
        .count();
    if prefix_len == 0 {
        return (quote_col, "");
    }

    let start = quote_col - prefix_len;
    let prefix = &text[start..quote_col];
    let lower = prefix.to_ascii_lowercase();
    let repeated = prefix_len == 2 && lower.as_bytes()[0] == lower.as_bytes()[1];
    let glued = text[floor..start].chars().next_back().is_some_and(is_ident_char);
    if repeated || glued {
        (quote_col, "")
    } else {
        (start, prefix)
    }
}
