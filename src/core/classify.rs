//! Context classifier.
//!
//! Decides whether a literal sits somewhere that makes it user-facing text.
//! The heuristic prefers skipping a literal over migrating something that is
//! a dictionary key, a comparison operand or a log format id.
//!
//! A literal is eligible when:
//! - an assignment `=` precedes it on its line, or
//! - the nearest enclosing `(` is immediately preceded by an assignment or by
//!   a callable from the configured message-function allow-list.
//!
//! Only one line of lookback is done for calls split across lines, so
//!
//! ```text
//! await message.answer(
//!     "Текст",
//! )
//! ```
//!
//! is eligible but a deeper call chain is not.

use std::collections::HashSet;

use crate::core::{scanner::LiteralSpan, source::SourceText};
use crate::utils::is_ident_char;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// `x = "..."` or `name="..."`.
    Assignment,
    /// `x = build("...")`.
    AssignedCall,
    /// `message.answer("...")`.
    MessageCall(String),
    Ineligible,
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        !matches!(self, Eligibility::Ineligible)
    }
}

pub struct ContextClassifier {
    message_functions: HashSet<String>,
}

impl ContextClassifier {
    pub fn new<I, S>(message_functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            message_functions: message_functions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classify(&self, source: &SourceText, span: &LiteralSpan) -> Eligibility {
        let line = source.content(span.start_line);
        let before = &line[..span.start_col];

        if has_assignment(before) {
            return Eligibility::Assignment;
        }

        let paren = match find_open_paren(before) {
            Some(col) => Some(&line[..col]),
            None if before.trim().is_empty() && span.start_line > 0 => {
                let prev = source.content(span.start_line - 1).trim_end();
                prev.strip_suffix('(')
            }
            None => None,
        };

        match paren {
            Some(head) => self.classify_call_head(head),
            None => Eligibility::Ineligible,
        }
    }

    /// Look at what precedes a `(`: a callable name, possibly qualified and
    /// possibly behind an assignment.
    fn classify_call_head(&self, head: &str) -> Eligibility {
        let head = head.trim_end();
        if head.is_empty() {
            return Eligibility::Ineligible;
        }

        let name_start = head
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_ident_char(*c))
            .last()
            .map(|(i, _)| i)
            .unwrap_or(head.len());
        let name = &head[name_start..];
        if !name.is_empty() && self.message_functions.contains(name) {
            return Eligibility::MessageCall(name.to_string());
        }

        let callee_start = head
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_ident_char(*c) || c.is_whitespace() || *c == '.')
            .last()
            .map(|(i, _)| i)
            .unwrap_or(head.len());
        let rest = head[..callee_start].trim_end();
        if rest.ends_with('=') && has_assignment(rest) {
            return Eligibility::AssignedCall;
        }

        Eligibility::Ineligible
    }
}

/// The last `=` in `text` is an assignment, not part of `==`, `!=`, `<=` or `>=`.
fn has_assignment(text: &str) -> bool {
    let Some(pos) = text.rfind('=') else {
        return false;
    };
    pos == 0 || !matches!(text.as_bytes()[pos - 1], b'=' | b'!' | b'<' | b'>')
}

/// Byte offset of the nearest unmatched `(` in `text`, scanning right to left.
fn find_open_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' if depth == 0 => return Some(i),
            '(' => depth -= 1,
            _ => {}
        }
    }
    None
}
