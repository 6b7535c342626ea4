//! Reader for lexicon files.
//!
//! Accepts the shape the writer produces and what a human editing it is
//! likely to add: either quote style, `#` comments, trailing commas and
//! free whitespace. String contents are kept exactly as written between the
//! quotes (escape sequences included) so that load → save is stable.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use regex::Regex;

use super::LexiconTable;

/// Parse the `<var_name> = { namespace: { key: text } }` assignment in `content`.
pub fn parse_lexicon(content: &str, var_name: &str) -> Result<LexiconTable> {
    let pattern = format!(
        r"(?m)^[ \t]*{}[ \t]*(?::[^=\n]*)?=[ \t]*",
        regex::escape(var_name)
    );
    let assignment = Regex::new(&pattern)?;
    let Some(found) = assignment.find(content) else {
        bail!("no `{}` assignment found", var_name);
    };

    let mut cursor = Cursor {
        text: content,
        pos: found.end(),
    };
    let mut table = LexiconTable::new();
    cursor.parse_mapping(|cursor, namespace| {
        let entries = cursor.parse_namespace()?;
        table.extend_namespace(namespace, entries);
        Ok(())
    })?;
    Ok(table)
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn line(&self) -> usize {
        self.text[..self.pos].matches('\n').count() + 1
    }

    /// Skip whitespace and `#` comments.
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        self.skip_trivia();
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => bail!("expected `{}`, found `{}` on line {}", expected, c, self.line()),
            None => bail!("expected `{}`, found end of file", expected),
        }
    }

    /// `{ "key": <value>, ... }`, calling `on_entry` with the cursor
    /// positioned after each key's colon.
    fn parse_mapping<F>(&mut self, mut on_entry: F) -> Result<()>
    where
        F: FnMut(&mut Self, String) -> Result<()>,
    {
        self.expect('{')?;
        loop {
            self.skip_trivia();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(());
            }
            let key = self.parse_string()?;
            self.expect(':')?;
            on_entry(self, key)?;

            self.skip_trivia();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {}
                Some(c) => bail!("expected `,` or `}}`, found `{}` on line {}", c, self.line()),
                None => bail!("unexpected end of file inside mapping"),
            }
        }
    }

    fn parse_namespace(&mut self) -> Result<BTreeMap<String, String>> {
        let mut entries = BTreeMap::new();
        self.parse_mapping(|cursor, key| {
            let text = cursor.parse_string()?;
            entries.insert(key, text);
            Ok(())
        })?;
        Ok(entries)
    }

    /// A single-line quoted string; returns the raw text between the quotes.
    fn parse_string(&mut self) -> Result<String> {
        self.skip_trivia();
        let line = self.line();
        let quote = match self.bump() {
            Some(c @ ('"' | '\'')) => c,
            Some(c) => bail!("expected a string, found `{}` on line {}", c, line),
            None => bail!("expected a string, found end of file"),
        };

        let start = self.pos;
        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    if self.bump().is_none() {
                        break;
                    }
                }
                '\n' => bail!("unterminated string on line {}", line),
                c if c == quote => return Ok(self.text[start..self.pos - 1].to_string()),
                _ => {}
            }
        }
        bail!("unterminated string on line {}", line)
    }
}
