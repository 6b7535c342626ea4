//! Rewrite engine.
//!
//! Replacements are collected for the whole file and applied in one batch to
//! a copy of the original lines, last one first, so the line indexes of the
//! remaining replacements stay valid. The file is written once afterwards.
//!
//! Every rewritten block keeps its original lines as comments right above
//! the new line:
//!
//! ```text
//! # text = "Привет"
//! text = lookup("greet.privet", lang)
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::core::source::{SourceText, line_content, line_terminator};
use crate::utils::is_ident_char;

/// One accepted literal and what replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// 0-based line where the literal starts.
    pub start_line: usize,
    /// Byte offset of the literal (prefix included) in its start line.
    pub start_col: usize,
    /// 0-based line where the literal ends.
    pub end_line: usize,
    /// Exact literal text, prefix and delimiters included.
    pub matched_text: String,
    pub expression: String,
    /// Body of the literal, named in diagnostics.
    pub original_body: String,
    pub is_interpolated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub text: SourceText,
    pub applied: usize,
    /// Replacements whose text was not found where expected.
    pub skipped: Vec<Replacement>,
}

/// Replacements whose line ranges overlap; rewritten together.
struct Block<'a> {
    start: usize,
    end: usize,
    items: Vec<&'a Replacement>,
}

/// Apply all `replacements` to `source`, producing new text.
///
/// `source` itself is not modified.
pub fn apply(source: &SourceText, replacements: &[Replacement]) -> RewriteOutcome {
    let mut sorted: Vec<&Replacement> = replacements.iter().collect();
    sorted.sort_by_key(|r| (r.start_line, r.start_col));

    let mut blocks: Vec<Block> = Vec::new();
    for replacement in sorted {
        match blocks.last_mut() {
            Some(block) if replacement.start_line <= block.end => {
                block.end = block.end.max(replacement.end_line);
                block.items.push(replacement);
            }
            _ => blocks.push(Block {
                start: replacement.start_line,
                end: replacement.end_line,
                items: vec![replacement],
            }),
        }
    }

    let original = source.lines();
    let default_terminator = original
        .iter()
        .map(|l| line_terminator(l))
        .find(|t| !t.is_empty())
        .unwrap_or("\n");
    let mut lines = original.to_vec();
    let mut applied = 0;
    let mut skipped = Vec::new();

    for block in blocks.iter().rev() {
        if block.end >= original.len() {
            skipped.extend(block.items.iter().map(|r| (*r).clone()));
            continue;
        }

        let block_lines = &original[block.start..=block.end];
        let rewritten = rewrite_block(block_lines, block);
        skipped.extend(rewritten.skipped.into_iter().cloned());
        if rewritten.applied == 0 {
            continue;
        }

        applied += rewritten.applied;
        let mut replacement_lines = commented_trailer(block_lines, default_terminator);
        replacement_lines.push(rewritten.text);
        lines.splice(block.start..=block.end, replacement_lines);
    }

    skipped.sort_by_key(|r| (r.start_line, r.start_col));
    RewriteOutcome {
        text: SourceText::from_lines(lines),
        applied,
        skipped,
    }
}

struct RewrittenBlock<'a> {
    text: String,
    applied: usize,
    skipped: Vec<&'a Replacement>,
}

fn rewrite_block<'a>(block_lines: &[String], block: &Block<'a>) -> RewrittenBlock<'a> {
    let mut line_starts = Vec::with_capacity(block_lines.len());
    let mut offset = 0;
    for line in block_lines {
        line_starts.push(offset);
        offset += line.len();
    }

    let mut text = block_lines.concat();
    // Everything from `limit` on has already been rewritten.
    let mut limit = text.len();
    let mut applied = 0;
    let mut skipped = Vec::new();

    for replacement in block.items.iter().rev() {
        let expected = line_starts[replacement.start_line - block.start] + replacement.start_col;
        let matched = replacement.matched_text.as_str();
        let at_expected = expected + matched.len() <= limit
            && text.get(expected..).is_some_and(|rest| rest.starts_with(matched));
        let position = if at_expected {
            Some(expected)
        } else {
            text[..limit].find(matched)
        };

        let Some(position) = position else {
            skipped.push(*replacement);
            continue;
        };

        let mut prefix = &text[..position];
        if replacement.is_interpolated {
            prefix = strip_interpolation_prefix(prefix);
        }
        let suffix = &text[position + matched.len()..];
        let new_text = format!("{}{}{}", prefix, replacement.expression, suffix);

        limit = prefix.len();
        text = new_text;
        applied += 1;
    }

    RewrittenBlock {
        text,
        applied,
        skipped,
    }
}

/// Drop an `f`/`F` left right before the literal; the lookup expression is
/// not an interpolated literal.
fn strip_interpolation_prefix(prefix: &str) -> &str {
    match prefix.strip_suffix(['f', 'F']) {
        Some(rest) if !rest.chars().next_back().is_some_and(is_ident_char) => rest,
        _ => prefix,
    }
}

/// The original lines as comments, indentation kept.
///
/// Blank lines and lines that already are comments are kept as they are.
fn commented_trailer(block_lines: &[String], fallback_terminator: &str) -> Vec<String> {
    block_lines
        .iter()
        .map(|line| {
            let content = line_content(line).trim_end();
            let terminator = match line_terminator(line) {
                "" => fallback_terminator,
                t => t,
            };
            let body = content.trim_start();
            if body.is_empty() || body.starts_with('#') {
                format!("{}{}", content, terminator)
            } else {
                let indent = &content[..content.len() - body.len()];
                format!("{}# {}{}", indent, body, terminator)
            }
        })
        .collect()
}

/// `<input>.bak`, next to the input.
pub fn backup_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

/// Copy `input` byte-for-byte to its backup path.
pub fn backup(input: &Path) -> Result<PathBuf> {
    let path = backup_path(input);
    fs::copy(input, &path).with_context(|| {
        format!(
            "Failed to back up {} to {}",
            input.display(),
            path.display()
        )
    })?;
    Ok(path)
}
