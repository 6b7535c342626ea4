//! Source text model.
//!
//! A [`SourceText`] is the file under migration split into lines, each line
//! keeping its own terminator so the file can be reproduced byte-for-byte.

use std::{fs, path::Path};

use anyhow::{Context, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceText {
    lines: Vec<String>,
}

impl SourceText {
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.split_inclusive('\n').map(String::from).collect(),
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file: {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_text())
            .with_context(|| format!("Failed to write source file: {}", path.display()))
    }

    /// All lines, terminators included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line content without its terminator, or `""` past the end.
    pub fn content(&self, line: usize) -> &str {
        self.lines
            .get(line)
            .map(|l| line_content(l))
            .unwrap_or_default()
    }

    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}

/// Strip the trailing `\n` or `\r\n` of a line.
pub fn line_content(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// The terminator of a line (`"\r\n"`, `"\n"` or `""`).
pub fn line_terminator(line: &str) -> &str {
    &line[line_content(line).len()..]
}

/// Human-facing position: 1-based line, 1-based character column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }

    /// Build a location from a 0-based line index and a byte offset in that line.
    pub fn from_offset(
        file_path: impl Into<String>,
        source: &SourceText,
        line: usize,
        byte_col: usize,
    ) -> Self {
        let content = source.content(line);
        let col = content
            .get(..byte_col)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(byte_col);
        Self::new(file_path, line + 1, col + 1)
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file_path, self.line, self.col)
    }
}
