//! Report formatting and printing utilities.
//!
//! Migrated literals are shown in cargo-style format in verbose mode; every
//! run ends with a single summary line.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::MigrateSummary;
use crate::core::{
    classify::Eligibility,
    pipeline::{MigratedLiteral, MigrationPlan},
    rewrite::Replacement,
    source::{SourceLocation, SourceText},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a `warning:` line to stderr.
pub fn print_warning(message: &str) {
    print_warning_to(message, &mut io::stderr().lock());
}

pub fn print_warning_to<W: Write>(message: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), message);
}

/// Print every literal of `plan` with its location, key and expression.
pub fn print_literals(file_path: &str, source: &SourceText, plan: &MigrationPlan) {
    print_literals_to(file_path, source, plan, &mut io::stdout().lock());
}

pub fn print_literals_to<W: Write>(
    file_path: &str,
    source: &SourceText,
    plan: &MigrationPlan,
    writer: &mut W,
) {
    let max_line_width = plan
        .literals
        .iter()
        .map(|literal| literal.span.start_line + 1)
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1);

    for literal in &plan.literals {
        print_literal(file_path, source, literal, writer, max_line_width);
    }

    for span in &plan.ineligible {
        let loc = SourceLocation::from_offset(file_path, source, span.start_line, span.start_col);
        let _ = writeln!(
            writer,
            "{} {}  {}",
            "skipped:".dimmed(),
            loc,
            "(not an assignment or message call)".dimmed()
        );
    }
    if !plan.ineligible.is_empty() {
        let _ = writeln!(writer);
    }
}

fn print_literal<W: Write>(
    file_path: &str,
    source: &SourceText,
    literal: &MigratedLiteral,
    writer: &mut W,
    max_line_width: usize,
) {
    let span = &literal.span;
    let loc = SourceLocation::from_offset(file_path, source, span.start_line, span.start_col);
    let source_line = source.content(span.start_line);

    let _ = writeln!(
        writer,
        "  {} {}  {}",
        "-->".blue(),
        loc,
        format!("[{}]", eligibility_label(&literal.eligibility))
            .dimmed()
            .cyan()
    );
    let _ = writeln!(writer, " {:>width$} {}", "", "|".blue(), width = max_line_width);
    let _ = writeln!(
        writer,
        " {:>width$} {} {}",
        loc.line.to_string().blue(),
        "|".blue(),
        source_line,
        width = max_line_width
    );

    let prefix: String = source_line.chars().take(loc.col.saturating_sub(1)).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        " {:>width$} {} {:>padding$}{} {}",
        "",
        "|".blue(),
        "",
        "^".green(),
        literal.entry.qualified_key().green(),
        width = max_line_width,
        padding = caret_padding
    );

    let _ = writeln!(
        writer,
        " {:>width$} {} {}",
        "",
        "=".blue(),
        literal.replacement.expression,
        width = max_line_width
    );
    if literal.needs_manual_fix {
        let _ = writeln!(
            writer,
            " {:>width$} {} {}",
            "",
            "=".blue(),
            "note: placeholders need a manual fix".yellow(),
            width = max_line_width
        );
    }
    let _ = writeln!(writer);
}

fn eligibility_label(eligibility: &Eligibility) -> String {
    match eligibility {
        Eligibility::Assignment => "assignment".to_string(),
        Eligibility::AssignedCall => "assigned call".to_string(),
        Eligibility::MessageCall(name) => format!("{}()", name),
        Eligibility::Ineligible => "ineligible".to_string(),
    }
}

/// Warn about replacements whose text was not found during the rewrite.
pub fn print_skipped(file_path: &str, source: &SourceText, skipped: &[Replacement]) {
    print_skipped_to(file_path, source, skipped, &mut io::stderr().lock());
}

pub fn print_skipped_to<W: Write>(
    file_path: &str,
    source: &SourceText,
    skipped: &[Replacement],
    writer: &mut W,
) {
    for replacement in skipped {
        let loc = SourceLocation::from_offset(
            file_path,
            source,
            replacement.start_line,
            replacement.start_col,
        );
        print_warning_to(
            &format!(
                "{}: literal \"{}\" not found during rewrite, left unchanged",
                loc, replacement.original_body
            ),
            writer,
        );
    }
}

/// Print the summary of a migrate run.
pub fn print_summary(summary: &MigrateSummary) {
    print_summary_to(summary, &mut io::stdout().lock());
}

pub fn print_summary_to<W: Write>(summary: &MigrateSummary, writer: &mut W) {
    if !summary.is_apply {
        if summary.migrated == 0 {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Nothing to migrate in {}", summary.file_path).green()
            );
            return;
        }
        let _ = writeln!(
            writer,
            "{} {} literal(s) in {} (namespace {})",
            "Would migrate".yellow().bold(),
            summary.migrated,
            summary.file_path,
            summary.namespace
        );
        let _ = writeln!(writer, "Run without {} to apply.", "--dry-run".cyan());
        print_manual_fix_note(summary, writer);
        return;
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Migrated {} literal(s) in {} (namespace {})",
            summary.migrated, summary.file_path, summary.namespace
        )
        .green()
    );
    if summary.migrated > 0 {
        let _ = writeln!(
            writer,
            "  - lexicon: {} new entr{} in {}",
            summary.new_entries,
            if summary.new_entries == 1 { "y" } else { "ies" },
            summary.lexicon_path
        );
    }
    if let Some(backup) = &summary.backup_path {
        let _ = writeln!(writer, "  - backup: {}", backup);
    }
    if summary.skipped > 0 {
        let _ = writeln!(
            writer,
            "{} {} literal(s) could not be rewritten",
            FAILURE_MARK.red(),
            summary.skipped
        );
    }
    print_manual_fix_note(summary, writer);
}

fn print_manual_fix_note<W: Write>(summary: &MigrateSummary, writer: &mut W) {
    if summary.manual_fixes > 0 {
        let _ = writeln!(
            writer,
            "Note: {} replacement(s) need a manual fix (search for {}).",
            summary.manual_fixes,
            "NEED MANUAL FIX".cyan()
        );
    }
}
