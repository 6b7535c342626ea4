//! Migration planning: scan → classify → placeholders and keys → lexicon
//! merge → replacement list.
//!
//! Planning never touches the filesystem. The resulting [`MigrationPlan`]
//! can be printed (dry run) or handed to [`crate::core::rewrite::apply`].

use crate::core::{
    classify::{ContextClassifier, Eligibility},
    keys::{KeyRegistry, KeySynthesizer, Transliterator},
    lexicon::{LexiconEntry, LexiconTable, MergeOutcome, escape},
    placeholder::{self, Placeholders},
    rewrite::Replacement,
    scanner::{LiteralSpan, scan},
    source::SourceText,
};
use crate::utils::contains_cyrillic;

/// Format arguments emitted when placeholders cannot be wired automatically.
pub const MANUAL_FIX_SENTINEL: &str = "/*** NEED MANUAL FIX ***/";

#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub namespace: String,
    /// 1-based; literals starting on earlier lines are left alone.
    pub start_line: usize,
    pub lookup_function: String,
    pub locale_variable: String,
}

/// One literal selected for migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratedLiteral {
    pub span: LiteralSpan,
    pub eligibility: Eligibility,
    pub entry: LexiconEntry,
    pub merge: MergeOutcome,
    pub replacement: Replacement,
    /// Placeholders could not be wired into `.format(...)`.
    pub needs_manual_fix: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationPlan {
    pub namespace: String,
    pub literals: Vec<MigratedLiteral>,
    /// Target-script literals left alone because of their context.
    pub ineligible: Vec<LiteralSpan>,
}

impl MigrationPlan {
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn replacements(&self) -> Vec<Replacement> {
        self.literals
            .iter()
            .map(|literal| literal.replacement.clone())
            .collect()
    }

    pub fn inserted_entries(&self) -> usize {
        self.literals
            .iter()
            .filter(|literal| literal.merge == MergeOutcome::Inserted)
            .count()
    }

    pub fn manual_fixes(&self) -> usize {
        self.literals.iter().filter(|l| l.needs_manual_fix).count()
    }
}

/// Key synthesizer for `namespace`, seeded with the entries `table` already holds.
pub fn synthesizer_for(
    table: &LexiconTable,
    namespace: &str,
    transliterator: Transliterator,
) -> KeySynthesizer {
    let registry = KeyRegistry::seeded(table.namespace(namespace).into_iter().flatten());
    KeySynthesizer::new(transliterator, registry)
}

/// Plan the migration of `source`, merging new entries into `table`.
pub fn plan(
    source: &SourceText,
    options: &PlanOptions,
    classifier: &ContextClassifier,
    keys: &mut KeySynthesizer,
    table: &mut LexiconTable,
) -> MigrationPlan {
    let first_line = options.start_line.saturating_sub(1);
    let mut plan = MigrationPlan {
        namespace: options.namespace.clone(),
        ..MigrationPlan::default()
    };

    for span in scan(source) {
        if span.start_line < first_line || !contains_cyrillic(&span.body) {
            continue;
        }

        let eligibility = classifier.classify(source, &span);
        if !eligibility.is_eligible() {
            plan.ineligible.push(span);
            continue;
        }

        let text = lexicon_text(&span);
        let key = keys.key_for(&text);
        let entry = LexiconEntry {
            namespace: options.namespace.clone(),
            key,
            text,
        };
        let merge = table.merge_entry(&entry);

        let placeholders = span
            .is_interpolated
            .then(|| placeholder::extract(&span.body));
        let needs_manual_fix = placeholders.as_ref().is_some_and(|p| !p.is_simple);
        let expression = lookup_expression(
            &options.lookup_function,
            &entry.qualified_key(),
            &options.locale_variable,
            placeholders.as_ref(),
        );

        let replacement = Replacement {
            start_line: span.start_line,
            start_col: span.start_col,
            end_line: span.end_line,
            matched_text: span.raw_text.clone(),
            expression,
            original_body: span.body.clone(),
            is_interpolated: span.is_interpolated,
        };

        plan.literals.push(MigratedLiteral {
            span,
            eligibility,
            entry,
            merge,
            replacement,
            needs_manual_fix,
        });
    }

    plan
}

/// Body of `span` as it is stored in the lexicon: escaped for a plain
/// double-quoted literal, with the backslashes of a raw literal doubled so
/// the stored text evaluates to the same string.
fn lexicon_text(span: &LiteralSpan) -> String {
    if span.is_raw {
        escape(&span.body.replace('\\', "\\\\"))
    } else {
        escape(&span.body)
    }
}

/// `lookup("ns.key", lang)`, plus a `.format(...)` call for interpolated text.
///
/// An interpolated text with `{{`/`}}` but no fields still gets an empty
/// `.format()`, which turns the doubled braces back into single ones.
///
/// ```
/// use lexmig::core::pipeline::lookup_expression;
/// use lexmig::core::placeholder::extract;
///
/// let placeholders = extract("Привет, {name}!");
/// assert_eq!(
///     lookup_expression("lookup", "greet.privet_name_value", "lang", Some(&placeholders)),
///     r#"lookup("greet.privet_name_value", lang).format(name=name)"#,
/// );
/// ```
pub fn lookup_expression(
    lookup_function: &str,
    qualified_key: &str,
    locale_variable: &str,
    placeholders: Option<&Placeholders>,
) -> String {
    let call = format!(
        "{}(\"{}\", {})",
        lookup_function, qualified_key, locale_variable
    );
    match placeholders {
        Some(p) if !p.is_simple => format!("{}.format({})", call, MANUAL_FIX_SENTINEL),
        Some(p) if !p.names.is_empty() || p.has_escaped_braces => {
            let args: Vec<String> = p.names.iter().map(|n| format!("{n}={n}")).collect();
            format!("{}.format({})", call, args.join(", "))
        }
        _ => call,
    }
}
