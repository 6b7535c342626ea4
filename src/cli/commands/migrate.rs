//! Migrate command - Move Cyrillic string literals of one file into the lexicon.
//!
//! Unless `--dry-run` is given, the input is backed up before anything else
//! happens, even when there turns out to be nothing to migrate. Everything
//! is then computed in memory; the lexicon is saved once and the input is
//! rewritten once.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use super::super::{
    args::MigrateCommand,
    exit_status::ExitStatus,
    report::{self, print_warning},
};
use super::MigrateSummary;
use crate::{
    config::{CONFIG_FILE_NAME, Config, is_valid_namespace, load_config},
    core::{
        classify::ContextClassifier,
        lexicon::LexiconStore,
        pipeline::{PlanOptions, plan, synthesizer_for},
        rewrite::{self, apply},
        source::SourceText,
    },
};

pub fn migrate(cmd: MigrateCommand, verbose: bool) -> Result<ExitStatus> {
    let args = &cmd.args;
    let input = &args.input;
    if !input.is_file() {
        bail!("Input file not found: {}", input.display());
    }

    let config_result = load_config(Path::new("."))?;
    if verbose && !config_result.from_file {
        eprintln!(
            "Note: No {} found, using default configuration",
            CONFIG_FILE_NAME
        );
    }
    let config = config_result.config;

    let namespace = resolve_namespace(&config, input, args.namespace.as_deref())?;
    let lexicon_path = args
        .common
        .lexicon
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.lexicon_path));
    let file_path = input.display().to_string();

    let source = SourceText::read(input)?;
    let backup_path = if args.dry_run {
        None
    } else {
        Some(rewrite::backup(input)?)
    };
    let store = LexiconStore::new(&lexicon_path, &config.lexicon_name);
    let loaded = store.load();
    if let Some(warning) = &loaded.warning {
        print_warning(&format!("{}; existing entries are ignored", warning));
    }
    let mut table = loaded.table;

    let options = PlanOptions {
        namespace: namespace.clone(),
        start_line: args.start_line,
        lookup_function: config.lookup_function.clone(),
        locale_variable: config.locale_variable.clone(),
    };
    let classifier = ContextClassifier::new(config.message_functions.iter().cloned());
    let mut keys = synthesizer_for(&table, &namespace, config.transliterator());
    let plan = plan(&source, &options, &classifier, &mut keys, &mut table);

    if verbose {
        report::print_literals(&file_path, &source, &plan);
    }

    let mut summary = MigrateSummary {
        file_path: file_path.clone(),
        namespace,
        migrated: plan.len(),
        new_entries: plan.inserted_entries(),
        manual_fixes: plan.manual_fixes(),
        skipped: 0,
        is_apply: !args.dry_run,
        backup_path: backup_path.map(|path| path.display().to_string()),
        lexicon_path: lexicon_path.display().to_string(),
    };

    if args.dry_run {
        report::print_summary(&summary);
        return Ok(if plan.is_empty() {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        });
    }

    if !plan.is_empty() {
        let outcome = apply(&source, &plan.replacements());
        report::print_skipped(&file_path, &source, &outcome.skipped);

        store.save(&table)?;
        outcome.text.write(input)?;

        summary.migrated = outcome.applied;
        summary.skipped = outcome.skipped.len();
    }

    report::print_summary(&summary);
    Ok(ExitStatus::Success)
}

/// `--namespace` when given, otherwise derived from the input file name.
fn resolve_namespace(config: &Config, input: &Path, explicit: Option<&str>) -> Result<String> {
    match explicit {
        Some(namespace) if !is_valid_namespace(namespace) => bail!(
            "Invalid namespace \"{}\" (use letters, digits and '_')",
            namespace
        ),
        Some(namespace) => Ok(namespace.to_string()),
        None => Ok(config.namespace_for(input)),
    }
}
