//! Lexicon store: the persisted `namespace -> key -> text` table.
//!
//! The table is loaded once at the start of a run, only ever grows during the
//! run (existing keys are never overwritten) and is saved once at the end.
//!
//! ## Module Structure
//!
//! - `parser`: tolerant reader for the lexicon file
//! - `writer`: deterministic renderer

mod parser;
mod writer;

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

pub use parser::parse_lexicon;
pub use writer::{HEADER, escape, quote, render};

/// One migrated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub namespace: String,
    pub key: String,
    pub text: String,
}

impl LexiconEntry {
    /// `namespace.key`, the string passed to the lookup function.
    pub fn qualified_key(&self) -> String {
        format!("{}.{}", self.namespace, self.key)
    }
}

/// Result of merging one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    /// The key already existed; its text was left untouched.
    Kept,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexiconTable {
    namespaces: BTreeMap<String, BTreeMap<String, String>>,
}

impl LexiconTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespaces(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, String>)> {
        self.namespaces.iter()
    }

    pub fn namespace(&self, namespace: &str) -> Option<&BTreeMap<String, String>> {
        self.namespaces.get(namespace)
    }

    pub fn get(&self, namespace: &str, key: &str) -> Option<&str> {
        self.namespaces
            .get(namespace)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    /// Insert `text` under `key` unless the key is already present.
    pub fn merge(
        &mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> MergeOutcome {
        let entries = self.namespaces.entry(namespace.into()).or_default();
        match entries.entry(key.into()) {
            std::collections::btree_map::Entry::Occupied(_) => MergeOutcome::Kept,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(text.into());
                MergeOutcome::Inserted
            }
        }
    }

    pub fn merge_entry(&mut self, entry: &LexiconEntry) -> MergeOutcome {
        self.merge(&entry.namespace, &entry.key, &entry.text)
    }

    pub fn entry_count(&self) -> usize {
        self.namespaces.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// Used by the parser; later duplicates overwrite earlier ones, as the
    /// host language does for mapping literals.
    pub(crate) fn extend_namespace(
        &mut self,
        namespace: String,
        entries: BTreeMap<String, String>,
    ) {
        self.namespaces.entry(namespace).or_default().extend(entries);
    }
}

/// Outcome of [`LexiconStore::load`].
#[derive(Debug, Default)]
pub struct LexiconLoad {
    pub table: LexiconTable,
    /// Set when an existing file could not be read or parsed and was ignored.
    pub warning: Option<String>,
}

/// The lexicon file on disk.
#[derive(Debug, Clone)]
pub struct LexiconStore {
    path: PathBuf,
    var_name: String,
}

impl LexiconStore {
    pub fn new(path: impl Into<PathBuf>, var_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            var_name: var_name.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the table. Never fails: a missing file is an empty table, and an
    /// unreadable or malformed one is an empty table plus a warning.
    pub fn load(&self) -> LexiconLoad {
        if !self.path.exists() {
            return LexiconLoad::default();
        }

        let parsed = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read lexicon: {}", self.path.display()))
            .and_then(|content| {
                parse_lexicon(&content, &self.var_name).with_context(|| {
                    format!("Failed to parse lexicon: {}", self.path.display())
                })
            });

        match parsed {
            Ok(table) => LexiconLoad {
                table,
                warning: None,
            },
            Err(err) => LexiconLoad {
                table: LexiconTable::new(),
                warning: Some(format!("{:#}", err)),
            },
        }
    }

    /// Write the table, creating missing parent directories.
    pub fn save(&self, table: &LexiconTable) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&self.path, render(table, &self.var_name))
            .with_context(|| format!("Failed to write lexicon: {}", self.path.display()))
    }
}
