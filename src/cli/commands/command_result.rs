/// Outcome of a `migrate` run, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateSummary {
    pub file_path: String,
    pub namespace: String,
    /// Literals rewritten, or that would be rewritten in a dry run.
    pub migrated: usize,
    /// Entries added to the lexicon (existing ones are never overwritten).
    pub new_entries: usize,
    /// Replacements carrying the manual-fix sentinel.
    pub manual_fixes: usize,
    /// Replacements dropped because their text was not found.
    pub skipped: usize,
    pub is_apply: bool,
    pub backup_path: Option<String>,
    pub lexicon_path: String,
}
