use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::keys::{DEFAULT_MAX_KEY_LENGTH, Transliterator};
use crate::utils::is_bare_identifier;

pub const CONFIG_FILE_NAME: &str = ".lexmigrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_message_functions")]
    pub message_functions: Vec<String>,
    #[serde(default = "default_lookup_function")]
    pub lookup_function: String,
    #[serde(default = "default_locale_variable")]
    pub locale_variable: String,
    #[serde(default = "default_lexicon_path")]
    pub lexicon_path: String,
    #[serde(default = "default_lexicon_name")]
    pub lexicon_name: String,
    #[serde(default = "default_namespace_suffixes")]
    pub namespace_suffixes: Vec<String>,
    #[serde(default = "default_namespace")]
    pub default_namespace: String,
    #[serde(default = "default_word_overrides")]
    pub word_overrides: BTreeMap<String, String>,
    #[serde(default = "default_max_key_length")]
    pub max_key_length: usize,
}

fn default_message_functions() -> Vec<String> {
    [
        "answer",
        "send_message",
        "reply",
        "edit_text",
        "send_photo",
        "send_document",
        "send_animation",
    ]
    .map(String::from)
    .to_vec()
}

fn default_lookup_function() -> String {
    "lookup".to_string()
}

fn default_locale_variable() -> String {
    "lang".to_string()
}

fn default_lexicon_path() -> String {
    "LEXICON_RU.auto.py".to_string()
}

fn default_lexicon_name() -> String {
    "LEXICON_RU".to_string()
}

fn default_namespace_suffixes() -> Vec<String> {
    ["_handlers.py", ".py"].map(String::from).to_vec()
}

fn default_namespace() -> String {
    "global".to_string()
}

fn default_word_overrides() -> BTreeMap<String, String> {
    [
        ("да", "yes"),
        ("нет", "no"),
        ("пока", "goodbye"),
        ("сообщение", "message"),
        ("голосование", "voting"),
        ("название", "title"),
        ("описание", "description"),
        ("подтвердить", "confirm"),
        ("отмена", "cancel"),
    ]
    .into_iter()
    .map(|(word, key)| (word.to_string(), key.to_string()))
    .collect()
}

fn default_max_key_length() -> usize {
    DEFAULT_MAX_KEY_LENGTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            message_functions: default_message_functions(),
            lookup_function: default_lookup_function(),
            locale_variable: default_locale_variable(),
            lexicon_path: default_lexicon_path(),
            lexicon_name: default_lexicon_name(),
            namespace_suffixes: default_namespace_suffixes(),
            default_namespace: default_namespace(),
            word_overrides: default_word_overrides(),
            max_key_length: default_max_key_length(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Names that end up in generated code must be identifiers (dotted paths
    /// are allowed for the lookup function and locale variable).
    pub fn validate(&self) -> Result<()> {
        for name in &self.message_functions {
            if !is_bare_identifier(name) {
                bail!("Invalid name in 'messageFunctions': \"{}\"", name);
            }
        }

        if !is_dotted_identifier(&self.lookup_function) {
            bail!(
                "Invalid 'lookupFunction': \"{}\" is not an identifier",
                self.lookup_function
            );
        }
        if !is_dotted_identifier(&self.locale_variable) {
            bail!(
                "Invalid 'localeVariable': \"{}\" is not an identifier",
                self.locale_variable
            );
        }
        if !is_bare_identifier(&self.lexicon_name) {
            bail!(
                "Invalid 'lexiconName': \"{}\" is not an identifier",
                self.lexicon_name
            );
        }
        if self.lexicon_path.trim().is_empty() {
            bail!("'lexiconPath' must not be empty");
        }
        if !is_valid_namespace(&self.default_namespace) {
            bail!(
                "Invalid 'defaultNamespace': \"{}\" (use letters, digits and '_')",
                self.default_namespace
            );
        }
        if self.namespace_suffixes.iter().any(String::is_empty) {
            bail!("'namespaceSuffixes' must not contain empty entries");
        }
        if self.max_key_length == 0 {
            bail!("'maxKeyLength' must be at least 1");
        }
        for (word, key) in &self.word_overrides {
            if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                bail!(
                    "Invalid 'wordOverrides' value for \"{}\": \"{}\" (use letters, digits and '_')",
                    word,
                    key
                );
            }
        }

        Ok(())
    }

    /// Namespace for an input file: its file name with the first matching
    /// suffix stripped, reduced to `[A-Za-z0-9_]`.
    ///
    /// Falls back to `defaultNamespace` when no suffix matches or nothing
    /// usable is left.
    pub fn namespace_for(&self, input: &Path) -> String {
        let file_name = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Some(stem) = self
            .namespace_suffixes
            .iter()
            .find_map(|suffix| file_name.strip_suffix(suffix.as_str()))
        else {
            return self.default_namespace.clone();
        };

        let sanitized: String = stem
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let sanitized = sanitized.trim_matches('_');
        if sanitized.is_empty() {
            self.default_namespace.clone()
        } else {
            sanitized.to_string()
        }
    }

    pub fn transliterator(&self) -> Transliterator {
        Transliterator::new(&self.word_overrides, self.max_key_length)
    }
}

/// Namespaces end up inside `"ns.key"` strings, so they stay slug-safe.
pub fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty()
        && namespace
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_dotted_identifier(text: &str) -> bool {
    text.split('.').all(is_bare_identifier)
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
