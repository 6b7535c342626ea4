//! Transliteration and slugging of literal text.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

use crate::core::placeholder::find_placeholders;

/// Maximum slug length, in characters.
pub const DEFAULT_MAX_KEY_LENGTH: usize = 60;

/// Token standing in for an interpolated value.
pub const PLACEHOLDER_MARKER: &str = "value";

/// Slug used when the text has no usable words.
pub const EMPTY_SLUG: &str = "text";

const SEPARATOR: &str = "_";

static ESCAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\[\\nrtbfv0]").unwrap());
static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[а-яА-ЯёЁa-zA-Z0-9]+").unwrap());
static REPEATED_SEPARATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Latin spelling of a lowercase Cyrillic letter.
fn transliterate_char(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        // Hard and soft signs have no Latin spelling
        'ъ' | 'ь' => "",
        _ => return None,
    };
    Some(latin)
}

/// Turns literal text into key slugs.
#[derive(Debug, Clone)]
pub struct Transliterator {
    overrides: HashMap<String, String>,
    max_len: usize,
}

impl Default for Transliterator {
    fn default() -> Self {
        Self::new(HashMap::<String, String>::new(), DEFAULT_MAX_KEY_LENGTH)
    }
}

impl Transliterator {
    /// `overrides` map whole words (matched case-insensitively) to their key spelling.
    pub fn new<I, K, V>(overrides: I, max_len: usize) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            overrides: overrides
                .into_iter()
                .map(|(word, key)| (word.as_ref().to_lowercase(), key.into()))
                .collect(),
            max_len: max_len.max(1),
        }
    }

    /// Key spelling of a single word.
    pub fn translate_word(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if let Some(key) = self.overrides.get(&lower) {
            return key.clone();
        }
        if lower.chars().all(|c| c.is_ascii_digit()) {
            return lower;
        }

        let mut result = String::with_capacity(lower.len());
        for c in lower.chars() {
            if let Some(latin) = transliterate_char(c) {
                result.push_str(latin);
            } else if c.is_ascii_alphanumeric() {
                result.push(c);
            }
        }
        if result.is_empty() {
            PLACEHOLDER_MARKER.to_string()
        } else {
            result
        }
    }

    /// Slug for `text`, before any collision handling.
    ///
    /// `"Привет, {name}!"` becomes `privet_name_value`: each placeholder is
    /// replaced by its own words plus the `value` marker.
    pub fn slugify(&self, text: &str) -> String {
        let mut clean = String::with_capacity(text.len());
        let mut last = 0;
        for placeholder in find_placeholders(text) {
            clean.push_str(&text[last..placeholder.range.start]);
            clean.push(' ');
            clean.push_str(&placeholder.expr);
            clean.push(' ');
            clean.push_str(PLACEHOLDER_MARKER);
            clean.push(' ');
            last = placeholder.range.end;
        }
        clean.push_str(&text[last..]);

        let clean = ESCAPE_REGEX.replace_all(&clean, " ").replace('\\', " ");

        let words: Vec<String> = WORD_REGEX
            .find_iter(&clean)
            .map(|m| self.translate_word(m.as_str()))
            .collect();
        let joined = words.join(SEPARATOR);
        let collapsed = REPEATED_SEPARATOR_REGEX.replace_all(&joined, SEPARATOR);

        let truncated: String = collapsed
            .trim_matches('_')
            .chars()
            .take(self.max_len)
            .collect();
        let slug = truncated.trim_end_matches('_');
        if slug.is_empty() {
            EMPTY_SLUG.to_string()
        } else {
            slug.to_string()
        }
    }
}
