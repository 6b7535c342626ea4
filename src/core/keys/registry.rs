use std::collections::{HashMap, HashSet};

use crate::core::lexicon::escape;

/// Keys handed out during one run, for one namespace.
///
/// Identical text always maps to the same key; different texts never share
/// one. Texts are compared in their escaped lexicon form, so a body holding a
/// real newline matches the `\n` it was saved as. A fresh registry is created per run, so tests and repeated runs do
/// not leak key history into each other.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    by_text: HashMap<String, String>,
    taken: HashSet<String>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from entries already present in the lexicon (`key -> text`).
    ///
    /// Existing keys are reserved. When several existing keys hold the same
    /// text, the first one in iteration order is reused for that text.
    pub fn seeded<'a, I>(existing: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut registry = Self::new();
        for (key, text) in existing {
            registry.taken.insert(key.clone());
            registry
                .by_text
                .entry(escape(text))
                .or_insert_with(|| key.clone());
        }
        registry
    }

    /// Key for `text`, deriving a new one from `slug` if the text is new.
    ///
    /// Collisions get `_1`, `_2`, ... appended until the key is unique.
    pub fn assign(&mut self, text: &str, slug: &str) -> String {
        let text = escape(text);
        if let Some(key) = self.by_text.get(&text) {
            return key.clone();
        }

        let mut key = slug.to_string();
        let mut counter = 0;
        while self.taken.contains(&key) {
            counter += 1;
            key = format!("{slug}_{counter}");
        }

        self.taken.insert(key.clone());
        self.by_text.insert(text, key.clone());
        key
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.taken.contains(key)
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}
