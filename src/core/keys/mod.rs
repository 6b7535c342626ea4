//! Key synthesis.
//!
//! - `transliterate`: text → slug (placeholder markers, escapes, word
//!   extraction, Cyrillic transliteration, truncation)
//! - `registry`: slug → unique key for the current run

mod registry;
mod transliterate;

pub use registry::KeyRegistry;
pub use transliterate::{
    DEFAULT_MAX_KEY_LENGTH, EMPTY_SLUG, PLACEHOLDER_MARKER, Transliterator,
};

/// Run-scoped key generator for one namespace.
///
/// Created once per run and passed explicitly to whatever needs keys.
#[derive(Debug)]
pub struct KeySynthesizer {
    transliterator: Transliterator,
    registry: KeyRegistry,
}

impl KeySynthesizer {
    pub fn new(transliterator: Transliterator, registry: KeyRegistry) -> Self {
        Self {
            transliterator,
            registry,
        }
    }

    /// Stable, unique key for `text` within this run.
    pub fn key_for(&mut self, text: &str) -> String {
        let slug = self.transliterator.slugify(text);
        self.registry.assign(text, &slug)
    }
}
