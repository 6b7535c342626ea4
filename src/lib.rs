//! lexmig - move hard-coded Cyrillic text into a lexicon
//!
//! lexmig scans a source file for string literals containing Cyrillic text,
//! stores each text in a `namespace -> key -> text` lexicon file and
//! replaces the literal with a `lookup("namespace.key", lang)` call.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Migration engine (scan, classify, keys, lexicon, rewrite)
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
