//! Migration engine.
//!
//! ## Module Structure
//!
//! - `source`: the file under migration, line by line
//! - `scanner`: quoted-literal tokenizer
//! - `classify`: decides which literals are user-facing text
//! - `placeholder`: `{...}` placeholders of interpolated literals
//! - `keys`: transliteration and run-scoped key assignment
//! - `lexicon`: load, merge and save of the lexicon table
//! - `pipeline`: threads the above into a `MigrationPlan`
//! - `rewrite`: backup and batch rewrite of the source

pub mod classify;
pub mod keys;
pub mod lexicon;
pub mod pipeline;
pub mod placeholder;
pub mod rewrite;
pub mod scanner;
pub mod source;
