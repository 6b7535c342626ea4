//! Common utility functions shared across the codebase.

/// Checks if the character belongs to the Cyrillic letters handled by the
/// transliteration table (`А`..`я` plus `Ё`/`ё`).
pub fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0410}'..='\u{044F}' | '\u{0401}' | '\u{0451}')
}

/// Checks if the text contains at least one Cyrillic letter.
///
/// This is the test deciding whether a literal is a migration candidate.
///
/// # Examples
///
/// ```
/// use lexmig::utils::contains_cyrillic;
///
/// assert!(contains_cyrillic("Привет"));
/// assert!(contains_cyrillic("Hello, мир"));
/// assert!(contains_cyrillic("Ёлка"));
/// assert!(!contains_cyrillic("Hello"));
/// assert!(!contains_cyrillic("123"));
/// assert!(!contains_cyrillic(""));
/// ```
pub fn contains_cyrillic(text: &str) -> bool {
    text.chars().any(is_cyrillic)
}

/// Identifier character of the host language (letters, digits, `_`).
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Checks if the text is a bare ASCII identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_bare_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
