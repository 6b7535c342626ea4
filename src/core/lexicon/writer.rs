//! Deterministic rendering of a [`LexiconTable`].

use super::LexiconTable;

pub const HEADER: &str = "# Generated by lexmig. Hand-added entries are preserved on re-runs.";

const INDENT: &str = "    ";

/// Render `table` as a `<var_name> = {...}` assignment.
///
/// Namespaces and keys come out sorted, so the same table always renders
/// to the same bytes.
pub fn render(table: &LexiconTable, var_name: &str) -> String {
    let mut out = format!("{HEADER}\n\n{var_name} = {{\n");
    for (namespace, entries) in table.namespaces() {
        out.push_str(&format!("{INDENT}{}: {{\n", quote(namespace)));
        for (key, text) in entries {
            out.push_str(&format!(
                "{INDENT}{INDENT}{}: {},\n",
                quote(key),
                quote(text)
            ));
        }
        out.push_str(&format!("{INDENT}}},\n"));
    }
    out.push_str("}\n");
    out
}

/// Wrap text in double quotes as a host-language literal.
pub fn quote(text: &str) -> String {
    format!("\"{}\"", escape(text))
}

/// The text as it appears between the double quotes of [`quote`].
///
/// Existing escape sequences are copied untouched; bare `"` and raw
/// newline, carriage return and tab characters are escaped. Escaping an
/// already escaped text gives the same result, which keeps load → save
/// stable and lets texts be compared in this form.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut escaped = false;
    for c in text.chars() {
        if escaped {
            match c {
                '\n' => out.push('n'),
                '\r' => out.push('r'),
                '\t' => out.push('t'),
                c => out.push(c),
            }
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                out.push('\\');
                escaped = true;
            }
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    if escaped {
        // A dangling backslash would swallow the closing quote
        out.push('\\');
    }
    out
}
