//! Placeholder extraction for interpolated literals.
//!
//! Placeholders are `{...}` regions of the body. `{{` and `}}` are literal
//! braces. A placeholder is simple when its expression is a bare identifier;
//! anything else (attribute access, calls, conversions, format specs) is
//! complex and cannot be wired into `.format(...)` automatically.

use std::{collections::BTreeSet, ops::Range};

use crate::utils::is_bare_identifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Simple,
    Complex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte range in the body, braces included.
    pub range: Range<usize>,
    /// Inner expression, trimmed.
    pub expr: String,
    pub kind: PlaceholderKind,
}

/// Outcome of inspecting an interpolated body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    pub is_simple: bool,
    /// Names of the simple placeholders, sorted and deduplicated.
    pub names: BTreeSet<String>,
    /// The body holds `{{` or `}}`, which only `.format()` turns back into
    /// single braces.
    pub has_escaped_braces: bool,
}

/// Locate every placeholder region in `body`.
///
/// An unclosed `{` yields a complex placeholder running to the end of the body.
pub fn find_placeholders(body: &str) -> Vec<Placeholder> {
    let mut found = Vec::new();
    let mut pos = 0;
    while pos < body.len() {
        let rest = &body[pos..];
        if rest.starts_with("{{") || rest.starts_with("}}") {
            pos += 2;
            continue;
        }
        if !rest.starts_with('{') {
            pos += rest.chars().next().map_or(1, char::len_utf8);
            continue;
        }

        match rest.find('}') {
            Some(close) => {
                let expr = rest[1..close].trim();
                found.push(Placeholder {
                    range: pos..pos + close + 1,
                    expr: expr.to_string(),
                    kind: if is_bare_identifier(expr) {
                        PlaceholderKind::Simple
                    } else {
                        PlaceholderKind::Complex
                    },
                });
                pos += close + 1;
            }
            None => {
                found.push(Placeholder {
                    range: pos..body.len(),
                    expr: rest[1..].trim().to_string(),
                    kind: PlaceholderKind::Complex,
                });
                break;
            }
        }
    }
    found
}

pub fn extract(body: &str) -> Placeholders {
    let found = find_placeholders(body);
    Placeholders {
        is_simple: found.iter().all(|p| p.kind == PlaceholderKind::Simple),
        names: found
            .into_iter()
            .filter(|p| p.kind == PlaceholderKind::Simple)
            .map(|p| p.expr)
            .collect(),
        has_escaped_braces: body.contains("{{") || body.contains("}}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(p: &Placeholders) -> Vec<&str> {
        p.names.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_single_simple_placeholder() {
        let p = extract("Привет, {name}!");
        assert!(p.is_simple);
        assert_eq!(names(&p), vec!["name"]);
    }

    #[test]
    fn test_names_sorted_and_deduplicated() {
        let p = extract("{user} {count} {user}");
        assert!(p.is_simple);
        assert_eq!(names(&p), vec!["count", "user"]);
    }

    #[test]
    fn test_whitespace_inside_braces_is_trimmed() {
        let p = extract("Итого: { total }");
        assert!(p.is_simple);
        assert_eq!(names(&p), vec!["total"]);
    }

    #[test]
    fn test_complex_placeholder_marks_literal() {
        for body in [
            "Привет, {user.name}",
            "Всего {len(items)}",
            "Цена {price:.2f}",
            "Ответ {value!r}",
            "Пусто {}",
        ] {
            assert!(!extract(body).is_simple, "{body} should be complex");
        }
    }

    #[test]
    fn test_mixed_placeholders() {
        let p = extract("{name}: {user.id}");
        assert!(!p.is_simple);
        assert_eq!(names(&p), vec!["name"]);
    }

    #[test]
    fn test_doubled_braces_are_escapes() {
        let p = extract("Скобки {{не поле}} и {field}");
        assert!(p.is_simple);
        assert!(p.has_escaped_braces);
        assert_eq!(names(&p), vec!["field"]);
    }

    #[test]
    fn test_no_placeholders() {
        let p = extract("Просто текст");
        assert!(p.is_simple);
        assert!(!p.has_escaped_braces);
        assert!(p.names.is_empty());
    }

    #[test]
    fn test_unclosed_brace_is_complex() {
        let p = extract("Открыто {name");
        assert!(!p.is_simple);
        let found = find_placeholders("Открыто {name");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].expr, "name");
        assert_eq!(found[0].range.end, "Открыто {name".len());
    }

    #[test]
    fn test_placeholder_ranges() {
        let body = "Привет, {name}!";
        let found = find_placeholders(body);
        assert_eq!(found.len(), 1);
        assert_eq!(&body[found[0].range.clone()], "{name}");
        assert_eq!(found[0].kind, PlaceholderKind::Simple);
    }
}
