//! Text rules shared by the document builder and the formatter.

/// Separator for fragments on one line (contact line, meta lines, link rows).
pub const PIPE: &str = " | ";
/// Separator for inline lists such as highlights and certifications.
pub const DOT: &str = " • ";
/// Separator for plain lists (skills, tech, keywords).
pub const COMMA: &str = ", ";

/// Replaces U+2212 minus, U+2013 en dash and U+2014 em dash with `-`.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{2212}' | '\u{2013}' | '\u{2014}' => '-',
            other => other,
        })
        .collect()
}

/// `None` for a missing or empty list; never an empty string.
pub fn join<S: AsRef<str>>(list: Option<&[S]>, sep: &str) -> Option<String> {
    match list {
        Some(items) if !items.is_empty() => Some(
            items
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .join(sep),
        ),
        _ => None,
    }
}

/// `join` with the default `", "` separator.
pub fn join_comma<S: AsRef<str>>(list: Option<&[S]>) -> Option<String> {
    join(list, COMMA)
}

/// Drops absent and blank fragments, joins the rest with `" | "`. May return an
/// empty string; callers test `is_empty()` to decide whether the line exists.
pub fn pipe_join<'a>(fragments: impl IntoIterator<Item = Option<&'a str>>) -> String {
    fragments
        .into_iter()
        .flatten()
        .filter(|f| !f.trim().is_empty())
        .collect::<Vec<&str>>()
        .join(PIPE)
}

/// A fragment is present when it is set and not blank after trimming.
pub fn present(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_unicode_minus() {
        assert_eq!(sanitize("2021\u{2212}present"), "2021-present");
    }

    #[test]
    fn test_sanitize_en_and_em_dashes() {
        assert_eq!(sanitize("a – b — c"), "a - b - c");
        assert_eq!(sanitize("plain-text"), "plain-text");
    }

    #[test]
    fn test_join_absent_for_empty_or_missing() {
        let empty: [&str; 0] = [];
        assert_eq!(join_comma(Some(&empty[..])), None);
        assert_eq!(join_comma::<&str>(None), None);
    }

    #[test]
    fn test_join_single_and_many() {
        assert_eq!(join_comma(Some(&["A"][..])), Some("A".to_string()));
        assert_eq!(join_comma(Some(&["A", "B"][..])), Some("A, B".to_string()));
        assert_eq!(
            join(Some(&["A".to_string(), "B".to_string()][..]), DOT),
            Some("A • B".to_string())
        );
    }

    #[test]
    fn test_pipe_join_drops_empty_and_missing() {
        assert_eq!(pipe_join([Some(""), Some("X"), None, Some("Y")]), "X | Y");
        assert_eq!(pipe_join([None, Some("  ")]), "");
        assert_eq!(pipe_join([Some("only")]), "only");
    }

    #[test]
    fn test_present_trims() {
        assert_eq!(present(Some("  ")), None);
        assert_eq!(present(Some(" x ")), Some(" x "));
        assert_eq!(present(None), None);
    }
}
