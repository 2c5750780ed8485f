//! Text utilities shared by the column grammar and the row classifier.

/// Returns true if a cell is absent, empty, or made of whitespace only.
#[inline]
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map(|value| value.trim().is_empty()).unwrap_or(true)
}

/// Returns the cell value when it carries non-whitespace content.
#[inline]
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Returns the last whitespace-delimited token of a column name.
pub(crate) fn last_token(name: &str) -> Option<&str> {
    name.split_whitespace().last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cells() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some(" \t ")));
        assert!(!is_blank(Some(" A1 ")));
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some("1.1")), Some("1.1"));
    }

    #[test]
    fn last_token_of_column() {
        assert_eq!(last_token("Noun-base word Russian"), Some("Russian"));
        assert_eq!(last_token("Noun-base word  English "), Some("English"));
        assert_eq!(last_token("   "), None);
    }
}
