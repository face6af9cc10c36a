//! Purpose: Quote handling and presence checks over string-encoded JSON values.
//! Exports: `unquoted`, `quoted`, `is_absent`, `is_present`, `is_not_null`, `is_empty`, `Presence`.
//! Role: Rule evaluation compares serialized scalars/arrays as text; these helpers
//!       classify that text without decoding it.
//! Invariants: `is_present(s) == !is_absent(s)` for every input.
//! Invariants: Only the exact literals `""`, `null`, `[]` are special; no trimming.
//! Invariants: `unquoted` never indexes past the input; malformed quoting is an error.

use crate::core::error::{Error, ErrorKind};

const NULL_LITERAL: &str = "null";
const EMPTY_ARRAY_LITERAL: &str = "[]";

/// Strips one pair of surrounding double quotes.
///
/// Input that does not start with `"` (including the empty string) is returned as-is.
/// Input that starts with `"` must also end with one and be at least two bytes long.
pub fn unquoted(s: &str) -> Result<&str, Error> {
    let Some(rest) = s.strip_prefix('"') else {
        return Ok(s);
    };
    rest.strip_suffix('"').ok_or_else(|| {
        Error::new(ErrorKind::InvalidInput)
            .with_message("unbalanced quotes")
            .with_hint("A value starting with '\"' must also end with '\"'.")
    })
}

/// Wraps `s` in double quotes. Embedded quotes are not escaped.
pub fn quoted(s: &str) -> String {
    format!("\"{s}\"")
}

pub fn is_absent(s: &str) -> bool {
    s.is_empty() || s == NULL_LITERAL || s == EMPTY_ARRAY_LITERAL
}

pub fn is_present(s: &str) -> bool {
    !is_absent(s)
}

pub fn is_not_null(s: &str) -> bool {
    s != NULL_LITERAL
}

pub fn is_empty(s: &str) -> bool {
    s == NULL_LITERAL || s == EMPTY_ARRAY_LITERAL
}

/// Presence class of a string-encoded value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Presence {
    Missing,
    Null,
    EmptyArray,
    Populated,
}

impl Presence {
    pub fn classify(s: &str) -> Self {
        match s {
            "" => Self::Missing,
            NULL_LITERAL => Self::Null,
            EMPTY_ARRAY_LITERAL => Self::EmptyArray,
            _ => Self::Populated,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Null => "null",
            Self::EmptyArray => "empty-array",
            Self::Populated => "populated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "", "null", "[]", "\"x\"", "x", "0", "false", "[\"a\"]", "{}", " null", "NULL", "[ ]",
    ];

    #[test]
    fn absent_literals() {
        assert!(is_absent(""));
        assert!(is_absent("null"));
        assert!(is_absent("[]"));
        assert!(!is_absent("\"x\""));
        assert!(!is_absent("{}"));
        assert!(!is_absent("[ ]"));
    }

    #[test]
    fn present_is_negation_of_absent() {
        for s in SAMPLES {
            assert_eq!(is_present(s), !is_absent(s), "input {s:?}");
        }
    }

    #[test]
    fn empty_excludes_missing() {
        assert!(is_empty("null"));
        assert!(is_empty("[]"));
        assert!(!is_empty("\"x\""));
        assert!(!is_empty(""));
    }

    #[test]
    fn not_null_only_rejects_null_literal() {
        assert!(!is_not_null("null"));
        assert!(is_not_null(""));
        assert!(is_not_null("[]"));
        assert!(is_not_null("\"null\""));
    }

    #[test]
    fn classification_agrees_with_predicates() {
        for s in SAMPLES {
            let class = Presence::classify(s);
            assert_eq!(is_absent(s), class != Presence::Populated, "input {s:?}");
            assert_eq!(
                is_empty(s),
                matches!(class, Presence::Null | Presence::EmptyArray),
                "input {s:?}"
            );
            assert_eq!(is_not_null(s), class != Presence::Null, "input {s:?}");
        }
        assert_eq!(Presence::classify("").as_str(), "missing");
        assert_eq!(Presence::classify("[]").as_str(), "empty-array");
    }

    #[test]
    fn quoted_does_not_escape() {
        assert_eq!(quoted("abc"), "\"abc\"");
        assert_eq!(quoted(""), "\"\"");
        assert_eq!(quoted("a\"b"), "\"a\"b\"");
    }

    #[test]
    fn unquoted_strips_one_pair() {
        assert_eq!(unquoted("\"x\"").unwrap(), "x");
        assert_eq!(unquoted("\"\"").unwrap(), "");
        assert_eq!(unquoted("\"\"x\"\"").unwrap(), "\"x\"");
        assert_eq!(unquoted(&quoted("bucket")).unwrap(), "bucket");
    }

    #[test]
    fn unquoted_passes_through_bare_values() {
        assert_eq!(unquoted("x").unwrap(), "x");
        assert_eq!(unquoted("").unwrap(), "");
        assert_eq!(unquoted("x\"").unwrap(), "x\"");
    }

    #[test]
    fn unquoted_rejects_unbalanced_quotes() {
        let err = unquoted("\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        let err = unquoted("\"abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.hint().is_some());
    }
}
