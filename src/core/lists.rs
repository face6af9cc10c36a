//! Purpose: Intersection tests over string lists, plain or JSON-encoded.
//! Exports: `lists_intersect`, `json_lists_intersect`, `try_json_lists_intersect`.
//! Role: Backs "any of" style rule operators that compare two value lists.
//! Invariants: Comparison is exact string equality; order and duplicates do not matter.
//! Invariants: The lenient JSON variant maps any decode failure to `false`.

use tracing::debug;

use crate::core::error::{Error, ErrorKind};
use crate::json::parse;

/// True when any element of `list1` equals any element of `list2`.
pub fn lists_intersect<A, B>(list1: &[A], list2: &[B]) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    list1
        .iter()
        .any(|a| list2.iter().any(|b| a.as_ref() == b.as_ref()))
}

/// Decodes both inputs as JSON arrays of strings and tests them for overlap.
///
/// Malformed input on either side is indistinguishable from "no overlap";
/// use [`try_json_lists_intersect`] when the caller needs to tell them apart.
pub fn json_lists_intersect(s1: &str, s2: &str) -> bool {
    match try_json_lists_intersect(s1, s2) {
        Ok(found) => found,
        Err(err) => {
            debug!(
                error = %err,
                hint = err.hint().unwrap_or_default(),
                "json list decode failed; treating as no intersection"
            );
            false
        }
    }
}

pub fn try_json_lists_intersect(s1: &str, s2: &str) -> Result<bool, Error> {
    let left = decode_string_list(s1, "left")?;
    let right = decode_string_list(s2, "right")?;
    Ok(lists_intersect(&left, &right))
}

fn decode_string_list(input: &str, side: &str) -> Result<Vec<String>, Error> {
    parse::from_str::<Vec<String>>(input).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message(format!("{side} value is not a JSON array of strings"))
            .with_hint(parse::hint_for_error(&err, side))
            .with_source(err)
    })
}
