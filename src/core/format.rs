//! Purpose: Render values as human-readable JSON for reports and debug output.
//! Exports: `json_stringify`.
//! Role: Shared pretty encoder for resources, rule results, and CLI output.
//! Invariants: Output uses two-space indentation and no trailing newline.
//! Invariants: Unrepresentable values surface as `Encode` errors, never partial output.

use serde::Serialize;

use crate::core::error::{Error, ErrorKind};

pub fn json_stringify<T: Serialize + ?Sized>(data: &T) -> Result<String, Error> {
    serde_json::to_string_pretty(data).map_err(|err| {
        Error::new(ErrorKind::Encode)
            .with_message("value cannot be represented as JSON")
            .with_source(err)
    })
}
