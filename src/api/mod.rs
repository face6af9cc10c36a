//! Purpose: Define the stable public Rust API boundary for the assertion helpers.
//! Exports: Helper functions and types needed by rule engines and the CLI.
//! Role: Public, additive-only surface; callers should not reach into `core` paths.
//! Invariants: Every helper re-exported here is pure apart from logging.
//! Invariants: New exports are additive; existing signatures stay stable.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::files::{FilePatterns, base_name, should_include_file};
pub use crate::core::format::json_stringify;
pub use crate::core::lists::{json_lists_intersect, lists_intersect, try_json_lists_intersect};
pub use crate::core::presence::{
    Presence, is_absent, is_empty, is_not_null, is_present, quoted, unquoted,
};
pub use crate::core::resource::{
    ANY_RESOURCE_TYPE, Resource, filter_resources_by_type, parse_resources,
};
