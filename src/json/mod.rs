//! Purpose: Internal JSON parsing boundary shared by library callsites.
//! Exports: `parse` module with decode helpers used by list and resource helpers.
//! Role: Single seam for decode logic so callsites avoid ad hoc error shaping.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
