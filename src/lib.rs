//! Purpose: Shared library crate used by the `assertion` CLI, rule engines, and tests.
//! Exports: `api` (stable surface) and `core` (presence, lists, files, resources, errors).
//! Role: Stateless helpers consulted while evaluating policy assertions.
//! Invariants: Helpers are synchronous and hold no shared mutable state.
//! Invariants: Failures are returned as `core::error::Error`; nothing panics on bad input.
pub mod api;
pub mod core;
mod json;
