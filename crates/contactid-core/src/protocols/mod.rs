//! Protocol decoding modules.
//!
//! Contact ID follows a layered structure:
//! - `layout`: byte offsets, ranges and wire constants (source of truth)
//! - `reader`: bounds-checked byte access and digit conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, per-field errors
//!
//! Parsers are pure and contain no I/O; the framer and sources handle the
//! serial link.

pub mod contact_id;
pub mod event_codes;
