//! Acknowledgment of accepted sentences.
//!
//! The panel repeats a sentence until it sees "OK", so the acknowledgment is
//! best effort: a failed write is logged and otherwise dropped.

use crate::protocols::contact_id::layout;
use crate::source::ByteSource;

/// Write the 4-byte acknowledgment to `source`.
pub fn acknowledge<S: ByteSource + ?Sized>(source: &mut S) {
    match source.write(&layout::ACK) {
        Ok(n) if n == layout::ACK.len() => tracing::trace!("acknowledgment sent"),
        Ok(n) => tracing::warn!(written = n, "acknowledgment partially written"),
        Err(err) => tracing::warn!(error = %err, "acknowledgment write failed"),
    }
}
