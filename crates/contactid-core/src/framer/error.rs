use thiserror::Error;

use crate::source::SourceError;

/// Errors returned while framing sentences from a byte source.
///
/// # Examples
/// ```
/// use contactid_core::{FrameError, validate_sentence};
///
/// let err = validate_sentence(b"AL00\r").unwrap_err();
/// assert!(matches!(err, FrameError::InvalidSentence { len: 5, .. }));
/// ```
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("invalid sentence: {len} bytes, expected at least 19 starting with 'A'")]
    InvalidSentence { len: usize, first: Option<u8> },
    #[error("sentence exceeded {limit} bytes without an end delimiter")]
    SentenceTooLong { limit: usize },
    #[error("invalid framer configuration: {reason}")]
    InvalidConfig { reason: &'static str },
    #[error("source error: {0}")]
    Source(#[from] SourceError),
}

impl FrameError {
    /// True when a finite source has run out of bytes.
    pub fn is_closed(&self) -> bool {
        matches!(self, FrameError::Source(SourceError::Closed))
    }
}
