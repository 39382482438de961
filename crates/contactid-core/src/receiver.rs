//! Framer + decoder pipeline for a single byte source.

use thiserror::Error;

use crate::framer::{FrameError, FramerConfig, RawSentence, SentenceFramer};
use crate::protocols::contact_id::{CidError, CidMessage};
use crate::source::{ByteSource, SourceError};

#[derive(Debug, Error)]
pub enum ReceiveError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Decode(#[from] CidError),
}

/// Receives Contact ID events from one exclusively owned byte source.
///
/// # Examples
/// ```
/// use contactid_core::{ContactIdReceiver, MemorySource};
///
/// let source = MemorySource::new(b"AL00123418162701000##\r\n".to_vec());
/// let mut receiver = ContactIdReceiver::new(source);
/// let msg = receiver.next_message()?;
/// assert_eq!(msg.account, 1234);
/// assert_eq!(receiver.into_source().written(), b"OK\x13\n");
/// # Ok::<(), contactid_core::ReceiveError>(())
/// ```
pub struct ContactIdReceiver<S> {
    framer: SentenceFramer<S>,
}

impl<S: ByteSource> ContactIdReceiver<S> {
    pub fn new(source: S) -> Self {
        Self {
            framer: SentenceFramer::new(source),
        }
    }

    pub fn with_config(source: S, config: FramerConfig) -> Result<Self, FrameError> {
        Ok(Self {
            framer: SentenceFramer::with_config(source, config)?,
        })
    }

    /// Next valid, acknowledged sentence (blocking).
    pub fn next_sentence(&mut self) -> Result<RawSentence, FrameError> {
        self.framer.next_sentence()
    }

    /// Next decoded event (blocking).
    ///
    /// The sentence is acknowledged once framing succeeds, even if decoding
    /// then fails.
    pub fn next_message(&mut self) -> Result<CidMessage, ReceiveError> {
        let sentence = self.framer.next_sentence()?;
        Ok(sentence.decode()?)
    }

    /// Send raw bytes to the panel.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<usize, SourceError> {
        self.framer.source_mut().write(bytes)
    }

    pub fn into_source(self) -> S {
        self.framer.into_source()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ContactIdReceiver, ReceiveError};
    use crate::framer::{FrameError, FramerConfig};
    use crate::protocols::contact_id::CidError;
    use crate::source::MemorySource;

    fn receiver(stream: &[u8]) -> ContactIdReceiver<MemorySource> {
        let config = FramerConfig {
            poll_interval: Duration::ZERO,
            ..FramerConfig::default()
        };
        ContactIdReceiver::with_config(MemorySource::new(stream.to_vec()), config).unwrap()
    }

    #[test]
    fn decode_failure_is_still_acknowledged() {
        let mut receiver = receiver(b"AL00123418162701X00##\r");
        let err = receiver.next_message().unwrap_err();
        assert!(matches!(err, ReceiveError::Decode(CidError::BadUserOrZone)));
        assert_eq!(receiver.into_source().written(), b"OK\x13\n");
    }

    #[test]
    fn framing_failure_is_not_acknowledged() {
        let mut receiver = receiver(b"AL00\r");
        let err = receiver.next_message().unwrap_err();
        assert!(matches!(
            err,
            ReceiveError::Frame(FrameError::InvalidSentence { .. })
        ));
        assert!(receiver.into_source().written().is_empty());
    }

    #[test]
    fn wrong_prefix_is_acknowledged_then_rejected() {
        let mut receiver = receiver(b"AX00123418162701000##\r");
        let err = receiver.next_message().unwrap_err();
        assert!(matches!(
            err,
            ReceiveError::Decode(CidError::InvalidSentence { .. })
        ));
    }

    #[test]
    fn write_bytes_goes_to_source() {
        let mut receiver = receiver(b"");
        receiver.write_bytes(b"PING").unwrap();
        assert_eq!(receiver.into_source().written(), b"PING");
    }
}
