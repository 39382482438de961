//! Sentence framing over a chunked byte source.
//!
//! The framer discards bytes until the start delimiter ('A'), then
//! accumulates until the end delimiter (CR) and hands back the sentence with
//! both delimiters included. Bytes are pulled in fixed-size chunks; when a
//! chunk runs dry the framer polls the source at a fixed interval, sleeping
//! and yielding between polls, until bytes arrive.
//!
//! Sentences that pass [`validate_sentence`] are acknowledged before they are
//! returned. A sentence that reaches `max_sentence_len` without an end
//! delimiter is abandoned and the next call starts seeking again.

pub mod ack;
mod error;

pub use error::FrameError;

use std::fmt;
use std::thread;
use std::time::Duration;

use crate::protocols::contact_id::layout;
use crate::protocols::contact_id::{CidError, CidMessage, parse_sentence};
use crate::source::{ByteSource, SourceError};

/// Default chunk size, matching a typical UART FIFO depth.
pub const DEFAULT_CHUNK_SIZE: usize = 8;
/// Default delay between polls while waiting for bytes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Default cap on a sentence, delimiters included.
pub const DEFAULT_MAX_SENTENCE_LEN: usize = 64;

/// Framer tuning.
///
/// # Examples
/// ```
/// use contactid_core::FramerConfig;
///
/// let config = FramerConfig::default();
/// assert_eq!(config.chunk_size, 8);
/// assert_eq!(config.max_sentence_len, 64);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramerConfig {
    pub chunk_size: usize,
    pub poll_interval: Duration,
    pub max_sentence_len: usize,
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_sentence_len: DEFAULT_MAX_SENTENCE_LEN,
        }
    }
}

impl FramerConfig {
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.chunk_size == 0 {
            return Err(FrameError::InvalidConfig {
                reason: "chunk size must be at least 1",
            });
        }
        if self.max_sentence_len < layout::MIN_SENTENCE_LEN {
            return Err(FrameError::InvalidConfig {
                reason: "max sentence length is below the minimum sentence length",
            });
        }
        Ok(())
    }
}

/// One delimiter-bounded sentence, 'A' through CR inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSentence(Vec<u8>);

impl RawSentence {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn decode(&self) -> Result<CidMessage, CidError> {
        parse_sentence(&self.0)
    }
}

impl AsRef<[u8]> for RawSentence {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for RawSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

/// Check the minimum shape of a framed sentence.
///
/// # Errors
/// `FrameError::InvalidSentence` when the sentence is shorter than 19 bytes or
/// does not start with 'A'.
pub fn validate_sentence(sentence: &[u8]) -> Result<(), FrameError> {
    if sentence.len() < layout::MIN_SENTENCE_LEN
        || sentence.first() != Some(&layout::START_DELIMITER)
    {
        return Err(FrameError::InvalidSentence {
            len: sentence.len(),
            first: sentence.first().copied(),
        });
    }
    Ok(())
}

pub struct SentenceFramer<S> {
    source: S,
    config: FramerConfig,
    chunk: Vec<u8>,
    pos: usize,
    filled: usize,
}

impl<S: ByteSource> SentenceFramer<S> {
    pub fn new(source: S) -> Self {
        let config = FramerConfig::default();
        Self {
            source,
            chunk: vec![0; config.chunk_size],
            config,
            pos: 0,
            filled: 0,
        }
    }

    pub fn with_config(source: S, config: FramerConfig) -> Result<Self, FrameError> {
        config.validate()?;
        Ok(Self {
            source,
            chunk: vec![0; config.chunk_size],
            config,
            pos: 0,
            filled: 0,
        })
    }

    pub fn config(&self) -> &FramerConfig {
        &self.config
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Block until the next sentence is framed, validate it and acknowledge it.
    ///
    /// # Errors
    /// `InvalidSentence` (nothing is acknowledged), `SentenceTooLong` when the
    /// cap is hit, or `Source` when the byte source fails or closes.
    pub fn next_sentence(&mut self) -> Result<RawSentence, FrameError> {
        let sentence = self.read_next_sentence()?;
        if let Err(err) = validate_sentence(&sentence) {
            tracing::warn!(sentence = %sentence.escape_ascii(), "rejected sentence");
            return Err(err);
        }
        ack::acknowledge(&mut self.source);
        tracing::debug!(sentence = %sentence.escape_ascii(), "sentence accepted");
        Ok(RawSentence(sentence))
    }

    fn read_next_sentence(&mut self) -> Result<Vec<u8>, FrameError> {
        let mut byte = self.next_byte()?;
        while byte != layout::START_DELIMITER {
            byte = self.next_byte()?;
        }

        let mut sentence = Vec::with_capacity(layout::MIN_SENTENCE_LEN + 4);
        loop {
            sentence.push(byte);
            if byte == layout::END_DELIMITER {
                return Ok(sentence);
            }
            if sentence.len() >= self.config.max_sentence_len {
                tracing::warn!(
                    limit = self.config.max_sentence_len,
                    "sentence too long, resynchronizing"
                );
                return Err(FrameError::SentenceTooLong {
                    limit: self.config.max_sentence_len,
                });
            }
            byte = self.next_byte()?;
        }
    }

    fn next_byte(&mut self) -> Result<u8, FrameError> {
        if self.pos >= self.filled {
            self.fill_chunk()?;
        }
        let byte = self.chunk[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    fn fill_chunk(&mut self) -> Result<(), SourceError> {
        loop {
            self.wait_for_bytes()?;
            let n = self.source.read(&mut self.chunk)?;
            if n > 0 {
                self.pos = 0;
                self.filled = n.min(self.chunk.len());
                tracing::trace!(bytes = self.filled, "chunk refilled");
                return Ok(());
            }
        }
    }

    fn wait_for_bytes(&mut self) -> Result<(), SourceError> {
        while self.source.bytes_available()? == 0 {
            thread::sleep(self.config.poll_interval);
            thread::yield_now();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{FrameError, FramerConfig, SentenceFramer, validate_sentence};
    use crate::protocols::contact_id::layout;
    use crate::source::MemorySource;

    const DOCUMENTED: &[u8] = b"AL00123418162701000##\r";
    const SHORT_FORM: &[u8] = b"AL023418314501000##\r";

    fn fast_config() -> FramerConfig {
        FramerConfig {
            poll_interval: Duration::ZERO,
            ..FramerConfig::default()
        }
    }

    fn framer(source: MemorySource) -> SentenceFramer<MemorySource> {
        SentenceFramer::with_config(source, fast_config()).unwrap()
    }

    #[test]
    fn frames_sentences_across_chunks() {
        let mut stream = b"\n\x00noise".to_vec();
        stream.extend_from_slice(DOCUMENTED);
        stream.push(b'\n');
        stream.extend_from_slice(SHORT_FORM);
        stream.push(b'\n');
        let mut framer = framer(MemorySource::new(stream));

        let first = framer.next_sentence().unwrap();
        assert_eq!(first.as_bytes(), DOCUMENTED);
        let second = framer.next_sentence().unwrap();
        assert_eq!(second.as_bytes(), SHORT_FORM);

        let mut acks = layout::ACK.to_vec();
        acks.extend_from_slice(&layout::ACK);
        assert_eq!(framer.source_mut().written(), &acks[..]);
    }

    #[test]
    fn short_sentence_is_rejected_without_ack() {
        let mut stream = b"AL0##\r".to_vec();
        stream.extend_from_slice(DOCUMENTED);
        let mut framer = framer(MemorySource::new(stream));

        let err = framer.next_sentence().unwrap_err();
        assert!(matches!(err, FrameError::InvalidSentence { len: 6, .. }));
        assert!(framer.source_mut().written().is_empty());

        let sentence = framer.next_sentence().unwrap();
        assert_eq!(sentence.as_bytes(), DOCUMENTED);
        assert_eq!(framer.source_mut().written(), &layout::ACK[..]);
    }

    #[test]
    fn oversized_sentence_aborts_and_resynchronizes() {
        let mut stream = b"A".to_vec();
        stream.extend(std::iter::repeat_n(b'x', 200));
        stream.extend_from_slice(DOCUMENTED);
        let mut framer = framer(MemorySource::new(stream));

        let err = framer.next_sentence().unwrap_err();
        assert!(matches!(err, FrameError::SentenceTooLong { limit: 64 }));
        assert!(framer.source_mut().written().is_empty());

        let sentence = framer.next_sentence().unwrap();
        assert_eq!(sentence.as_bytes(), DOCUMENTED);
    }

    #[test]
    fn sentence_at_cap_is_accepted() {
        let config = FramerConfig {
            max_sentence_len: DOCUMENTED.len(),
            ..fast_config()
        };
        let source = MemorySource::new(DOCUMENTED.to_vec());
        let mut framer = SentenceFramer::with_config(source, config).unwrap();
        assert_eq!(framer.next_sentence().unwrap().len(), DOCUMENTED.len());
    }

    #[test]
    fn waits_for_bytes_split_across_arrivals() {
        let (head, tail) = DOCUMENTED.split_at(5);
        let source = MemorySource::with_arrivals([head.to_vec(), Vec::new(), tail.to_vec()]);
        let mut framer = framer(source);

        let sentence = framer.next_sentence().unwrap();
        assert_eq!(sentence.as_bytes(), DOCUMENTED);
        assert!(framer.source_mut().empty_polls() >= 3);
    }

    #[test]
    fn closed_source_ends_framing() {
        let mut framer = framer(MemorySource::new(b"AL0012".to_vec()));
        let err = framer.next_sentence().unwrap_err();
        assert!(err.is_closed());
        assert!(framer.source_mut().written().is_empty());
    }

    #[test]
    fn single_byte_chunks_frame_the_same_sentence() {
        let config = FramerConfig {
            chunk_size: 1,
            ..fast_config()
        };
        let source = MemorySource::new(DOCUMENTED.to_vec());
        let mut framer = SentenceFramer::with_config(source, config).unwrap();
        assert_eq!(framer.next_sentence().unwrap().as_bytes(), DOCUMENTED);
    }

    #[test]
    fn rejects_invalid_config() {
        let zero_chunk = FramerConfig {
            chunk_size: 0,
            ..FramerConfig::default()
        };
        assert!(matches!(
            zero_chunk.validate(),
            Err(FrameError::InvalidConfig { .. })
        ));

        let tiny_cap = FramerConfig {
            max_sentence_len: layout::MIN_SENTENCE_LEN - 1,
            ..FramerConfig::default()
        };
        assert!(SentenceFramer::with_config(MemorySource::default(), tiny_cap).is_err());
    }

    #[test]
    fn validate_sentence_checks_length_and_start() {
        assert!(validate_sentence(DOCUMENTED).is_ok());
        assert!(validate_sentence(&DOCUMENTED[..18]).is_err());
        let mut wrong_start = DOCUMENTED.to_vec();
        wrong_start[0] = b'B';
        assert!(matches!(
            validate_sentence(&wrong_start),
            Err(FrameError::InvalidSentence { first: Some(b'B'), .. })
        ));
        assert!(validate_sentence(b"").is_err());
    }

    #[test]
    fn raw_sentence_display_escapes_control_bytes() {
        let mut framer = framer(MemorySource::new(DOCUMENTED.to_vec()));
        let sentence = framer.next_sentence().unwrap();
        assert_eq!(sentence.to_string(), "AL00123418162701000##\\r");
        assert_eq!(sentence.decode().unwrap().account, 1234);
    }
}
