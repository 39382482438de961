use std::collections::VecDeque;
use std::io;

use super::{ByteSource, SourceError};

/// In-memory byte source with scripted arrivals.
///
/// Bytes passed to [`MemorySource::new`] are available immediately. Each
/// chunk given to [`MemorySource::with_arrivals`] becomes available only after
/// one empty poll, which exercises the framer's wait path. Once everything has
/// been read the source reports [`SourceError::Closed`]. Writes are recorded.
///
/// # Examples
/// ```
/// use contactid_core::{ByteSource, MemorySource};
///
/// let mut source = MemorySource::new(b"AL".to_vec());
/// let mut buf = [0u8; 8];
/// assert_eq!(source.bytes_available()?, 2);
/// assert_eq!(source.read(&mut buf)?, 2);
/// source.write(b"OK")?;
/// assert_eq!(source.written(), b"OK");
/// # Ok::<(), contactid_core::SourceError>(())
/// ```
#[derive(Debug, Default)]
pub struct MemorySource {
    arrivals: VecDeque<Vec<u8>>,
    pending: VecDeque<u8>,
    written: Vec<u8>,
    empty_polls: usize,
    fail_writes: bool,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            pending: bytes.into().into(),
            ..Self::default()
        }
    }

    pub fn with_arrivals<I, B>(arrivals: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        Self {
            arrivals: arrivals.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Make every write fail with a broken-pipe error.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Everything written so far, in order.
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Polls that found no bytes available.
    pub fn empty_polls(&self) -> usize {
        self.empty_polls
    }
}

impl ByteSource for MemorySource {
    fn bytes_available(&mut self) -> Result<usize, SourceError> {
        if !self.pending.is_empty() {
            return Ok(self.pending.len());
        }
        match self.arrivals.pop_front() {
            Some(chunk) => {
                self.pending.extend(chunk);
                self.empty_polls += 1;
                Ok(0)
            }
            None => Err(SourceError::Closed),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        let n = buf.len().min(self.pending.len());
        for (slot, byte) in buf.iter_mut().zip(self.pending.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<usize, SourceError> {
        if self.fail_writes {
            return Err(SourceError::Io(io::Error::from(io::ErrorKind::BrokenPipe)));
        }
        self.written.extend_from_slice(bytes);
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::MemorySource;
    use crate::source::{ByteSource, SourceError};

    #[test]
    fn arrivals_need_one_empty_poll() {
        let mut source = MemorySource::with_arrivals([b"AB".to_vec()]);
        assert_eq!(source.bytes_available().unwrap(), 0);
        assert_eq!(source.bytes_available().unwrap(), 2);
        assert_eq!(source.empty_polls(), 1);
    }

    #[test]
    fn read_is_bounded_by_buffer() {
        let mut source = MemorySource::new(b"ABCDE".to_vec());
        let mut buf = [0u8; 3];
        assert_eq!(source.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf, b"ABC");
        assert_eq!(source.bytes_available().unwrap(), 2);
    }

    #[test]
    fn exhausted_source_is_closed() {
        let mut source = MemorySource::new(Vec::<u8>::new());
        assert!(matches!(
            source.bytes_available(),
            Err(SourceError::Closed)
        ));
    }

    #[test]
    fn failing_writes_record_nothing() {
        let mut source = MemorySource::new(Vec::<u8>::new()).failing_writes();
        assert!(matches!(source.write(b"OK"), Err(SourceError::Io(_))));
        assert!(source.written().is_empty());
    }
}
