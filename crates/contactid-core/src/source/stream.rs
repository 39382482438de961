use std::io::{self, Read, Write};

use super::{ByteSource, SourceError};

const STREAM_READ_BUFFER_SIZE: usize = 4 * 1024;

/// Byte source over any `Read`/`Write` pair, e.g. a captured serial log with
/// acknowledgments sent to `io::sink()`.
///
/// The reader is treated as finite: end-of-file maps to
/// [`SourceError::Closed`].
pub struct StreamSource<R, W> {
    reader: R,
    writer: W,
    lookahead: Vec<u8>,
    pos: usize,
    bytes_read: u64,
}

impl<R: Read, W: Write> StreamSource<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            lookahead: Vec::with_capacity(STREAM_READ_BUFFER_SIZE),
            pos: 0,
            bytes_read: 0,
        }
    }

    /// Total bytes pulled from the underlying reader.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn refill(&mut self) -> Result<(), SourceError> {
        self.lookahead.resize(STREAM_READ_BUFFER_SIZE, 0);
        let n = loop {
            match self.reader.read(&mut self.lookahead) {
                Ok(n) => break n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.lookahead.clear();
                    return Err(err.into());
                }
            }
        };
        self.lookahead.truncate(n);
        self.pos = 0;
        self.bytes_read += n as u64;
        if n == 0 {
            return Err(SourceError::Closed);
        }
        Ok(())
    }
}

impl<R: Read, W: Write> ByteSource for StreamSource<R, W> {
    fn bytes_available(&mut self) -> Result<usize, SourceError> {
        if self.pos >= self.lookahead.len() {
            self.refill()?;
        }
        Ok(self.lookahead.len() - self.pos)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        let available = &self.lookahead[self.pos.min(self.lookahead.len())..];
        let n = buf.len().min(available.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.pos += n;
        Ok(n)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<usize, SourceError> {
        self.writer.write_all(bytes)?;
        self.writer.flush()?;
        Ok(bytes.len())
    }
}
