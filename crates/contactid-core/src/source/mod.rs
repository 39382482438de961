//! Byte sources for the framer.
//!
//! The framer only needs three operations from the serial link, captured by
//! [`ByteSource`]. A live UART driver implements it outside this crate;
//! [`MemorySource`] and [`StreamSource`] cover tests and captured logs.

mod memory;
mod stream;

pub use memory::MemorySource;
pub use stream::StreamSource;

use thiserror::Error;

/// Byte-oriented, single-owner link to a Contact ID panel.
///
/// Implementations are not required to be reentrant; one framer owns the
/// source exclusively.
pub trait ByteSource {
    /// Number of bytes that can be read without blocking.
    fn bytes_available(&mut self) -> Result<usize, SourceError>;
    /// Read up to `buf.len()` bytes, returning how many were copied.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError>;
    /// Write `bytes` back to the panel.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, SourceError>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn bytes_available(&mut self) -> Result<usize, SourceError> {
        (**self).bytes_available()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        (**self).read(buf)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<usize, SourceError> {
        (**self).write(bytes)
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A finite source has no more bytes; live links never report this.
    #[error("byte source closed")]
    Closed,
}
