//! Byte source abstraction consumed by the detector.
//!
//! A detector needs to look at the first bytes without consuming them, so
//! that sibling detectors in the same pipeline can still inspect them, and
//! then to consume the stream in bounded reads.

use std::io::{self, ErrorKind, Read, Seek, SeekFrom};

/// Peekable, consumable byte stream.
///
/// `peek` and `read` fill the buffer as far as the stream allows: a count
/// smaller than the buffer length means end of stream, never a transient
/// short read.
pub trait ByteSource {
    /// Copy upcoming bytes into `buf` without consuming them.
    fn peek(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Consume upcoming bytes into `buf`.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Discard up to `n` bytes, returning how many were skipped.
    fn skip(&mut self, n: usize) -> io::Result<usize>;
}

/// Byte source over an in-memory slice.
///
/// # Examples
///
/// ```rust
/// use xml_sniffer::detection::{ByteSource, SliceSource};
///
/// let mut source = SliceSource::new(b"<?xml version=\"1.0\"?>");
/// let mut buf = [0u8; 5];
/// assert_eq!(source.peek(&mut buf)?, 5);
/// assert_eq!(&buf, b"<?xml");
/// assert_eq!(source.position(), 0);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor back to the start of the slice.
    #[inline]
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    #[inline]
    fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn peek(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.remaining();
        let len = buf.len().min(remaining.len());
        buf[..len].copy_from_slice(&remaining[..len]);
        Ok(len)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = self.peek(buf)?;
        self.pos += len;
        Ok(len)
    }

    fn skip(&mut self, n: usize) -> io::Result<usize> {
        let len = n.min(self.remaining().len());
        self.pos += len;
        Ok(len)
    }
}

/// Byte source over any reader, buffering peeked bytes.
///
/// Bytes pulled from the reader by `peek` are kept in a look-ahead buffer
/// and handed out again by the next `read` or `skip`.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use xml_sniffer::detection::{ByteSource, PeekReader};
///
/// let mut source = PeekReader::new(Cursor::new(b"\xEF\xBB\xBF<?xml ".to_vec()));
/// let mut buf = [0u8; 9];
/// source.peek(&mut buf)?;
/// source.skip(3)?;
/// assert_eq!(source.read(&mut buf)?, 6);
/// assert_eq!(&buf[..6], b"<?xml ");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct PeekReader<R> {
    inner: R,
    lookahead: Vec<u8>,
}

impl<R: Read> PeekReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            lookahead: Vec::new(),
        }
    }

    /// Unwrap the reader. Peeked but unconsumed bytes are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Pull from the reader until the look-ahead holds `len` bytes or the
    /// reader is exhausted.
    fn fill_lookahead(&mut self, len: usize) -> io::Result<()> {
        let mut chunk = [0u8; 512];
        while self.lookahead.len() < len {
            let want = (len - self.lookahead.len()).min(chunk.len());
            match self.inner.read(&mut chunk[..want]) {
                Ok(0) => break,
                Ok(n) => self.lookahead.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => {},
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

impl<R: Read + Seek> PeekReader<R> {
    /// Seek the reader back to its start and drop the look-ahead.
    pub fn rewind(&mut self) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(0))?;
        self.lookahead.clear();
        Ok(())
    }
}

impl<R: Read> ByteSource for PeekReader<R> {
    fn peek(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.fill_lookahead(buf.len())?;
        let len = buf.len().min(self.lookahead.len());
        buf[..len].copy_from_slice(&self.lookahead[..len]);
        Ok(len)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let buffered = buf.len().min(self.lookahead.len());
        buf[..buffered].copy_from_slice(&self.lookahead[..buffered]);
        self.lookahead.drain(..buffered);

        let mut filled = buffered;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {},
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    fn skip(&mut self, n: usize) -> io::Result<usize> {
        let buffered = n.min(self.lookahead.len());
        self.lookahead.drain(..buffered);

        let remaining = (n - buffered) as u64;
        let skipped = io::copy(&mut (&mut self.inner).take(remaining), &mut io::sink())?;
        Ok(buffered + skipped as usize)
    }
}
