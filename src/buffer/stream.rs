//! Appending from byte streams, and `io::Write`.

use std::io::{self, Read};

use super::Buffer;
use crate::error::BufferError;

impl Buffer {
    /// Appends everything `reader` yields until end of input.
    ///
    /// Reads happen one growth unit at a time, straight into the spare
    /// capacity: before each read the buffer is grown so that a full unit
    /// fits. Interrupted reads are retried. Returns the number of bytes
    /// appended.
    ///
    /// This blocks for as long as `reader` does.
    ///
    /// # Errors
    ///
    /// - [`BufferError::Io`] if the reader fails.
    /// - [`BufferError::Alloc`] if growth fails.
    ///
    /// On error everything appended by this call is discarded; the length and
    /// content are as before the call.
    ///
    /// # Example
    ///
    /// ```
    /// use growbuf::Buffer;
    /// use std::io::Cursor;
    ///
    /// let mut buf = Buffer::with_growth_unit(4)?;
    /// let n = buf.append_from_reader(&mut Cursor::new("hello, world"))?;
    /// assert_eq!(n, 12);
    /// assert!(buf.eq_str("hello, world"));
    /// # Ok::<(), growbuf::BufferError>(())
    /// ```
    pub fn append_from_reader<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
    ) -> Result<usize, BufferError> {
        let start = self.len();
        let unit = self.growth_unit();

        loop {
            if let Err(err) = self.reserve(unit) {
                self.rewind(start);
                return Err(err);
            }

            let tail = &mut self.spare_mut()[..unit];
            match reader.read(tail) {
                Ok(0) => break,
                Ok(n) => self.advance(n.min(unit)),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    log::debug!(
                        "buffer: read failed after {} bytes: {}",
                        self.len() - start,
                        err
                    );
                    self.rewind(start);
                    return Err(err.into());
                }
            }
        }

        let appended = self.len() - start;
        log::debug!("buffer: appended {} bytes from reader", appended);
        Ok(appended)
    }
}

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)?;
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.append(buf)?;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
