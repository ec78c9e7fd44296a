//! Formatted appends.
//!
//! Formatting runs straight into the buffer's spare capacity. A bounded
//! writer copies what fits and keeps counting past the end, so a single pass
//! tells us the exact size when the output did not fit. In that case the
//! buffer grows once to that size and the arguments are formatted again.

use std::fmt;

use super::Buffer;
use crate::error::BufferError;

/// `fmt::Write` sink over a fixed slice that measures the full output.
struct BoundedWriter<'a> {
    buf: &'a mut [u8],
    written: usize,
    required: usize,
}

impl<'a> BoundedWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            written: 0,
            required: 0,
        }
    }
}

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let room = self.buf.len() - self.written;
        let n = bytes.len().min(room);
        self.buf[self.written..self.written + n].copy_from_slice(&bytes[..n]);
        self.written += n;
        self.required = self.required.saturating_add(bytes.len());
        Ok(())
    }
}

/// Formats `args` into `spare`, returning the full length of the output.
fn format_into(spare: &mut [u8], args: fmt::Arguments<'_>) -> Result<usize, BufferError> {
    let mut writer = BoundedWriter::new(spare);
    fmt::write(&mut writer, args)?;
    Ok(writer.required)
}

impl Buffer {
    /// Appends formatted text, returning the number of bytes appended.
    ///
    /// At least one spare byte is reserved before formatting; output that
    /// does not fit in the spare capacity with a byte to spare grows the
    /// buffer to `len + output + 1` and is formatted a second time.
    ///
    /// # Errors
    ///
    /// - [`BufferError::Alloc`] if growth fails.
    /// - [`BufferError::Format`] if a `Display` implementation fails, or
    ///   produces longer output the second time round.
    ///
    /// On error the length and content are unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use growbuf::Buffer;
    ///
    /// let mut buf = Buffer::with_growth_unit(8)?;
    /// buf.append_fmt(format_args!("<h{}>{}</h{}>", 1, "Title", 1))?;
    /// assert!(buf.eq_str("<h1>Title</h1>"));
    /// # Ok::<(), growbuf::BufferError>(())
    /// ```
    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<usize, BufferError> {
        let first_target = self.end_after(1)?;
        self.ensure_capacity(first_target)?;

        let spare = self.spare_capacity();
        let required = format_into(self.spare_mut(), args)?;
        if required < spare {
            self.advance(required);
            return Ok(required);
        }

        let target = self.end_after(required)?;
        let target = target.checked_add(1).ok_or(BufferError::Alloc {
            requested: usize::MAX,
        })?;
        log::debug!(
            "buffer: formatted output of {} bytes exceeds {} spare, growing",
            required,
            spare
        );
        self.ensure_capacity(target)?;

        let spare = self.spare_capacity();
        let retried = format_into(self.spare_mut(), args)?;
        if retried >= spare {
            log::warn!(
                "buffer: formatted output changed between passes ({} -> {} bytes)",
                required,
                retried
            );
            return Err(BufferError::Format);
        }
        self.advance(retried);
        Ok(retried)
    }
}

impl fmt::Write for Buffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_str(s).map_err(|_| fmt::Error)
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        let mut utf8 = [0u8; 4];
        self.write_str(c.encode_utf8(&mut utf8))
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.append_fmt(args).map(|_| ()).map_err(|_| fmt::Error)
    }
}
