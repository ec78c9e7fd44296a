//! Async counterpart of `Buffer::append_from_reader`.
//!
//! # Example
//!
//! ```ignore
//! use growbuf::Buffer;
//! use futures_io::AsyncRead;
//!
//! async fn slurp<R: AsyncRead + Unpin>(reader: R) -> Result<Buffer, growbuf::BufferError> {
//!     let mut buf = Buffer::with_growth_unit(4096)?;
//!     buf.append_from_async_reader(reader).await?;
//!     Ok(buf)
//! }
//! ```

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::buffer::Buffer;
use crate::error::BufferError;

pin_project! {
    /// Future that appends everything an async reader yields to a buffer.
    ///
    /// Resolves to the number of bytes appended. Reads happen one growth unit
    /// at a time, exactly like the blocking version.
    ///
    /// Dropping the future before it resolves cancels the read; bytes that
    /// already arrived stay appended.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct AppendFromAsyncReader<'a, R> {
        #[pin]
        reader: R,
        buffer: &'a mut Buffer,
        start: usize,
    }
}

impl<'a, R: AsyncRead> AppendFromAsyncReader<'a, R> {
    fn new(buffer: &'a mut Buffer, reader: R) -> Self {
        let start = buffer.len();
        Self {
            reader,
            buffer,
            start,
        }
    }
}

impl<R: AsyncRead> Future for AppendFromAsyncReader<'_, R> {
    type Output = Result<usize, BufferError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        let unit = this.buffer.growth_unit();

        loop {
            if let Err(err) = this.buffer.reserve(unit) {
                this.buffer.rewind(*this.start);
                return Poll::Ready(Err(err));
            }

            let tail = &mut this.buffer.spare_mut()[..unit];
            match this.reader.as_mut().poll_read(cx, tail) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => break,
                Poll::Ready(Ok(n)) => this.buffer.advance(n.min(unit)),
                Poll::Ready(Err(err)) if err.kind() == io::ErrorKind::Interrupted => continue,
                Poll::Ready(Err(err)) => {
                    log::debug!(
                        "buffer: async read failed after {} bytes: {}",
                        this.buffer.len() - *this.start,
                        err
                    );
                    this.buffer.rewind(*this.start);
                    return Poll::Ready(Err(err.into()));
                }
            }
        }

        let appended = this.buffer.len() - *this.start;
        log::debug!("buffer: appended {} bytes from async reader", appended);
        Poll::Ready(Ok(appended))
    }
}

impl Buffer {
    /// Appends everything an async reader yields until end of input.
    ///
    /// Same semantics as [`Buffer::append_from_reader`]: one growth unit per
    /// read, interrupted reads retried, and on error the content appended by
    /// this call is discarded.
    ///
    /// Pass `&mut reader` to keep using the reader afterwards.
    pub fn append_from_async_reader<R: AsyncRead>(
        &mut self,
        reader: R,
    ) -> AppendFromAsyncReader<'_, R> {
        AppendFromAsyncReader::new(self, reader)
    }
}
