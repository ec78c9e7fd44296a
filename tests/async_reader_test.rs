// Integration tests for async stream appends (feature = "async-io")
// Tests cover: tokio readers via the compat layer, reader reuse, error rewind

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use growbuf::{Buffer, BufferError};
use tokio::io::AsyncWriteExt;
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::test]
async fn test_append_from_tokio_reader() {
    let data: Vec<u8> = (0..10_000).map(|i| (i * 7 + 13) as u8).collect();
    let mut buf = Buffer::with_growth_unit(512).unwrap();

    let n = buf
        .append_from_async_reader(data.as_slice().compat())
        .await
        .unwrap();

    assert_eq!(n, data.len());
    assert_eq!(buf.as_bytes(), &data[..]);
}

#[tokio::test]
async fn test_reader_reusable_by_reference() {
    let (mut tx, rx) = tokio::io::duplex(64);
    let mut rx = rx.compat();

    let writer = tokio::spawn(async move {
        for line in ["one\n", "two\n", "three\n"] {
            tx.write_all(line.as_bytes()).await.unwrap();
        }
        // Dropping the writer ends the stream.
    });

    let mut buf = Buffer::with_growth_unit(4).unwrap();
    buf.append_str("> ").unwrap();
    let n = buf.append_from_async_reader(&mut rx).await.unwrap();
    writer.await.unwrap();

    assert_eq!(n, 14);
    assert!(buf.eq_str("> one\ntwo\nthree\n"));
}

#[tokio::test]
async fn test_async_error_rewinds() {
    let reader = PartialThenFail {
        data: Some(b"partial data".to_vec()),
    };
    let mut buf = Buffer::with_growth_unit(16).unwrap();
    buf.append_str("before").unwrap();

    let err = buf.append_from_async_reader(reader).await.unwrap_err();
    assert!(matches!(err, BufferError::Io(_)));
    assert!(buf.eq_str("before"));
}

/// Yields one chunk of data, then fails.
struct PartialThenFail {
    data: Option<Vec<u8>>,
}

impl futures_io::AsyncRead for PartialThenFail {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        match self.data.take() {
            Some(data) => {
                buf[..data.len()].copy_from_slice(&data);
                Poll::Ready(Ok(data.len()))
            }
            None => Poll::Ready(Err(io::Error::other("connection dropped"))),
        }
    }
}
