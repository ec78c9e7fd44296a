//! Async stream support for buffers.
//!
//! This module provides appending from a `futures-io::AsyncRead` source,
//! making it runtime-agnostic and compatible with tokio, async-std, smol,
//! and other async runtimes.
//!
//! - [`AppendFromAsyncReader`] - Future returned by
//!   [`Buffer::append_from_async_reader`](crate::Buffer::append_from_async_reader)
//!
//! This module requires the `async-io` feature to be enabled.

mod reader;

pub use reader::AppendFromAsyncReader;
