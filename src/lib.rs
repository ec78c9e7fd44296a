//! growbuf
//!
//! Growable contiguous byte buffers for incremental output.
//!
//! `growbuf` is the accumulation primitive underneath a document renderer:
//! output is appended piece by piece (raw bytes, strings, single bytes,
//! formatted text, whole streams) into one owned region that grows in fixed
//! units rather than on every append.
//!
//! The crate intentionally:
//! - does NOT escape or encode text
//! - does NOT manage files or paths
//! - does NOT synchronize access
//! - does NOT abort on allocation failure
//!
//! Every append that may allocate returns a `Result`, and a failed append
//! leaves the buffer exactly as it was.
//!
//! # Example
//!
//! ```
//! use growbuf::{Buffer, BufferConfig, BufferError};
//!
//! fn main() -> Result<(), BufferError> {
//!     let mut out = Buffer::new(BufferConfig::default())?;
//!
//!     out.append_str("<p>")?;
//!     out.append_fmt(format_args!("{} items", 3))?;
//!     out.append_str("</p>")?;
//!     out.append_byte(b'\n')?;
//!
//!     assert!(out.eq_str("<p>3 items</p>\n"));
//!     assert!(out.has_prefix("<p>"));
//!
//!     // Reuse the allocation for the next block.
//!     out.truncate();
//!     assert!(out.is_empty());
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use growbuf::Buffer;
//! use tokio_util::compat::TokioAsyncReadCompatExt;
//!
//! async fn demo(file: tokio::fs::File) -> Result<(), growbuf::BufferError> {
//!     let mut buf = Buffer::with_growth_unit(4096)?;
//!     let n = buf.append_from_async_reader(file.compat()).await?;
//!     println!("read {} bytes", n);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod error;

#[cfg(feature = "async-io")]
mod async_read;

//
// Public surface
//

pub use buffer::Buffer;
pub use config::{BufferConfig, DEFAULT_GROWTH_UNIT, LARGE_GROWTH_UNIT, SMALL_GROWTH_UNIT};
pub use error::BufferError;

#[cfg(feature = "async-io")]
pub use async_read::AppendFromAsyncReader;
